//! Size Estimation Module
//!
//! Approximate memory footprint of cached values, used only for capacity
//! accounting.

use std::mem;
use std::sync::Arc;

// == Size Estimate ==
/// Approximate size in bytes of a value stored in the cache.
///
/// Implementations must be total. Types without a meaningful payload can
/// rely on the default, which reports the shallow in-memory size.
pub trait SizeEstimate {
    /// Returns the estimated footprint in bytes.
    fn estimated_size(&self) -> usize {
        mem::size_of_val(self)
    }
}

// == Audio Samples ==
/// A synthesized sample buffer paired with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSamples {
    /// Mono PCM samples in `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Samples per second
    pub sample_rate: u32,
}

impl AudioSamples {
    /// Creates a new sample buffer.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Playback duration in seconds, 0.0 for a zero sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.samples.len() as f64 / f64::from(self.sample_rate)
        }
    }
}

// Only the sample array is counted; the rate scalar is ignored.
impl SizeEstimate for AudioSamples {
    fn estimated_size(&self) -> usize {
        self.samples.len() * mem::size_of::<f32>()
    }
}

impl SizeEstimate for (Vec<f32>, u32) {
    fn estimated_size(&self) -> usize {
        self.0.len() * mem::size_of::<f32>()
    }
}

impl SizeEstimate for [u8] {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl SizeEstimate for Vec<u8> {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl SizeEstimate for str {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl SizeEstimate for String {
    fn estimated_size(&self) -> usize {
        self.len()
    }
}

impl SizeEstimate for u64 {}
impl SizeEstimate for f64 {}

impl<T: SizeEstimate + ?Sized> SizeEstimate for Arc<T> {
    fn estimated_size(&self) -> usize {
        (**self).estimated_size()
    }
}

impl<T: SizeEstimate + ?Sized> SizeEstimate for Box<T> {
    fn estimated_size(&self) -> usize {
        (**self).estimated_size()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Opaque {
        _a: u64,
        _b: u32,
    }

    impl SizeEstimate for Opaque {}

    #[test]
    fn test_bytes_size_is_length() {
        assert_eq!(vec![0u8; 100].estimated_size(), 100);
        assert_eq!(b"abc"[..].estimated_size(), 3);
        assert_eq!(Vec::<u8>::new().estimated_size(), 0);
    }

    #[test]
    fn test_samples_ignore_rate() {
        let a = AudioSamples::new(vec![0.0; 10], 24_000);
        let b = AudioSamples::new(vec![0.0; 10], 48_000);
        assert_eq!(a.estimated_size(), b.estimated_size());
        assert_eq!(a.estimated_size(), (vec![0.0f32; 10], 1u32).estimated_size());
    }

    #[test]
    fn test_samples_monotonic() {
        let mut last = 0;
        for len in [0, 1, 16, 1024, 48_000] {
            let size = AudioSamples::new(vec![0.5; len], 24_000).estimated_size();
            assert!(size >= last);
            last = size;
        }
        assert!(last > 0);
    }

    #[test]
    fn test_generic_fallback_reports_shallow_size() {
        let value = Opaque { _a: 1, _b: 2 };
        assert_eq!(value.estimated_size(), mem::size_of::<Opaque>());
        assert!(7u64.estimated_size() > 0);
    }

    #[test]
    fn test_smart_pointers_delegate() {
        let samples = AudioSamples::new(vec![0.0; 64], 24_000);
        let expected = samples.estimated_size();
        assert_eq!(Arc::new(samples.clone()).estimated_size(), expected);
        assert_eq!(Box::new(samples).estimated_size(), expected);
    }

    #[test]
    fn test_duration() {
        let samples = AudioSamples::new(vec![0.0; 48_000], 24_000);
        assert!((samples.duration_secs() - 2.0).abs() < f64::EPSILON);
        assert_eq!(AudioSamples::new(vec![0.0; 10], 0).duration_secs(), 0.0);
    }
}
