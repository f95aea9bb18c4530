//! Synthesis Module
//!
//! Interface to the engine that turns text into sample buffers.

use std::f32::consts::TAU;

use crate::cache::AudioSamples;
use crate::error::{Result, SpeechError};

// == Synthesizer ==
/// Turns text into mono PCM samples.
///
/// Implementations may be slow; the service calls them from a blocking
/// thread and caches the result.
pub trait Synthesizer: Send + Sync {
    /// Synthesizes `text` with the given voice at the given speed.
    fn synthesize(&self, text: &str, voice: &str, speed: f32) -> Result<AudioSamples>;
}

// == Tone Synthesizer ==
/// Deterministic stand-in engine that renders one short tone per character.
///
/// Useful for development and tests when no neural voice model is
/// available: output length scales with text length and shrinks as speed
/// grows, and equal inputs always yield equal buffers.
#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    sample_rate: u32,
    /// Tone length per character at speed 1.0, in seconds
    char_secs: f32,
}

impl ToneSynthesizer {
    /// Output rate of the stand-in engine.
    pub const SAMPLE_RATE: u32 = 24_000;

    pub fn new() -> Self {
        Self {
            sample_rate: Self::SAMPLE_RATE,
            char_secs: 0.06,
        }
    }

    fn pitch(c: char, voice: &str) -> f32 {
        // Spread characters across roughly two octaves above 220 Hz.
        let offset = voice.bytes().fold(0u32, |acc, b| acc.wrapping_add(u32::from(b))) % 12;
        let step = (u32::from(c) + offset) % 24;
        220.0 * 2f32.powf(step as f32 / 12.0)
    }
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer for ToneSynthesizer {
    fn synthesize(&self, text: &str, voice: &str, speed: f32) -> Result<AudioSamples> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SpeechError::Synthesis(format!("invalid speed {speed}")));
        }

        let per_char = ((self.char_secs / speed) * self.sample_rate as f32).round() as usize;
        let mut samples: Vec<f32> = Vec::with_capacity(per_char * text.chars().count());

        for c in text.chars() {
            if c.is_whitespace() {
                samples.resize(samples.len() + per_char, 0.0);
                continue;
            }
            let freq = Self::pitch(c, voice);
            samples.extend((0..per_char).map(|i| {
                let t = i as f32 / self.sample_rate as f32;
                0.3 * (TAU * freq * t).sin()
            }));
        }

        Ok(AudioSamples::new(samples, self.sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_is_deterministic() {
        let synth = ToneSynthesizer::new();
        let a = synth.synthesize("hello", "af_heart", 1.0).unwrap();
        let b = synth.synthesize("hello", "af_heart", 1.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.sample_rate, ToneSynthesizer::SAMPLE_RATE);
    }

    #[test]
    fn test_length_scales_with_text() {
        let synth = ToneSynthesizer::new();
        let short = synth.synthesize("hi", "af_heart", 1.0).unwrap();
        let long = synth.synthesize("hello there", "af_heart", 1.0).unwrap();
        assert!(long.samples.len() > short.samples.len());
    }

    #[test]
    fn test_faster_speed_is_shorter() {
        let synth = ToneSynthesizer::new();
        let slow = synth.synthesize("hello", "af_heart", 0.5).unwrap();
        let fast = synth.synthesize("hello", "af_heart", 2.0).unwrap();
        assert!(fast.samples.len() < slow.samples.len());
    }

    #[test]
    fn test_samples_in_range() {
        let synth = ToneSynthesizer::new();
        let out = synth.synthesize("range check", "af_heart", 1.1).unwrap();
        assert!(out.samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_invalid_speed() {
        let synth = ToneSynthesizer::new();
        assert!(matches!(
            synth.synthesize("x", "af_heart", 0.0),
            Err(SpeechError::Synthesis(_))
        ));
        assert!(synth.synthesize("x", "af_heart", f32::NAN).is_err());
    }
}
