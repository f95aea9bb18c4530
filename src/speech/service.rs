//! Speech Service
//!
//! Orchestrates key derivation, cache lookup, synthesis on miss and
//! playback. Owns the sample cache for the lifetime of the service.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::cache::{derive_key, AudioSamples, BoundedCache, CacheKey, CacheStats};
use crate::config::{Config, SinkKind};
use crate::error::{Result, SpeechError};
use crate::speech::{AudioSink, CommandSink, NullSink, Synthesizer, ToneSynthesizer};

/// Slowest accepted playback speed
pub const MIN_SPEED: f32 = 0.5;
/// Fastest accepted playback speed
pub const MAX_SPEED: f32 = 2.0;

/// Number of single-flight lock shards
const INFLIGHT_SHARDS: usize = 16;

/// Characters of request text quoted in log lines
const LOG_PREVIEW_CHARS: usize = 50;

/// Cache of synthesized buffers, shared by reference with callers.
pub type SampleCache = BoundedCache<Arc<AudioSamples>>;

/// Sample cache behind an async lock.
pub type SharedCache = Arc<RwLock<SampleCache>>;

// == Speech Request ==
/// The parts of a request that determine the synthesized audio.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub voice: &'a str,
    pub speed: f32,
}

impl SpeechRequest<'_> {
    /// Canonical text form fed to the key deriver.
    ///
    /// Speed is rendered with two decimals so that 1.1 and 1.10 share a key.
    pub fn canonical_form(&self) -> String {
        format!("{}\u{1f}{:.2}\u{1f}{}", self.voice, self.speed, self.text)
    }

    pub fn cache_key(&self) -> CacheKey {
        derive_key(&self.canonical_form())
    }
}

// == Speak Outcome ==
/// Result of a successful `speak` call.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakOutcome {
    /// Whether the samples came from the cache
    pub cache_hit: bool,
    /// Number of samples played
    pub samples: usize,
    /// Sample rate of the played buffer
    pub sample_rate: u32,
    /// Playback length in seconds
    pub duration_secs: f64,
}

// == Speech Service ==
/// Text-to-speech front end with a bounded sample cache.
///
/// Concurrent requests for the same uncached text wait for a single
/// synthesis instead of each running their own.
pub struct SpeechService {
    cache: SharedCache,
    synthesizer: Arc<dyn Synthesizer>,
    sink: Arc<dyn AudioSink>,
    voice: String,
    default_speed: f32,
    inflight: Vec<Mutex<()>>,
}

impl std::fmt::Debug for SpeechService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechService")
            .field("voice", &self.voice)
            .field("default_speed", &self.default_speed)
            .finish_non_exhaustive()
    }
}

impl SpeechService {
    // == Constructor ==
    /// Creates a service around an existing cache and collaborators.
    pub fn new(
        cache: SampleCache,
        synthesizer: Arc<dyn Synthesizer>,
        sink: Arc<dyn AudioSink>,
        voice: impl Into<String>,
        default_speed: f32,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            synthesizer,
            sink,
            voice: voice.into(),
            default_speed,
            inflight: (0..INFLIGHT_SHARDS).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Creates a service from configuration, using the built-in tone
    /// synthesizer and the configured audio sink.
    pub fn from_config(config: &Config) -> Self {
        let cache = SampleCache::new(config.max_items, config.max_bytes());
        let sink: Arc<dyn AudioSink> = match config.audio_sink {
            SinkKind::Null => Arc::new(NullSink),
            SinkKind::Command => Arc::new(CommandSink::for_platform()),
        };
        Self::new(
            cache,
            Arc::new(ToneSynthesizer::new()),
            sink,
            config.voice.clone(),
            config.default_speed,
        )
    }

    /// Shared handle to the sample cache.
    pub fn cache(&self) -> SharedCache {
        Arc::clone(&self.cache)
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn default_speed(&self) -> f32 {
        self.default_speed
    }

    // == Speed ==
    /// Applies the default speed and checks the accepted range.
    pub fn resolve_speed(&self, speed: Option<f32>) -> Result<f32> {
        let speed = speed.unwrap_or(self.default_speed);
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(SpeechError::InvalidRequest(format!(
                "speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"
            )));
        }
        Ok(speed)
    }

    // == Samples ==
    /// Returns samples for `text`, synthesizing and caching them on a miss.
    ///
    /// The boolean is true on a cache hit.
    pub async fn samples_for(&self, text: &str, speed: f32) -> Result<(Arc<AudioSamples>, bool)> {
        let request = SpeechRequest {
            text,
            voice: &self.voice,
            speed,
        };
        let key = request.cache_key();
        let preview: String = text.chars().take(LOG_PREVIEW_CHARS).collect();

        if let Some(samples) = self.cache.write().await.get(&key).cloned() {
            info!("Cache hit for playback text: {preview}...");
            return Ok((samples, true));
        }

        // Held across synthesis and insert for this key.
        let _flight = self.inflight[shard_for(&key)].lock().await;

        // Another request may have filled the entry while we waited.
        if let Some(samples) = self.cache.read().await.peek(&key).cloned() {
            info!("Cache hit after waiting for playback text: {preview}...");
            return Ok((samples, true));
        }

        info!("Cache miss, generating samples for playback text: {preview}...");
        let synthesizer = Arc::clone(&self.synthesizer);
        let text = text.to_owned();
        let voice = self.voice.clone();
        let samples = tokio::task::spawn_blocking(move || {
            synthesizer.synthesize(&text, &voice, speed)
        })
        .await??;
        let samples = Arc::new(samples);

        let stats = {
            let mut cache = self.cache.write().await;
            cache.put(key, Arc::clone(&samples));
            cache.stats()
        };
        info!(
            items = stats.items,
            max_items = stats.max_items,
            memory_mb = stats.memory_mb(),
            max_memory_mb = stats.max_memory_mb(),
            "Samples cache stats"
        );

        Ok((samples, false))
    }

    // == Speak ==
    /// Validates the request, obtains samples and plays them.
    pub async fn speak(&self, text: &str, speed: Option<f32>) -> Result<SpeakOutcome> {
        if text.trim().is_empty() {
            return Err(SpeechError::InvalidRequest("text cannot be empty".to_string()));
        }
        let speed = self.resolve_speed(speed)?;

        let (samples, cache_hit) = self.samples_for(text, speed).await?;

        let outcome = SpeakOutcome {
            cache_hit,
            samples: samples.samples.len(),
            sample_rate: samples.sample_rate,
            duration_secs: samples.duration_secs(),
        };

        let sink = Arc::clone(&self.sink);
        tokio::task::spawn_blocking(move || sink.play(&samples)).await??;
        debug!(?outcome, "playback finished");

        Ok(outcome)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}

fn shard_for(key: &CacheKey) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % INFLIGHT_SHARDS as u64) as usize
}
