//! Speech Module
//!
//! The text-to-speech tool: synthesis and playback collaborators plus the
//! service that puts the sample cache in front of them.

mod service;
mod sink;
mod synth;

pub use service::{
    SampleCache, SharedCache, SpeakOutcome, SpeechRequest, SpeechService, MAX_SPEED, MIN_SPEED,
};
pub use sink::{write_wav, AudioSink, CommandSink, NullSink};
pub use synth::{Synthesizer, ToneSynthesizer};
