//! Audio Output Module
//!
//! Interface to the platform audio output plus the two built-in outputs.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::Builder;
use tracing::{debug, info};

use crate::cache::AudioSamples;
use crate::error::{Result, SpeechError};

// == Audio Sink ==
/// Plays a sample buffer to completion.
pub trait AudioSink: Send + Sync {
    /// Blocks until playback has finished.
    fn play(&self, audio: &AudioSamples) -> Result<()>;
}

// == Null Sink ==
/// Logs what would have been played.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&self, audio: &AudioSamples) -> Result<()> {
        info!(
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            duration_secs = audio.duration_secs(),
            "playback skipped (null audio sink)"
        );
        Ok(())
    }
}

// == Command Sink ==
/// Writes the buffer to a temporary WAV file and runs the platform player
/// on it (`afplay` on macOS, `aplay` on Linux, `start` on Windows).
#[derive(Debug)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
    temp_dir: PathBuf,
}

impl CommandSink {
    /// Creates a sink using the default player for the current platform.
    pub fn for_platform() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("afplay", &[])
        } else if cfg!(target_os = "windows") {
            ("cmd", &["/C", "start", "/WAIT", ""])
        } else {
            ("aplay", &["-q"])
        };
        Self::new(program, args.iter().map(|a| a.to_string()).collect())
    }

    /// Creates a sink running `program args... <wav-path>`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Writes temporary WAV files under `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    fn run_player(&self, path: &Path) -> Result<()> {
        debug!(program = %self.program, path = %path.display(), "starting player");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| SpeechError::Playback(format!("failed to run {}: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Playback(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}

impl AudioSink for CommandSink {
    fn play(&self, audio: &AudioSamples) -> Result<()> {
        // Removed on drop, including when writing fails.
        let mut file = Builder::new()
            .prefix("tts_cache_")
            .suffix(".wav")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| {
                SpeechError::Playback(format!(
                    "cannot create wav in {}: {e}",
                    self.temp_dir.display()
                ))
            })?;
        write_wav(&mut file, audio)
            .and_then(|()| file.flush())
            .map_err(|e| SpeechError::Playback(format!("cannot write wav: {e}")))?;

        // Close our handle so the player can open the file on every platform.
        let path = file.into_temp_path();
        let result = self.run_player(&path);
        if let Err(e) = path.close() {
            debug!(error = %e, "temp file cleanup failed");
        }
        result
    }
}

// == WAV Encoding ==
/// Encodes mono samples as 16-bit PCM RIFF/WAVE.
pub fn write_wav<W: Write>(out: &mut W, audio: &AudioSamples) -> io::Result<()> {
    const CHANNELS: u16 = 1;
    const BITS: u16 = 16;
    let block_align = CHANNELS * BITS / 8;
    let too_long = || io::Error::new(io::ErrorKind::InvalidInput, "audio too long for wav");

    let byte_rate = audio
        .sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "sample rate too high"))?;
    let data_len = audio
        .samples
        .len()
        .checked_mul(usize::from(block_align))
        .and_then(|len| u32::try_from(len).ok())
        .ok_or_else(too_long)?;
    let riff_len = data_len.checked_add(36).ok_or_else(too_long)?;

    out.write_all(b"RIFF")?;
    out.write_all(&riff_len.to_le_bytes())?;
    out.write_all(b"WAVE")?;

    out.write_all(b"fmt ")?;
    out.write_all(&16u32.to_le_bytes())?;
    out.write_all(&1u16.to_le_bytes())?; // PCM
    out.write_all(&CHANNELS.to_le_bytes())?;
    out.write_all(&audio.sample_rate.to_le_bytes())?;
    out.write_all(&byte_rate.to_le_bytes())?;
    out.write_all(&block_align.to_le_bytes())?;
    out.write_all(&BITS.to_le_bytes())?;

    out.write_all(b"data")?;
    out.write_all(&data_len.to_le_bytes())?;
    for sample in &audio.samples {
        let pcm = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        out.write_all(&pcm.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_null_sink_plays() {
        let audio = AudioSamples::new(vec![0.0; 100], 24_000);
        assert!(NullSink.play(&audio).is_ok());
    }

    #[test]
    fn test_wav_header() {
        let audio = AudioSamples::new(vec![0.0, 1.0, -1.0], 24_000);
        let mut buf = Vec::new();
        write_wav(&mut buf, &audio).unwrap();

        assert_eq!(buf.len(), 44 + 6);
        assert_eq!(&buf[0..4], b"RIFF");
        assert_eq!(&buf[8..12], b"WAVE");
        assert_eq!(&buf[36..40], b"data");
        assert_eq!(u32::from_le_bytes([buf[24], buf[25], buf[26], buf[27]]), 24_000);
        assert_eq!(u32::from_le_bytes([buf[40], buf[41], buf[42], buf[43]]), 6);
    }

    #[test]
    fn test_wav_samples_clamped() {
        let audio = AudioSamples::new(vec![2.0, -2.0], 8_000);
        let mut buf = Vec::new();
        write_wav(&mut buf, &audio).unwrap();

        assert_eq!(i16::from_le_bytes([buf[44], buf[45]]), i16::MAX);
        assert_eq!(i16::from_le_bytes([buf[46], buf[47]]), -i16::MAX);
    }

    #[test]
    fn test_command_sink_missing_program() {
        let sink = CommandSink::new("definitely-not-a-real-player-binary", Vec::new());
        let audio = AudioSamples::new(vec![0.0; 10], 8_000);

        let result = sink.play(&audio);
        assert!(matches!(result, Err(SpeechError::Playback(_))));
    }

    #[test]
    fn test_wav_rejects_overflowing_sample_rate() {
        let audio = AudioSamples::new(vec![0.0; 4], u32::MAX);
        let mut buf = Vec::new();

        let err = write_wav(&mut buf, &audio).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_command_sink_missing_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CommandSink::new("true", Vec::new()).with_temp_dir(dir.path().join("absent"));
        let audio = AudioSamples::new(vec![0.0; 10], 8_000);

        let err = sink.play(&audio).unwrap_err();
        assert!(err.to_string().contains("cannot create wav"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_sink_runs_program_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        // `test -s` succeeds only if the wav exists and is non-empty
        let sink = CommandSink::new("test", vec!["-s".to_string()]).with_temp_dir(dir.path());
        let audio = AudioSamples::new(vec![0.0; 10], 8_000);

        assert!(sink.play(&audio).is_ok());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_sink_leaves_existing_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let victim = dir.path().join("victim.txt");
        fs::write(&victim, "precious data").unwrap();

        // Files and links under names a sequential scheme would pick
        let pid = std::process::id();
        let mut planted = Vec::new();
        for n in 0..8 {
            let file = dir.path().join(format!("tts_cache_{pid}_{n}.wav"));
            fs::write(&file, "existing").unwrap();
            let link = dir.path().join(format!("tts_cache_link_{n}.wav"));
            std::os::unix::fs::symlink(&victim, &link).unwrap();
            planted.push(file);
            planted.push(link);
        }

        let sink = CommandSink::new("true", Vec::new()).with_temp_dir(dir.path());
        let audio = AudioSamples::new(vec![0.5; 10], 8_000);
        for _ in 0..8 {
            assert!(sink.play(&audio).is_ok());
        }

        assert_eq!(fs::read_to_string(&victim).unwrap(), "precious data");
        for path in &planted {
            assert!(fs::symlink_metadata(path).is_ok());
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), planted.len() + 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_sink_reports_player_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CommandSink::new("false", Vec::new()).with_temp_dir(dir.path());
        let audio = AudioSamples::new(vec![0.0; 10], 8_000);

        let err = sink.play(&audio).unwrap_err();
        assert!(err.to_string().contains("false exited"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
