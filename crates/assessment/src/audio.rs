use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{AssessmentError, AssessmentResult};

/// Returns true if ffmpeg is available on PATH.
pub async fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Converts any ffmpeg-readable clip to 16kHz mono 16-bit PCM WAV inside
/// `work_dir`. The caller owns `work_dir` (typically a `TempDir`), so the
/// output is cleaned up with it.
pub async fn normalize_to_wav(
    input: &Path,
    work_dir: &Path,
    timeout: Duration,
) -> AssessmentResult<PathBuf> {
    let output = work_dir.join("normalized_16k_mono.wav");
    let mut cmd = Command::new("ffmpeg");
    cmd.args([
        "-hide_banner",
        "-loglevel",
        "error",
        "-y",
        "-i",
    ])
    .arg(input)
    .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
    .arg(&output)
    .stdout(Stdio::null())
    .stderr(Stdio::piped())
    .kill_on_drop(true);

    let result = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| {
            AssessmentError::AudioConversion(format!(
                "ffmpeg timed out after {}s",
                timeout.as_secs()
            ))
        })?;
    let out = result.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AssessmentError::EngineUnavailable("ffmpeg not found on PATH".to_string())
        } else {
            AssessmentError::AudioConversion(format!("Failed to spawn ffmpeg: {e}"))
        }
    })?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(AssessmentError::AudioConversion(format!(
            "ffmpeg exited with {}: {}",
            out.status,
            stderr.trim()
        )));
    }

    // ffmpeg can exit 0 yet write nothing for some malformed containers.
    let size = tokio::fs::metadata(&output)
        .await
        .map(|m| m.len())
        .unwrap_or(0);
    if size <= 44 {
        return Err(AssessmentError::AudioConversion(
            "ffmpeg produced no audio data".to_string(),
        ));
    }

    debug!(output = %output.display(), bytes = size, "Audio normalized");
    Ok(output)
}

/// Reads a WAV file that must already be 16kHz mono f32/int PCM.
///
/// The normalizer always emits 16kHz, so any other rate means the file did
/// not come from this pipeline.
pub fn read_wav_16k_mono(path: impl AsRef<Path>) -> AssessmentResult<Vec<f32>> {
    let reader = hound::WavReader::open(path.as_ref()).map_err(|e| {
        AssessmentError::AudioConversion(format!(
            "Failed to open WAV '{}': {}",
            path.as_ref().display(),
            e
        ))
    })?;
    let spec = reader.spec();
    if spec.sample_rate != 16000 {
        return Err(AssessmentError::AudioConversion(format!(
            "Expected 16kHz WAV but got {}Hz in '{}'",
            spec.sample_rate,
            path.as_ref().display()
        )));
    }
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.unwrap_or(0) as f32 / max_val)
                .collect()
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.unwrap_or(0.0))
            .collect(),
    };

    // Down-mix to mono if stereo or multi-channel
    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).expect("create WAV");
        for s in samples {
            writer.write_sample(*s).expect("write sample");
        }
        writer.finalize().expect("finalize WAV");
    }

    #[test]
    fn test_read_wav_16k_mono() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tone.wav");
        let samples: Vec<i16> = (0..1600)
            .map(|i| {
                let t = i as f32 / 16000.0;
                ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 16000.0) as i16
            })
            .collect();
        write_wav(&path, &samples, 16000);

        let audio = read_wav_16k_mono(&path).expect("read");
        assert_eq!(audio.len(), 1600);
        assert!(audio.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_read_wav_rejects_wrong_rate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("wrong_rate.wav");
        write_wav(&path, &[0i16; 800], 8000);

        let err = read_wav_16k_mono(&path).expect_err("should reject 8kHz");
        assert!(matches!(err, AssessmentError::AudioConversion(_)));
        assert!(err.to_string().contains("16kHz"));
    }

    #[test]
    fn test_read_wav_missing_file() {
        let err = read_wav_16k_mono("/nonexistent/clip.wav").expect_err("should fail");
        assert!(matches!(err, AssessmentError::AudioConversion(_)));
    }

    #[tokio::test]
    async fn test_normalize_rejects_non_audio() {
        if !ffmpeg_available().await {
            eprintln!("SKIPPED: ffmpeg not found on PATH");
            return;
        }
        let dir = tempfile::tempdir().expect("tempdir");
        let bogus = dir.path().join("not_audio.txt");
        std::fs::write(&bogus, "definitely not audio").expect("write");
        let work = tempfile::tempdir().expect("work_dir");

        let result = normalize_to_wav(&bogus, work.path(), Duration::from_secs(30)).await;
        assert!(matches!(result, Err(AssessmentError::AudioConversion(_))));
    }

    #[tokio::test]
    async fn test_normalize_valid_wav() {
        if !ffmpeg_available().await {
            eprintln!("SKIPPED: ffmpeg not found on PATH");
            return;
        }
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("input.wav");
        let samples: Vec<i16> = (0..44100)
            .map(|i| {
                let t = i as f32 / 44100.0;
                ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 16000.0) as i16
            })
            .collect();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&input, spec).expect("create WAV");
        for s in &samples {
            writer.write_sample(*s).expect("write sample");
        }
        writer.finalize().expect("finalize WAV");

        let work = tempfile::tempdir().expect("work_dir");
        let output = normalize_to_wav(&input, work.path(), Duration::from_secs(30))
            .await
            .expect("ffmpeg should succeed");
        assert!(output.exists());

        // Output must decode as 16kHz mono, ~1 second of audio.
        let audio = read_wav_16k_mono(&output).expect("decode");
        assert!((audio.len() as i64 - 16000).unsigned_abs() < 800);
    }
}
