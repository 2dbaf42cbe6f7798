use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::asr::{AsrRequest, Transcriber};
use crate::audio;
use crate::distance::normalize_text;
use crate::error::{AssessmentError, AssessmentResult};
use crate::phoneme::Phonemizer;
use crate::rewards::{RewardMode, points_for};
use crate::scoring::phonetic_accuracy;

/// Engine-level knobs, independent of any config file format.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Language hint passed to the ASR backend.
    pub language_hint: Option<String>,
    /// Hard cap on a single ffmpeg conversion.
    pub ffmpeg_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language_hint: Some("en".to_string()),
            ffmpeg_timeout: Duration::from_secs(180),
        }
    }
}

/// Outcome of one scored attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub target_text: String,
    pub transcript: String,
    pub accuracy: f64,
    pub points_earned: i64,
}

/// Pronunciation assessment pipeline: normalize audio, transcribe, compare
/// phoneme sequences, award points.
pub struct AssessmentEngine {
    transcriber: Arc<dyn Transcriber>,
    phonemizer: Arc<dyn Phonemizer>,
    config: EngineConfig,
}

impl AssessmentEngine {
    /// Builds the engine, verifying external tooling up front so requests
    /// fail fast instead of at first use.
    pub async fn new(
        transcriber: Arc<dyn Transcriber>,
        phonemizer: Arc<dyn Phonemizer>,
        config: EngineConfig,
    ) -> AssessmentResult<Self> {
        if !audio::ffmpeg_available().await {
            return Err(AssessmentError::EngineUnavailable(
                "ffmpeg not found on PATH".to_string(),
            ));
        }
        info!(
            transcriber = transcriber.name(),
            phonemizer = phonemizer.name(),
            "Assessment engine ready"
        );
        Ok(Self {
            transcriber,
            phonemizer,
            config,
        })
    }

    /// Scores one clip against `target_text`.
    ///
    /// All intermediate files live in a per-call temp dir that is removed
    /// when this returns, on success and on every error path.
    pub async fn assess(
        &self,
        audio_path: &Path,
        target_text: &str,
        mode: RewardMode,
    ) -> AssessmentResult<Assessment> {
        if normalize_text(target_text).is_empty() {
            return Err(AssessmentError::InvalidInput(
                "target text must contain at least one word".to_string(),
            ));
        }

        let work_dir = TempDir::new()?;

        let wav_path =
            audio::normalize_to_wav(audio_path, work_dir.path(), self.config.ffmpeg_timeout)
                .await?;
        let samples = audio::read_wav_16k_mono(&wav_path)?;
        if samples.is_empty() {
            return Err(AssessmentError::AudioConversion(
                "normalized clip contains no samples".to_string(),
            ));
        }

        let result = self
            .transcriber
            .transcribe(AsrRequest {
                audio_pcm_16k_mono: samples,
                language_hint: self.config.language_hint.clone(),
                sample_rate: 16000,
            })
            .await
            .map_err(|e| AssessmentError::Transcription(e.to_string()))?;

        let transcript = result.text.trim().to_string();
        if normalize_text(&transcript).is_empty() {
            return Err(AssessmentError::EmptyTranscript);
        }

        let accuracy = phonetic_accuracy(self.phonemizer.as_ref(), target_text, &transcript);
        let points_earned = points_for(accuracy, mode);

        debug!(
            %transcript,
            accuracy,
            points_earned,
            "Assessment complete"
        );

        Ok(Assessment {
            target_text: target_text.to_string(),
            transcript,
            accuracy,
            points_earned,
        })
    }
}
