//! Pronunciation assessment pipeline.
//!
//! Takes an audio clip and a target text, normalizes the audio with ffmpeg,
//! transcribes it with a pluggable ASR backend, converts both texts to
//! phonemes and scores the match by edit distance.

pub mod asr;
pub mod audio;
pub mod distance;
pub mod engine;
pub mod error;
pub mod phoneme;
pub mod rewards;
pub mod scoring;

pub use asr::{AsrRequest, Transcriber, TranscriptionResult};
pub use engine::{Assessment, AssessmentEngine, EngineConfig};
pub use error::{AssessmentError, AssessmentResult};
pub use phoneme::{LexiconPhonemizer, Phonemizer};
pub use rewards::{RewardMode, level_for, points_for};
pub use distance::similarity_score;
pub use scoring::phonetic_accuracy;
