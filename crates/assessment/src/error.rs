use thiserror::Error;

pub type AssessmentResult<T> = Result<T, AssessmentError>;

/// Failure taxonomy for the assessment pipeline.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// A required engine component is missing (ffmpeg binary, ASR model).
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),
    /// ffmpeg rejected the upload or produced no usable audio.
    #[error("Audio conversion failed: {0}")]
    AudioConversion(String),
    /// The recognizer returned no words for the clip.
    #[error("No speech recognized in the audio")]
    EmptyTranscript,
    /// Caller-supplied input is malformed (empty target text, bad upload).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The ASR backend failed mid-transcription.
    #[error("Transcription failed: {0}")]
    Transcription(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
