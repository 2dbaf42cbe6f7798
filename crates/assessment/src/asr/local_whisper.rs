use async_trait::async_trait;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::{AsrRequest, Transcriber, TranscriptionResult};

/// Local Whisper backend (whisper.cpp via whisper-rs).
///
/// The model is loaded once at construction; each call gets its own
/// inference state, so the backend is safe to share behind an `Arc`.
pub struct LocalWhisperTranscriber {
    ctx: WhisperContext,
    default_language: Option<String>,
}

impl LocalWhisperTranscriber {
    /// Loads a GGML Whisper model from disk (e.g. ggml-base.en.bin).
    pub fn new(model_path: &str, default_language: Option<String>) -> anyhow::Result<Self> {
        info!(model_path, "Loading Whisper model");
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| anyhow::anyhow!("Failed to load Whisper model '{}': {}", model_path, e))?;
        info!("Whisper model loaded");
        Ok(Self {
            ctx,
            default_language,
        })
    }
}

fn run_inference(
    ctx: &WhisperContext,
    audio: &[f32],
    language: Option<&str>,
) -> anyhow::Result<String> {
    let mut state = ctx
        .create_state()
        .map_err(|e| anyhow::anyhow!("Failed to create Whisper state: {}", e))?;

    // Clips here are short practice utterances; beam search buys accuracy
    // on hard words at negligible cost.
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });
    match language {
        Some(lang) => params.set_language(Some(lang)),
        None => params.set_detect_language(true),
    }
    params.set_translate(false);
    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);
    params.set_no_speech_thold(0.6);
    params.set_suppress_blank(true);

    state
        .full(params, audio)
        .map_err(|e| anyhow::anyhow!("Whisper transcription failed: {}", e))?;

    let mut text = String::new();
    for i in 0..state.full_n_segments() {
        if let Some(segment) = state.get_segment(i)
            && let Ok(seg_text) = segment.to_str()
        {
            text.push_str(seg_text);
        }
    }
    Ok(text.trim().to_string())
}

#[async_trait]
impl Transcriber for LocalWhisperTranscriber {
    async fn transcribe(&self, request: AsrRequest) -> anyhow::Result<TranscriptionResult> {
        let audio = request.audio_pcm_16k_mono;
        let language = request
            .language_hint
            .or_else(|| self.default_language.clone());

        // whisper-rs is CPU-bound; run on blocking thread pool
        let ctx_ptr = &self.ctx as *const WhisperContext;
        // SAFETY: WhisperContext is Send+Sync, and we create a new state per call
        let ctx_ref = unsafe { &*ctx_ptr };

        let lang = language.clone();
        let text =
            tokio::task::spawn_blocking(move || run_inference(ctx_ref, &audio, lang.as_deref()))
                .await
                .map_err(|e| anyhow::anyhow!("Whisper task join error: {}", e))??;

        debug!(text_len = text.len(), "Whisper transcription complete");

        Ok(TranscriptionResult {
            text,
            language,
            confidence: None,
        })
    }

    fn name(&self) -> &str {
        "local_whisper"
    }

    fn supports_language(&self, _lang: &str) -> bool {
        true // Whisper supports 99+ languages
    }
}
