use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pronuncia_api::{build_router, state::AppState};
use pronuncia_assessment::{
    AssessmentEngine, EngineConfig, LexiconPhonemizer, Phonemizer, Transcriber,
};
use pronuncia_config::Settings;
use pronuncia_services::dao::challenge::ChallengeDao;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("Failed to load settings")?;

    let db = pronuncia_db::connect(&settings.mongo)
        .await
        .context("Failed to connect to MongoDB")?;
    pronuncia_db::indexes::ensure_indexes(&db)
        .await
        .context("Failed to ensure indexes")?;
    ChallengeDao::new(&db)
        .seed_defaults()
        .await
        .context("Failed to seed challenges")?;

    let transcriber = build_transcriber(&settings)?;
    let phonemizer: Arc<dyn Phonemizer> = Arc::new(LexiconPhonemizer::new());
    let engine = Arc::new(
        AssessmentEngine::new(
            transcriber,
            phonemizer,
            EngineConfig {
                language_hint: settings.assessment.language.clone(),
                ffmpeg_timeout: std::time::Duration::from_secs(
                    settings.assessment.ffmpeg_timeout_secs,
                ),
            },
        )
        .await
        .context("Failed to start assessment engine")?,
    );

    let state = AppState::new(&db, engine, settings.auth.clone());
    let router = build_router(state, settings.http.max_upload_bytes);

    let addr = format!("{}:{}", settings.http.host, settings.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(feature = "local-whisper")]
fn build_transcriber(settings: &Settings) -> anyhow::Result<Arc<dyn Transcriber>> {
    use pronuncia_assessment::asr::local_whisper::LocalWhisperTranscriber;

    match settings.assessment.backend.as_str() {
        "local_whisper" => {
            let model_path = settings
                .assessment
                .whisper_model_path
                .as_deref()
                .context("assessment.whisper_model_path is required for local_whisper")?;
            let backend =
                LocalWhisperTranscriber::new(model_path, settings.assessment.language.clone())?;
            Ok(Arc::new(backend))
        }
        other => anyhow::bail!("Unknown ASR backend '{other}'"),
    }
}

#[cfg(not(feature = "local-whisper"))]
fn build_transcriber(settings: &Settings) -> anyhow::Result<Arc<dyn Transcriber>> {
    anyhow::bail!(
        "ASR backend '{}' requires the 'local-whisper' build feature",
        settings.assessment.backend
    )
}
