use axum::{Json, extract::{Multipart, State}};
use serde::Serialize;
use tracing::info;

use crate::{
    error::ApiError,
    extractors::auth::AuthUser,
    routes::{apply_points, collect_upload},
    state::AppState,
};
use pronuncia_assessment::RewardMode;

#[derive(Debug, Serialize)]
pub struct PracticeResponse {
    pub target_text: String,
    pub transcript: String,
    pub accuracy: f64,
    pub points_earned: i64,
    pub total_points: i64,
    pub level: i32,
}

/// Free practice: the caller supplies both the clip and the text to say.
pub async fn practice(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<PracticeResponse>, ApiError> {
    let (audio, text) = collect_upload(&mut multipart).await?;
    let audio =
        audio.ok_or_else(|| ApiError::BadRequest("Missing 'audio' field".to_string()))?;
    let target_text = text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'text' field".to_string()))?;

    let assessment = state
        .engine
        .assess(&audio.path, &target_text, RewardMode::FreePractice)
        .await?;

    state
        .attempts
        .record(
            auth.user_id,
            None,
            target_text.clone(),
            assessment.transcript.clone(),
            assessment.accuracy,
            assessment.points_earned,
        )
        .await?;
    let (total_points, level) = apply_points(&state, auth.user_id, assessment.points_earned).await?;

    info!(
        user = %auth.username,
        accuracy = assessment.accuracy,
        points = assessment.points_earned,
        "Free practice scored"
    );

    Ok(Json(PracticeResponse {
        target_text,
        transcript: assessment.transcript,
        accuracy: assessment.accuracy,
        points_earned: assessment.points_earned,
        total_points,
        level,
    }))
}
