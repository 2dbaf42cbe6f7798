use axum::{Json, extract::State};
use serde::Serialize;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

const HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub target_text: String,
    pub transcript: String,
    pub accuracy: f64,
    pub points_earned: i64,
    pub challenge_id: Option<String>,
    pub created_at: String,
}

pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let attempts = state.attempts.history(auth.user_id, HISTORY_LIMIT).await?;

    Ok(Json(
        attempts
            .into_iter()
            .map(|a| HistoryEntry {
                target_text: a.target_text,
                transcript: a.transcript,
                accuracy: a.accuracy,
                points_earned: a.points_earned,
                challenge_id: a.challenge_id.map(|id| id.to_hex()),
                created_at: a.created_at.try_to_rfc3339_string().unwrap_or_default(),
            })
            .collect(),
    ))
}
