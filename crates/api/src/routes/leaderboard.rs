use axum::{Json, extract::{Query, State}};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub points: i64,
    pub level: i32,
}

pub async fn leaderboard(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let users = state.users.leaderboard(limit).await?;

    Ok(Json(
        users
            .into_iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                rank: i + 1,
                username: user.username,
                points: user.points,
                level: user.level,
            })
            .collect(),
    ))
}
