use axum::{Json, extract::State};
use serde::Serialize;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub points: i64,
    pub level: i32,
    pub total_sessions: u64,
    pub best_accuracy: f64,
    pub practice_days: u64,
    /// Distinct days practiced, capped at 30 for display.
    pub streak: u64,
    pub challenges_won: ChallengesWon,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct ChallengesWon {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

const MAX_STREAK: u64 = 30;

fn streak_from_days(practice_days: u64) -> u64 {
    practice_days.min(MAX_STREAK)
}

pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;
    let stats = state.attempts.practice_stats(auth.user_id).await?;
    let won = state.completions.won_counts(auth.user_id).await?;

    Ok(Json(ProfileResponse {
        username: user.username,
        points: user.points,
        level: user.level,
        total_sessions: stats.total_sessions,
        best_accuracy: stats.best_accuracy,
        practice_days: stats.practice_days,
        streak: streak_from_days(stats.practice_days),
        challenges_won: ChallengesWon {
            easy: won.easy,
            medium: won.medium,
            hard: won.hard,
        },
        created_at: user.created_at.try_to_rfc3339_string().unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_caps_at_thirty_days() {
        assert_eq!(streak_from_days(0), 0);
        assert_eq!(streak_from_days(12), 12);
        assert_eq!(streak_from_days(30), 30);
        assert_eq!(streak_from_days(365), 30);
    }
}
