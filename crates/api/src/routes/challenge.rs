use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::ApiError,
    extractors::auth::AuthUser,
    routes::{apply_points, collect_upload},
    state::AppState,
};
use pronuncia_assessment::RewardMode;
use pronuncia_db::models::{Challenge, Difficulty};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    pub id: String,
    pub word: String,
    pub difficulty: String,
    pub points: i64,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ChallengePracticeResponse {
    pub word: String,
    pub transcript: String,
    pub accuracy: f64,
    pub points_earned: i64,
    pub total_points: i64,
    pub level: i32,
}

fn to_response(challenge: Challenge, completed_ids: &[ObjectId]) -> ChallengeResponse {
    let completed = challenge
        .id
        .map(|id| completed_ids.contains(&id))
        .unwrap_or(false);
    ChallengeResponse {
        id: challenge.id.map(|id| id.to_hex()).unwrap_or_default(),
        word: challenge.word,
        difficulty: challenge.difficulty.as_str().to_string(),
        points: challenge.points,
        description: challenge.description,
        completed,
    }
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ChallengeResponse>>, ApiError> {
    let challenges = match params.difficulty {
        Some(raw) => {
            let difficulty: Difficulty = raw
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("Unknown difficulty '{raw}'")))?;
            state.challenges.list_by_difficulty(difficulty).await?
        }
        None => {
            let mut all = Vec::new();
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                all.extend(state.challenges.list_by_difficulty(difficulty).await?);
            }
            all
        }
    };
    let completed_ids = state.completions.completed_ids(auth.user_id).await?;

    Ok(Json(
        challenges
            .into_iter()
            .map(|c| to_response(c, &completed_ids))
            .collect(),
    ))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(challenge_id): Path<String>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let id = ObjectId::parse_str(&challenge_id)
        .map_err(|_| ApiError::BadRequest("Invalid challenge id".to_string()))?;
    let challenge = state.challenges.find_by_id(id).await?;
    let completed_ids = state.completions.completed_ids(auth.user_id).await?;
    Ok(Json(to_response(challenge, &completed_ids)))
}

/// Challenge practice: the target word comes from the challenge itself,
/// the caller only uploads the clip.
pub async fn practice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(challenge_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ChallengePracticeResponse>, ApiError> {
    let id = ObjectId::parse_str(&challenge_id)
        .map_err(|_| ApiError::BadRequest("Invalid challenge id".to_string()))?;
    let challenge = state.challenges.find_by_id(id).await?;

    let (audio, _) = collect_upload(&mut multipart).await?;
    let audio =
        audio.ok_or_else(|| ApiError::BadRequest("Missing 'audio' field".to_string()))?;

    let assessment = state
        .engine
        .assess(
            &audio.path,
            &challenge.word,
            RewardMode::Challenge {
                base_points: challenge.points,
            },
        )
        .await?;

    state
        .attempts
        .record(
            auth.user_id,
            Some(id),
            challenge.word.clone(),
            assessment.transcript.clone(),
            assessment.accuracy,
            assessment.points_earned,
        )
        .await?;
    state
        .completions
        .record_best(auth.user_id, id, assessment.accuracy, assessment.points_earned)
        .await?;
    let (total_points, level) = apply_points(&state, auth.user_id, assessment.points_earned).await?;

    info!(
        user = %auth.username,
        word = %challenge.word,
        accuracy = assessment.accuracy,
        points = assessment.points_earned,
        "Challenge practice scored"
    );

    Ok(Json(ChallengePracticeResponse {
        word: challenge.word,
        transcript: assessment.transcript,
        accuracy: assessment.accuracy,
        points_earned: assessment.points_earned,
        total_points,
        level,
    }))
}
