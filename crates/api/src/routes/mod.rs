pub mod auth;
pub mod challenge;
pub mod history;
pub mod leaderboard;
pub mod practice;
pub mod profile;

use std::path::PathBuf;

use axum::extract::Multipart;
use tempfile::TempDir;

use crate::error::ApiError;
use crate::state::AppState;
use pronuncia_assessment::level_for;

/// Uploaded clip written to a scratch dir. The dir is removed when this
/// is dropped, so callers keep it alive until the assessment finishes.
pub(crate) struct AudioUpload {
    _dir: TempDir,
    pub path: PathBuf,
}

/// Pulls the `audio` file and optional `text` field out of a multipart
/// body. Unknown fields are ignored.
pub(crate) async fn collect_upload(
    multipart: &mut Multipart,
) -> Result<(Option<AudioUpload>, Option<String>), ApiError> {
    let mut audio = None;
    let mut text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("audio") => {
                let extension = field
                    .file_name()
                    .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
                    .unwrap_or_else(|| "bin".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
                if bytes.is_empty() {
                    return Err(ApiError::BadRequest("Uploaded audio is empty".to_string()));
                }
                let dir = TempDir::new().map_err(|e| ApiError::Internal(e.to_string()))?;
                let path = dir.path().join(format!("upload.{extension}"));
                tokio::fs::write(&path, &bytes)
                    .await
                    .map_err(|e| ApiError::Internal(e.to_string()))?;
                audio = Some(AudioUpload { _dir: dir, path });
            }
            Some("text") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read text: {e}")))?;
                text = Some(value);
            }
            _ => {}
        }
    }

    Ok((audio, text))
}

/// Credits earned points to the user and refreshes the stored level.
/// Returns the new lifetime total and level.
pub(crate) async fn apply_points(
    state: &AppState,
    user_id: bson::oid::ObjectId,
    earned: i64,
) -> Result<(i64, i32), ApiError> {
    let total = state.users.increment_points(user_id, earned).await?;
    let level = level_for(total);
    state.users.set_level(user_id, level).await?;
    Ok((total, level))
}
