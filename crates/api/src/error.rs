use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pronuncia_assessment::AssessmentError;
use pronuncia_services::auth::AuthError;
use pronuncia_services::dao::base::DaoError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    Validation(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            ApiError::Validation(msg) => write!(f, "Validation: {msg}"),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
            ApiError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DaoError> for ApiError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DaoError::DuplicateKey(msg) => ApiError::Conflict(msg),
            DaoError::Validation(msg) => ApiError::Validation(msg),
            DaoError::Mongo(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonSer(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonDe(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken => ApiError::Unauthorized("Invalid token".to_string()),
            AuthError::Hash(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::EngineUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            AssessmentError::AudioConversion(msg) => ApiError::BadRequest(msg),
            AssessmentError::EmptyTranscript => {
                ApiError::BadRequest("No speech recognized in the audio".to_string())
            }
            AssessmentError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AssessmentError::Transcription(msg) => ApiError::Internal(msg),
            AssessmentError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dao_not_found_maps_to_404() {
        let err: ApiError = DaoError::NotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn dao_duplicate_maps_to_conflict() {
        let err: ApiError = DaoError::DuplicateKey("username".to_string()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn auth_errors_map_to_unauthorized() {
        for source in [
            AuthError::InvalidCredentials,
            AuthError::TokenExpired,
            AuthError::InvalidToken,
        ] {
            let err: ApiError = source.into();
            assert!(matches!(err, ApiError::Unauthorized(_)));
        }
    }

    #[test]
    fn engine_unavailable_maps_to_503() {
        let err: ApiError = AssessmentError::EngineUnavailable("ffmpeg".to_string()).into();
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn assessment_input_errors_map_to_400() {
        for source in [
            AssessmentError::AudioConversion("bad clip".to_string()),
            AssessmentError::EmptyTranscript,
            AssessmentError::InvalidInput("empty text".to_string()),
        ] {
            let err: ApiError = source.into();
            assert!(matches!(err, ApiError::BadRequest(_)));
        }
    }
}
