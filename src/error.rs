use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("No active profile selected")]
    NoActiveProfile,

    #[error("Profile limit reached: at most {0} profiles per account")]
    ProfileLimitReached(usize),

    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("No player is open")]
    NoActivePlayer,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidCredentials | AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::ProfileNotFound(_) | AppError::ContentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NoActiveProfile
            | AppError::ProfileLimitReached(_)
            | AppError::NoActivePlayer => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::ProfileNotFound("p-9".to_string()), StatusCode::NOT_FOUND),
            (AppError::NoActiveProfile, StatusCode::CONFLICT),
            (AppError::InvalidInput("nan".to_string()), StatusCode::BAD_REQUEST),
            (AppError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AppError::ProfileNotFound("profile-7".to_string()).to_string(),
            "Profile not found: profile-7"
        );
        assert_eq!(
            AppError::ProfileLimitReached(5).to_string(),
            "Profile limit reached: at most 5 profiles per account"
        );
    }
}
