use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub type ProfileResult<T, E = ProfileError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Path `{0}` is required.")]
    MissingField(&'static str),

    /// The request body could not be read, with the status the extractor chose.
    #[error("{1}")]
    InvalidBody(StatusCode, String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ProfileError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::InvalidBody(status, _) => *status,
            // Presence checks belong to the storage schema, so a missing
            // required field surfaces the same way a storage fault does.
            Self::MissingField(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Serialize)]
struct JsonMessage {
    message: String,
}

#[derive(serde::Serialize)]
struct JsonError {
    error: String,
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::ProfileNotFound => (
                status,
                Json(JsonMessage {
                    message: self.to_string(),
                }),
            )
                .into_response(),
            Self::InvalidBody(..) => (
                status,
                Json(JsonError {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            ref e => {
                tracing::error!("request failed: {:?}", e);
                (
                    status,
                    Json(JsonError {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
