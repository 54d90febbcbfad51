use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blueprint_core::error::BlueprintError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequest(msg.into()).into())
    }
}

/// Carries an explicit 400 through the `anyhow::Error` chain.
#[derive(Debug)]
struct BadRequest(String);

impl std::fmt::Display for BadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequest {}

fn status_for(e: &BlueprintError) -> StatusCode {
    match e {
        BlueprintError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
        BlueprintError::NotInitialized
        | BlueprintError::InvalidProjectId(_)
        | BlueprintError::InvalidStage(_)
        | BlueprintError::InvalidPhase(_)
        | BlueprintError::InvalidStatus(_)
        | BlueprintError::InvalidOrdering(_)
        | BlueprintError::EmptyName
        | BlueprintError::SequenceViolation { .. }
        | BlueprintError::NotReady
        | BlueprintError::InvalidAnswer { .. }
        | BlueprintError::InvalidBlueprint(_) => StatusCode::BAD_REQUEST,
        BlueprintError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BlueprintError::Io(_) | BlueprintError::Yaml(_) | BlueprintError::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.downcast_ref::<BadRequest>().is_some() {
            StatusCode::BAD_REQUEST
        } else if let Some(e) = self.0.downcast_ref::<BlueprintError>() {
            status_for(e)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
