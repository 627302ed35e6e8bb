use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use nd_core::Error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable(String),
    Pipeline(Error),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Pipeline(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Self::Pipeline(e) => {
                let status = match &e {
                    Error::Parse(_) | Error::Inference(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
                    Error::InvalidInput(_) | Error::Config(_) => StatusCode::BAD_REQUEST,
                    Error::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                error!("Request failed: {}", e);
                (status, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: ApiError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_pipeline_error_status() {
        assert_eq!(status(Error::InvalidInput("days_back".into()).into()), StatusCode::BAD_REQUEST);
        assert_eq!(status(Error::Config("missing key".into()).into()), StatusCode::BAD_REQUEST);
        assert_eq!(status(Error::Parse("no json".into()).into()), StatusCode::BAD_GATEWAY);
        assert_eq!(status(Error::NotImplemented("TikTok".into()).into()), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(status(Error::Render("template".into()).into()), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
