use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use super::response::ApiError;

/// `Json` extractor whose rejections carry the same `{"detail": ...}` body as
/// every other API error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
