/// Request body extraction
///
/// Axum's stock `Json` extractor answers malformed bodies (invalid JSON,
/// type mismatches, wrong content-type) with plain-text rejections. Every
/// error this service emits carries the `{"success": false, "message"}`
/// envelope, so handlers use this wrapper instead: it delegates parsing to
/// `axum::Json` and converts the rejection into an [`ApiError`].

use crate::error::ApiError;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON extractor whose rejection keeps the shared error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
