use axum::http::StatusCode;
use axum::response::IntoResponse;
use crate::helpers::api_error::error_response;

pub async fn page_not_found_handler() -> impl IntoResponse {
    error_response(StatusCode::NOT_FOUND, "Resource not found")
}
