use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

/// Uniform response envelope: payload plus request metadata.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: Some(data),
            meta: meta(StatusCode::OK, "success", None),
        }),
    )
}

/// Acknowledgement for mutations with nothing useful to return.
pub fn ok_message(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: None,
            meta: meta(StatusCode::OK, "success", Some(message.to_string())),
        }),
    )
}

pub fn error<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            data: None,
            meta: meta(status, "error", Some(message)),
        }),
    )
}

fn meta(status_code: StatusCode, status: &str, message: Option<String>) -> ResponseMeta {
    ResponseMeta {
        status: status.to_string(),
        status_code: status_code.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        message,
    }
}
