//! 错误到 HTTP 响应的映射
//!
//! 响应体统一为 `{"detail": "..."}`。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;

impl AppError {
    /// 返回给客户端的错误说明
    pub fn detail(&self) -> String {
        match self {
            AppError::Input(e) => e.to_string(),
            other => format!("Analysis failed: {}", other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_client_error() {
            warn!("⚠️ 请求被拒绝: {}", self);
        } else {
            error!("❌ 请求失败: {}", self);
        }

        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
