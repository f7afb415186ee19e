//! HTTP 接口层
//!
//! | 方法 | 路径 | 说明 |
//! |------|------|------|
//! | POST | `/api/analyze` | 上传 PDF，返回完整分析结果 |
//! | POST | `/api/analyze-stream` | 上传 PDF，以 SSE 推送分析进度 |
//! | POST | `/api/ask` | 基于分析结果提问 |
//! | GET | `/api/health` | 健康检查 |

pub mod handlers;
pub mod response;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::orchestrator::ContractAnalyzer;

pub use handlers::SharedAnalyzer;
pub use upload::{Upload, FILE_FIELD};

/// 构建路由
pub fn router(analyzer: Arc<ContractAnalyzer>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/analyze-stream", post(handlers::analyze_stream))
        .route("/api/ask", post(handlers::ask))
        .route("/api/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(analyzer)
}
