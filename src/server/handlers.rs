//! HTTP 处理函数
//!
//! 只做请求解析和响应封装，分析工作全部委托给 `ContractAnalyzer`。

use axum::extract::{Multipart, State};
use axum::http::header::{self, HeaderName};
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::stream::{self, Stream};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisEvent, AnalysisResult, AskRequest, AskResponse};
use crate::orchestrator::ContractAnalyzer;
use crate::server::upload::read_upload;
use crate::utils::logging::log_upload;

/// 分析任务与响应流之间的事件缓冲
const EVENT_BUFFER: usize = 32;

const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

pub type SharedAnalyzer = Arc<ContractAnalyzer>;

/// `POST /api/analyze`
pub async fn analyze(
    State(analyzer): State<SharedAnalyzer>,
    multipart: Multipart,
) -> AppResult<Json<AnalysisResult>> {
    let upload = read_upload(multipart).await?;
    log_upload("/api/analyze", &upload.filename, upload.bytes.len());

    let result = analyzer.analyze(upload.bytes).await?;
    Ok(Json(result))
}

/// `POST /api/analyze-stream`
///
/// 提取和切分在响应开始前完成，失败时返回普通错误响应；
/// 之后的进度以 SSE 事件推送，客户端断开时后台任务随之停止。
pub async fn analyze_stream(
    State(analyzer): State<SharedAnalyzer>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let upload = read_upload(multipart).await?;
    log_upload("/api/analyze-stream", &upload.filename, upload.bytes.len());

    let prepared = analyzer.prepare(upload.bytes).await?;

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let worker = Arc::clone(&analyzer);
    tokio::spawn(async move {
        match worker.stream_prepared(prepared, tx).await {
            Ok(result) => info!("📤 流式分析结束: {} 条条款", result.total_clauses),
            Err(AppError::StreamClosed) => warn!("⚠️ 客户端已断开，停止分析"),
            Err(e) => error!("❌ 流式分析失败: {}", e),
        }
    });

    let headers = [
        (header::CACHE_CONTROL, "no-cache"),
        (X_ACCEL_BUFFERING, "no"),
    ];
    Ok((headers, Sse::new(event_stream(rx))))
}

/// 把事件通道转成 SSE 流，通道关闭即结束
fn event_stream(
    rx: mpsc::Receiver<AnalysisEvent>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((Event::default().json_data(&event), rx))
    })
}

/// `POST /api/ask`
pub async fn ask(
    State(analyzer): State<SharedAnalyzer>,
    Json(request): Json<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let response = analyzer.answer(&request).await?;
    Ok(Json(response))
}

/// `GET /api/health`
pub async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}
