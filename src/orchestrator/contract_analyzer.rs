//! 单份合同分析器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责一份上传合同的完整分析，是合同级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **准备**：写临时文件 → 提取文本 → 切分条款（阻塞线程池中执行）
//! 2. **摘要**：整份合同一次 LLM 调用
//! 3. **逐条处理**：按顺序编号，委托 `ClauseFlow`
//! 4. **事件**：流式模式下按固定顺序发送进度事件
//! 5. **问答**：基于已有分析结果回答问题
//!
//! 准备阶段的失败会直接返回错误；之后的 LLM 失败已在服务层被替换成固定句子。

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::{TempDocument, TextExtractor};
use crate::models::{AnalysisEvent, AnalysisResult, AskRequest, AskResponse};
use crate::parser::{segment_with_strategy, Strategy};
use crate::services::LlmService;
use crate::utils::logging::truncate_text;
use crate::workflow::{ClauseCtx, ClauseFlow, EventSink};

/// 已完成提取和切分、尚未调用 LLM 的合同
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedContract {
    /// 提取出的全文
    pub text: String,
    /// 切分后的条款原文（按文档顺序）
    pub clauses: Vec<String>,
    /// 实际生效的切分策略
    pub strategy: Strategy,
}

/// 合同分析器
///
/// 在所有请求之间共享，本身不保存任何请求状态。
pub struct ContractAnalyzer {
    extractor: Arc<dyn TextExtractor>,
    llm_service: Arc<LlmService>,
    clause_flow: ClauseFlow,
}

impl ContractAnalyzer {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        llm_service: Arc<LlmService>,
        verbose_logging: bool,
    ) -> Self {
        let clause_flow = ClauseFlow::new(Arc::clone(&llm_service), verbose_logging);
        Self {
            extractor,
            llm_service,
            clause_flow,
        }
    }

    /// 提取文本并切分条款
    ///
    /// 临时文件在提取结束后立即删除，无论提取成功与否。
    pub async fn prepare(&self, bytes: Vec<u8>) -> AppResult<PreparedContract> {
        let extractor = Arc::clone(&self.extractor);

        let prepared = tokio::task::spawn_blocking(move || -> AppResult<PreparedContract> {
            let document = TempDocument::write(&bytes)?;
            let extracted = extractor.extract(document.path());
            document.close();

            let text = extracted?;
            let segmentation = segment_with_strategy(&text);
            Ok(PreparedContract {
                text,
                clauses: segmentation.clauses,
                strategy: segmentation.strategy,
            })
        })
        .await
        .map_err(AppError::worker_failed)??;

        info!(
            "📄 文本提取完成: {} 字符，策略 {} 切分出 {} 条条款",
            prepared.text.chars().count(),
            prepared.strategy,
            prepared.clauses.len()
        );
        Ok(prepared)
    }

    /// 完整分析（非流式）
    pub async fn analyze(&self, bytes: Vec<u8>) -> AppResult<AnalysisResult> {
        let prepared = self.prepare(bytes).await?;
        self.run(prepared, &EventSink::discard()).await
    }

    /// 分析已准备好的合同，并把进度事件送进通道
    ///
    /// 接收端关闭时提前结束并返回 [`AppError::StreamClosed`]。
    pub async fn stream_prepared(
        &self,
        prepared: PreparedContract,
        tx: mpsc::Sender<AnalysisEvent>,
    ) -> AppResult<AnalysisResult> {
        self.run(prepared, &EventSink::channel(tx)).await
    }

    /// 基于已有分析结果回答问题
    pub async fn answer(&self, request: &AskRequest) -> AppResult<AskResponse> {
        let question = request.validated_question()?;
        info!("❓ 收到问题: {}", truncate_text(question, 80));

        let answer = self
            .llm_service
            .answer_question(&request.contract_summary, &request.clauses, question)
            .await;
        debug!("回答: {}", truncate_text(&answer, 80));

        Ok(AskResponse { answer })
    }

    async fn run(&self, prepared: PreparedContract, sink: &EventSink) -> AppResult<AnalysisResult> {
        let total = prepared.clauses.len();
        if total == 0 {
            warn!("⚠️ 未切分出任何条款");
        }

        sink.emit(AnalysisEvent::Start {
            total_clauses: total,
        })
        .await?;

        // ========== 合同摘要 ==========
        sink.emit(AnalysisEvent::SummaryStart).await?;
        let summary = self.llm_service.summarize(&prepared.text).await;
        if summary.is_empty() {
            warn!("⚠️ 合同摘要为空");
        } else {
            info!("📝 合同摘要完成");
        }
        sink.emit(AnalysisEvent::Summary {
            summary: summary.clone(),
        })
        .await?;

        // ========== 逐条处理 ==========
        let mut clauses = Vec::with_capacity(total);
        for (index, text) in prepared.clauses.iter().enumerate() {
            let ctx = ClauseCtx::new(index + 1, total);
            let clause = self.clause_flow.run(text, &ctx, sink).await?;
            clauses.push(clause);
        }

        sink.emit(AnalysisEvent::Complete).await?;
        info!("✅ 分析完成: 共 {} 条条款", total);

        Ok(AnalysisResult::new(summary, clauses))
    }
}
