//! 条款处理流程 - 流程层
//!
//! 核心职责：定义"一条条款"的完整处理流程
//!
//! 流程顺序：
//! 1. 关键词分类
//! 2. 发送 clause_start
//! 3. LLM 解释
//! 4. 发送 clause

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{AnalysisEvent, Clause};
use crate::parser::classify;
use crate::services::{LlmService, CANNOT_EXPLAIN};
use crate::utils::logging::truncate_text;
use crate::workflow::clause_ctx::ClauseCtx;
use crate::workflow::event_sink::EventSink;

/// 条款处理流程
///
/// - 编排单条条款的分类与解释
/// - 不分配编号（编号来自上下文）
/// - 只依赖业务能力（services）
pub struct ClauseFlow {
    llm_service: Arc<LlmService>,
    verbose_logging: bool,
}

impl ClauseFlow {
    pub fn new(llm_service: Arc<LlmService>, verbose_logging: bool) -> Self {
        Self {
            llm_service,
            verbose_logging,
        }
    }

    pub async fn run(&self, text: &str, ctx: &ClauseCtx, sink: &EventSink) -> AppResult<Clause> {
        let original_text = text.trim().to_string();

        // ========== 步骤 1: 分类 ==========
        let clause_type = classify(&original_text);
        info!("{} 🏷️ 类型: {}", ctx, clause_type);
        if self.verbose_logging {
            debug!("{} 原文: {}", ctx, truncate_text(&original_text, 80));
        }

        sink.emit(AnalysisEvent::ClauseStart {
            clause_id: ctx.clause_id,
            clause_type,
        })
        .await?;

        // ========== 步骤 2: 解释 ==========
        let explanation = self
            .llm_service
            .explain_clause(&original_text, clause_type)
            .await;
        if explanation == CANNOT_EXPLAIN {
            info!("{} ⚠️ 无法解释", ctx);
        } else {
            info!("{} ✓ 解释完成", ctx);
        }

        let clause = Clause {
            clause_id: ctx.clause_id,
            clause_type,
            original_text,
            explanation,
        };

        sink.emit(AnalysisEvent::Clause {
            clause: clause.clone(),
        })
        .await?;

        Ok(clause)
    }
}
