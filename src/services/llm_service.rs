//! LLM 服务 - 业务能力层
//!
//! 只负责"LLM 解释/摘要/问答"能力，不关心流程。
//! 所有失败都在这里被吸收：对外只返回文本，出错时返回固定句子。

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{AskClause, ClauseType};
use crate::services::language_model::{LanguageModel, OpenAiChat};
use crate::services::prompts;

/// 无法解释条款时返回的固定句子
pub const CANNOT_EXPLAIN: &str = "I cannot explain it.";
/// 合同中找不到答案时返回的固定句子
pub const CANNOT_ANSWER: &str =
    "I cannot answer that, there is no information about it in the contract.";

/// LLM 服务
///
/// 职责：
/// - 构造提示词并调用模型
/// - 把模型的拒绝、空回复和调用失败统一成固定句子
/// - 不出现 clause_id 的分配
/// - 不关心事件顺序
pub struct LlmService {
    model: Arc<dyn LanguageModel>,
    explain_temperature: f32,
    answer_temperature: f32,
}

impl LlmService {
    /// 使用 OpenAI 兼容接口创建服务
    pub fn new(config: &Config) -> Self {
        Self::with_model(Arc::new(OpenAiChat::new(config)), config)
    }

    /// 使用指定模型创建服务
    pub fn with_model(model: Arc<dyn LanguageModel>, config: &Config) -> Self {
        Self {
            model,
            explain_temperature: config.explain_temperature,
            answer_temperature: config.answer_temperature,
        }
    }

    /// 通俗解释单个条款
    ///
    /// 永不失败：模型拒绝、返回空内容或调用出错时返回 [`CANNOT_EXPLAIN`]。
    pub async fn explain_clause(&self, clause_text: &str, clause_type: ClauseType) -> String {
        let prompt = prompts::explain_prompt(clause_text, clause_type);
        let reply = self.model.complete(&prompt, self.explain_temperature).await;
        normalize_explanation(self.log_failure("条款解释", reply))
    }

    /// 合同摘要
    ///
    /// 永不失败：无法生成时返回空字符串。
    pub async fn summarize(&self, full_text: &str) -> String {
        let prompt = prompts::summary_prompt(full_text);
        let reply = self.model.complete(&prompt, self.explain_temperature).await;
        normalize_summary(self.log_failure("合同摘要", reply))
    }

    /// 仅根据摘要和条款回答问题
    ///
    /// 永不失败：找不到依据或调用出错时返回 [`CANNOT_ANSWER`]。
    pub async fn answer_question(
        &self,
        contract_summary: &str,
        clauses: &[AskClause],
        question: &str,
    ) -> String {
        let context = prompts::answer_context(contract_summary, clauses);
        debug!(
            "问答上下文: {} 条条款，{} 字符",
            clauses.len(),
            context.chars().count()
        );
        let prompt = prompts::answer_prompt(&context, question);
        let reply = self.model.complete(&prompt, self.answer_temperature).await;
        normalize_answer(self.log_failure("问答", reply))
    }

    fn log_failure(&self, task: &str, reply: Result<String>) -> Option<String> {
        match reply {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("⚠️ {}失败 (模型: {}): {:#}", task, self.model.model_name(), e);
                None
            }
        }
    }
}

// ========== 回复归一化 ==========

fn normalize_explanation(reply: Option<String>) -> String {
    match reply.map(|content| content.trim().to_string()) {
        Some(content) if !content.is_empty() && !is_explain_refusal(&content) => content,
        _ => CANNOT_EXPLAIN.to_string(),
    }
}

fn normalize_summary(reply: Option<String>) -> String {
    match reply.map(|content| content.trim().to_string()) {
        Some(content) if !is_explain_refusal(&content) => content,
        _ => String::new(),
    }
}

fn normalize_answer(reply: Option<String>) -> String {
    match reply.map(|content| content.trim().to_string()) {
        Some(content) if !content.is_empty() && !is_answer_refusal(&content) => content,
        _ => CANNOT_ANSWER.to_string(),
    }
}

fn is_explain_refusal(content: &str) -> bool {
    content.to_lowercase().contains("i cannot explain it")
}

fn is_answer_refusal(content: &str) -> bool {
    let lower = content.to_lowercase();
    lower.contains("i cannot answer that") && lower.contains("no information about it in the contract")
}
