use serde::{Deserialize, Serialize};

use super::clause::Clause;
use crate::error::{AppResult, InputError};

/// 合同问答请求：分析结果 + 问题
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub contract_summary: String,
    #[serde(default)]
    pub clauses: Vec<AskClause>,
}

/// 问答上下文中的一条条款
///
/// `clause_type` 按客户端提交的原样保留，不映射到分类标签。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskClause {
    pub clause_id: usize,
    pub clause_type: String,
    pub original_text: String,
    pub explanation: String,
}

impl From<Clause> for AskClause {
    fn from(clause: Clause) -> Self {
        Self {
            clause_id: clause.clause_id,
            clause_type: clause.clause_type.label().to_string(),
            original_text: clause.original_text,
            explanation: clause.explanation,
        }
    }
}

impl AskRequest {
    /// 返回去除空白后的问题；为空时报输入错误
    pub fn validated_question(&self) -> AppResult<&str> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(InputError::EmptyQuestion.into());
        }
        Ok(question)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskResponse {
    pub answer: String,
}
