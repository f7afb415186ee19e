use serde::{Deserialize, Serialize};

use super::clause_type::ClauseType;

/// 单个条款的分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clause {
    /// 条款编号（从1开始，按切分顺序）
    pub clause_id: usize,
    pub clause_type: ClauseType,
    /// 原文（已去除首尾空白）
    pub original_text: String,
    /// 通俗解释，或固定的拒绝句
    pub explanation: String,
}

/// 整份合同的分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub contract_summary: String,
    pub total_clauses: usize,
    pub clauses: Vec<Clause>,
}

impl AnalysisResult {
    pub fn new(contract_summary: String, clauses: Vec<Clause>) -> Self {
        Self {
            contract_summary,
            total_clauses: clauses.len(),
            clauses,
        }
    }
}
