//! 流式分析事件
//!
//! 顺序固定：start → summary_start → summary → (clause_start → clause)* → complete

use serde::Serialize;

use super::clause::Clause;
use super::clause_type::ClauseType;

/// 分析进度事件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Start {
        total_clauses: usize,
    },
    SummaryStart,
    Summary {
        summary: String,
    },
    ClauseStart {
        clause_id: usize,
        clause_type: ClauseType,
    },
    Clause {
        #[serde(flatten)]
        clause: Clause,
    },
    Complete,
}

impl AnalysisEvent {
    /// 事件标签（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisEvent::Start { .. } => "start",
            AnalysisEvent::SummaryStart => "summary_start",
            AnalysisEvent::Summary { .. } => "summary",
            AnalysisEvent::ClauseStart { .. } => "clause_start",
            AnalysisEvent::Clause { .. } => "clause",
            AnalysisEvent::Complete => "complete",
        }
    }
}
