//! 条款处理上下文
//!
//! 封装"我正在处理第几条、一共几条"这一信息

use std::fmt::Display;

/// 条款处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseCtx {
    /// 条款编号（从1开始）
    pub clause_id: usize,

    /// 条款总数（仅用于日志显示）
    pub total: usize,
}

impl ClauseCtx {
    pub fn new(clause_id: usize, total: usize) -> Self {
        Self { clause_id, total }
    }
}

impl Display for ClauseCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[条款 {}/{}]", self.clause_id, self.total)
    }
}
