//! PDF 文本提取 - 基础设施层
//!
//! 只暴露"给路径，拿文本"的能力，不认识条款。

use std::path::Path;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 文本提取能力
///
/// 实现是同步阻塞的，调用方负责放到阻塞线程池里执行。
pub trait TextExtractor: Send + Sync {
    /// 读取文档并返回全文（各页之间以换行分隔）
    fn extract(&self, path: &Path) -> AppResult<String>;
}

/// 基于 `pdf-extract` 的提取器
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> AppResult<String> {
        let pages = pdf_extract::extract_text_by_pages(path)
            .map_err(|e| AppError::pdf_parse_failed(path.display().to_string(), e))?;
        debug!("PDF 共 {} 页: {}", pages.len(), path.display());
        Ok(join_pages(&pages))
    }
}

/// 每页文本后追加一个换行
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages.iter().fold(String::new(), |mut text, page| {
        text.push_str(page.as_ref());
        text.push('\n');
        text
    })
}
