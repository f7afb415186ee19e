//! 上传文档的临时文件
//!
//! 写入后交给提取器读取，值被丢弃时文件随之删除（无论成功、失败还是 panic）。

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{AppResult, ExtractionError};

/// 作用域内有效的临时 PDF 文件
pub struct TempDocument {
    file: NamedTempFile,
}

impl TempDocument {
    /// 把上传内容写入新的临时文件
    pub fn write(bytes: &[u8]) -> AppResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("contract-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|source| ExtractionError::TempFileFailed { source })?;

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|source| ExtractionError::TempFileFailed { source })?;

        debug!("临时文件已创建: {} ({} 字节)", file.path().display(), bytes.len());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// 显式删除，失败时记录警告
    pub fn close(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!("临时文件已删除: {}", path.display()),
            Err(e) => warn!("⚠️ 临时文件删除失败 {}: {}", path.display(), e),
        }
    }
}
