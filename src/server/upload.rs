//! 上传文件的读取与校验

use axum::extract::Multipart;

use crate::error::{AppResult, InputError};

/// 表单中承载合同文件的字段名
pub const FILE_FIELD: &str = "file";

/// 通过校验的上传文件
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// 读取 `file` 字段并校验
///
/// 先检查文件名再读取内容；其余字段忽略。
pub async fn read_upload(mut multipart: Multipart) -> AppResult<Upload> {
    while let Some(field) = multipart.next_field().await.map_err(unreadable)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = check_filename(field.file_name())?.to_string();
        let bytes = field.bytes().await.map_err(unreadable)?;
        check_contents(&bytes)?;

        return Ok(Upload {
            filename,
            bytes: bytes.to_vec(),
        });
    }

    Err(InputError::MissingField {
        field: FILE_FIELD.to_string(),
    }
    .into())
}

/// 文件名必须存在且以 `.pdf` 结尾（不区分大小写）
pub fn check_filename(filename: Option<&str>) -> AppResult<&str> {
    match filename {
        Some(name) if name.to_lowercase().ends_with(".pdf") => Ok(name),
        _ => Err(InputError::NotPdf.into()),
    }
}

pub fn check_contents(bytes: &[u8]) -> AppResult<()> {
    if bytes.is_empty() {
        return Err(InputError::EmptyFile.into());
    }
    Ok(())
}

fn unreadable(e: impl ToString) -> InputError {
    InputError::UnreadableUpload {
        reason: e.to_string(),
    }
}
