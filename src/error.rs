//! 错误类型
//!
//! `AppError` 只覆盖请求处理中会返回给调用方的错误：输入错误（客户端问题）和提取错误（服务端问题）。
//! `LlmError` 经 `anyhow` 传到服务层后被替换成固定句子；`ConfigError` 只在启动时出现，由 `main` 直接返回。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 上传内容或请求参数不合法
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 文档无法读取或解析
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 事件接收端已关闭（客户端断开）
    #[error("事件流已关闭")]
    StreamClosed,
}

/// 输入错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 文件名不是 .pdf
    #[error("File must be a PDF.")]
    NotPdf,
    /// 文件为空
    #[error("File is empty.")]
    EmptyFile,
    /// 读取上传内容失败
    #[error("Could not read file: {reason}")]
    UnreadableUpload { reason: String },
    /// 缺少必需的表单字段
    #[error("Missing form field: {field}")]
    MissingField { field: String },
    /// 问题为空
    #[error("Question must not be empty.")]
    EmptyQuestion,
}

/// 文档提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 写入临时文件失败
    #[error("无法写入临时文件: {source}")]
    TempFileFailed {
        #[source]
        source: std::io::Error,
    },
    /// PDF 解析失败
    #[error("PDF 解析失败 ({path}): {reason}")]
    PdfParseFailed { path: String, reason: String },
    /// 后台任务执行失败
    #[error("后台任务执行失败: {reason}")]
    WorkerFailed { reason: String },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {reason}")]
    ApiCallFailed { model: String, reason: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 PDF 解析错误
    pub fn pdf_parse_failed(path: impl Into<String>, reason: impl ToString) -> Self {
        AppError::Extraction(ExtractionError::PdfParseFailed {
            path: path.into(),
            reason: reason.to_string(),
        })
    }

    /// 创建后台任务错误
    pub fn worker_failed(reason: impl ToString) -> Self {
        AppError::Extraction(ExtractionError::WorkerFailed {
            reason: reason.to_string(),
        })
    }

    /// 是否属于客户端问题
    pub fn is_client_fault(&self) -> bool {
        matches!(self, AppError::Input(_))
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        if self.is_client_fault() {
            400
        } else {
            500
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
