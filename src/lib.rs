//! # Contract Analyzer
//!
//! 上传合同 PDF，切分条款、按关键词分类，并用 LLM 生成通俗解释、合同摘要和问答
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构，外加两个无状态模块：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有临时文件，只暴露能力
//! - `TempDocument` - 上传内容的临时文件，作用域结束即删除
//! - `PdfExtractor` - PDF → 文本
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个条款或单个问题
//! - `LanguageModel` - 模型接缝，`OpenAiChat` 为默认实现
//! - `LlmService` - 解释 / 摘要 / 问答能力，失败时返回固定句子
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条条款"的完整处理流程
//! - `ClauseCtx` - 上下文封装（clause_id + total）
//! - `ClauseFlow` - 流程编排（classify → clause_start → explain → clause）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/contract_analyzer` - 单份合同的分析与事件顺序
//! - `orchestrator/app` - 应用生命周期与 HTTP 服务
//!
//! ### 纯函数与接口
//! - `parser/` - 条款边界判断、切分级联、关键词分类
//! - `server/` - axum 路由、上传校验、错误响应
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod server;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisEvent, AnalysisResult, AskRequest, AskResponse, Clause, ClauseType};
pub use orchestrator::{App, ContractAnalyzer, PreparedContract};
pub use parser::{classify, is_clause_boundary, segment};
pub use services::{LanguageModel, LlmService, CANNOT_ANSWER, CANNOT_EXPLAIN};
