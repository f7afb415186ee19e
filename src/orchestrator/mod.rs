//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责请求级别的流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 组装各层对象
//! - 绑定端口、启动 HTTP 服务
//!
//! ### `contract_analyzer` - 单份合同分析器
//! - 提取文本、切分条款（阻塞线程池）
//! - 生成摘要、逐条调度 `ClauseFlow`
//! - 按固定顺序发送进度事件
//! - 问答
//!
//! ## 层次关系
//!
//! ```text
//! app (HTTP 服务)
//!     ↓
//! contract_analyzer (处理 Vec<String> 条款)
//!     ↓
//! workflow::ClauseFlow (处理单条条款)
//!     ↓
//! services (能力层：llm)        parser (纯函数：切分 / 分类)
//!     ↓
//! infrastructure (基础设施：TempDocument / PdfExtractor)
//! ```

pub mod app;
pub mod contract_analyzer;

// 重新导出主要类型
pub use app::App;
pub use contract_analyzer::{ContractAnalyzer, PreparedContract};
