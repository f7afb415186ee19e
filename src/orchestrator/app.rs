//! 应用生命周期 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：打印启动信息、组装提取器 / LLM 服务 / 分析器
//! 2. **资源管理**：唯一持有 `ContractAnalyzer` 的 `Arc`，在所有请求间共享
//! 3. **运行**：绑定端口并启动 HTTP 服务

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::infrastructure::PdfExtractor;
use crate::orchestrator::ContractAnalyzer;
use crate::server;
use crate::services::LlmService;
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
    analyzer: Arc<ContractAnalyzer>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let llm_service = Arc::new(LlmService::new(&config));
        let analyzer = Arc::new(ContractAnalyzer::new(
            Arc::new(PdfExtractor::new()),
            llm_service,
            config.verbose_logging,
        ));

        Ok(Self::with_analyzer(config, analyzer))
    }

    /// 使用现成的分析器组装应用
    pub fn with_analyzer(config: Config, analyzer: Arc<ContractAnalyzer>) -> Self {
        Self { config, analyzer }
    }

    /// 运行应用主逻辑，直到服务退出
    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法绑定地址: {}", self.config.bind_addr))?;
        let local_addr = listener.local_addr()?;

        let app = server::router(self.analyzer, self.config.max_upload_bytes);

        info!("✓ 服务已就绪: http://{}", local_addr);
        info!("💡 试试: curl http://{}/api/health", local_addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
