/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择默认级别。重复调用无副作用。
///
/// # 参数
/// - `verbose`: 是否输出本 crate 的 debug 日志
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "info,contract_analyzer=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 合同分析服务启动");
    info!(
        "🕒 启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 监听地址: {}", config.bind_addr);
    info!("🤖 模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    info!("📦 上传上限: {} 字节", config.max_upload_bytes);
    info!("{}", "=".repeat(60));
}

/// 记录收到的上传
///
/// # 参数
/// - `endpoint`: 接口路径
/// - `filename`: 上传文件名
/// - `size`: 文件字节数
pub fn log_upload(endpoint: &str, filename: &str, size: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📥 {} 收到文件: {} ({} 字节)", endpoint, filename, size);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
