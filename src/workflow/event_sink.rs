//! 事件出口
//!
//! 流式分析把事件送进通道；非流式分析直接丢弃。

use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::AnalysisEvent;

#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::Sender<AnalysisEvent>>,
}

impl EventSink {
    /// 丢弃所有事件
    pub fn discard() -> Self {
        Self { tx: None }
    }

    /// 把事件送进通道
    pub fn channel(tx: mpsc::Sender<AnalysisEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// 发送事件
    ///
    /// 接收端已关闭时返回 [`AppError::StreamClosed`]，调用方据此停止后续工作。
    pub async fn emit(&self, event: AnalysisEvent) -> AppResult<()> {
        let Some(tx) = &self.tx else {
            return Ok(());
        };
        let kind = event.kind();
        tx.send(event).await.map_err(|_| AppError::StreamClosed)?;
        debug!("事件已发送: {}", kind);
        Ok(())
    }
}
