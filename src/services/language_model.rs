//! 语言模型接入 - 业务能力层
//!
//! `LanguageModel` 是服务层与具体模型之间的接缝：服务只需要"给一段提示词，拿一段文本"。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 文本补全能力
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 模型名称（仅用于日志）
    fn model_name(&self) -> &str;

    /// 发送单条用户消息，返回去除首尾空白后的回复
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// 基于 OpenAI Chat Completions 接口的模型
///
/// 客户端在第一次调用时创建，之后复用。
pub struct OpenAiChat {
    openai_config: OpenAIConfig,
    client: OnceCell<Client<OpenAIConfig>>,
    model_name: String,
}

impl OpenAiChat {
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.trim())
            .with_api_base(&config.llm_api_base_url);

        Self {
            openai_config,
            client: OnceCell::new(),
            model_name: config.llm_model_name.clone(),
        }
    }

    fn client(&self) -> &Client<OpenAIConfig> {
        self.client.get_or_init(|| {
            debug!("创建 LLM 客户端，模型: {}", self.model_name);
            Client::with_config(self.openai_config.clone())
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        debug!(
            "调用 LLM API，模型: {}，温度: {}，提示词 {} 字符",
            self.model_name,
            temperature,
            prompt.chars().count()
        );

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(temperature)
            .build()?;

        let response = self.client().chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }
}
