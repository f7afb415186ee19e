pub mod language_model;
pub mod llm_service;
pub mod prompts;

pub use language_model::{LanguageModel, OpenAiChat};
pub use llm_service::{LlmService, CANNOT_ANSWER, CANNOT_EXPLAIN};
