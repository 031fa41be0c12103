//! quizsmith-providers — LLM-backed collaborator services.
//!
//! Implements the `QuizService` trait for OpenAI and Anthropic backends,
//! plus a mock service for testing, so quizsmith can generate quizzes and
//! study recommendations without owning any model logic itself.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod mock;
pub mod openai;
pub mod prompts;
pub mod retry;

pub use config::{create_service, load_config, ProviderConfig, QuizsmithConfig};
pub use error::ProviderError;
pub use retry::with_retries;
