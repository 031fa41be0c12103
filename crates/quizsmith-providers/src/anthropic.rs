//! Anthropic API service implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use quizsmith_core::model::Quiz;
use quizsmith_core::traits::{
    GenerateQuizRequest, QuizService, RecommendationRequest, Recommendations,
};

use crate::error::ProviderError;
use crate::prompts::{
    build_quiz_prompt, build_recommendation_prompt, parse_quiz_payload,
    parse_recommendations_payload, QUIZ_SYSTEM_PROMPT, RECOMMENDATION_SYSTEM_PROMPT,
};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f64 = 0.3;

/// Anthropic messages API service.
pub struct AnthropicService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicService {
    pub fn new(api_key: &str, model: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    async fn chat(&self, system_prompt: &str, user_prompt: String) -> anyhow::Result<String> {
        let body = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: Some(system_prompt.to_string()),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: user_prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(self.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let api_response: AnthropicResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let content = api_response
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default();
        Ok(content)
    }
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: String,
}

#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

#[async_trait]
impl QuizService for AnthropicService {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> anyhow::Result<Quiz> {
        let prompt = build_quiz_prompt(request);
        let content = self.chat(QUIZ_SYSTEM_PROMPT, prompt).await?;
        Ok(parse_quiz_payload(&content)?)
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn recommend(&self, request: &RecommendationRequest) -> anyhow::Result<Recommendations> {
        let prompt = build_recommendation_prompt(request)?;
        let content = self.chat(RECOMMENDATION_SYSTEM_PROMPT, prompt).await?;
        Ok(parse_recommendations_payload(&content)?)
    }
}
