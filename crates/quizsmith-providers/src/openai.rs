//! OpenAI API service implementation.

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

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f64 = 0.3;

/// OpenAI-compatible chat completions service.
pub struct OpenAiService {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiService {
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

    /// Send one JSON-mode chat completion and return the message content.
    async fn chat(&self, system_prompt: &str, user_prompt: String) -> anyhow::Result<String> {
        let body = OpenAiRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
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
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let api_response: OpenAiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let content = api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();
        Ok(content)
    }
}

#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<OpenAiMessage>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Deserialize)]
struct OpenAiChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

#[async_trait]
impl QuizService for OpenAiService {
    fn name(&self) -> &str {
        "openai"
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn quiz_request() -> GenerateQuizRequest {
        GenerateQuizRequest {
            lecture_text: "Gradient descent minimizes a loss function.".into(),
            course_id: None,
            num_questions: Some(1),
        }
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "model": "gpt-4o-mini"
        })
    }

    #[tokio::test]
    async fn successful_quiz_generation() {
        let server = MockServer::start().await;

        let quiz_json = r#"{
            "id": "quiz-1",
            "title": "Gradient Descent",
            "questions": [{
                "id": "q1",
                "type": "tf",
                "question": "Gradient descent always finds the global minimum.",
                "answer": "False",
                "difficulty": "easy"
            }]
        }"#;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(quiz_json)))
            .mount(&server)
            .await;

        let service = OpenAiService::new("test-key", "gpt-4o-mini", Some(server.uri()));
        let quiz = service.generate_quiz(&quiz_request()).await.unwrap();
        assert_eq!(quiz.title, "Gradient Descent");
        assert_eq!(quiz.questions.len(), 1);
    }

    #[tokio::test]
    async fn malformed_quiz_payload_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_body("not json at all")),
            )
            .mount(&server)
            .await;

        let service = OpenAiService::new("test-key", "gpt-4o-mini", Some(server.uri()));
        let err = service.generate_quiz(&quiz_request()).await.unwrap_err();
        assert!(err.to_string().contains("invalid payload"));
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let service = OpenAiService::new("bad-key", "gpt-4o-mini", Some(server.uri()));
        let err = service.generate_quiz(&quiz_request()).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn rate_limiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "5"))
            .mount(&server)
            .await;

        let service = OpenAiService::new("test-key", "gpt-4o-mini", Some(server.uri()));
        let err = service.generate_quiz(&quiz_request()).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn successful_recommendations() {
        let server = MockServer::start().await;

        let rec_json = r#"{
            "overallAssessment": "Solid fundamentals",
            "improvementAreas": ["Hard questions"],
            "recommendations": [{
                "title": "Review optimization",
                "description": "Revisit the gradient descent lecture",
                "priority": "medium"
            }]
        }"#;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(rec_json)))
            .mount(&server)
            .await;

        let quiz = parse_quiz_payload(
            r#"{"id": "quiz-1", "title": "T", "questions": [{
                "id": "q1", "type": "tf", "question": "p", "answer": "True", "difficulty": "easy"
            }]}"#,
        )
        .unwrap();
        let request = RecommendationRequest {
            quiz,
            user_answers: vec![],
            total_time_seconds: 30,
            score_percentage: 100,
        };

        let service = OpenAiService::new("test-key", "gpt-4o-mini", Some(server.uri()));
        let recs = service.recommend(&request).await.unwrap();
        assert_eq!(recs.overall_assessment, "Solid fundamentals");
        assert_eq!(recs.recommendations.len(), 1);
    }
}
