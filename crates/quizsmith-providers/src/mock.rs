//! Mock service for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizsmith_core::model::{AnswerValue, Difficulty, Question, QuestionKind, Quiz};
use quizsmith_core::traits::{
    GenerateQuizRequest, Priority, QuizService, Recommendation, RecommendationRequest,
    Recommendations,
};

/// A mock quiz service for exercising callers without real API calls.
///
/// Returns a configurable quiz and recommendations, and records how it was
/// called.
pub struct MockService {
    quiz: Quiz,
    recommendations: Recommendations,
    call_count: AtomicU32,
    last_quiz_request: Mutex<Option<GenerateQuizRequest>>,
}

impl MockService {
    /// Create a mock that returns the given quiz.
    pub fn with_quiz(quiz: Quiz) -> Self {
        Self {
            quiz,
            recommendations: default_recommendations(),
            call_count: AtomicU32::new(0),
            last_quiz_request: Mutex::new(None),
        }
    }

    /// Create a mock with a small built-in quiz.
    pub fn with_sample_quiz() -> Self {
        Self::with_quiz(sample_quiz())
    }

    /// Override the canned recommendations.
    pub fn with_recommendations(mut self, recommendations: Recommendations) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Number of calls made to this service (generation and recommendation).
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last quiz-generation request received.
    pub fn last_quiz_request(&self) -> Option<GenerateQuizRequest> {
        self.last_quiz_request.lock().unwrap().clone()
    }
}

/// The demo quiz the mock hands out by default.
pub fn sample_quiz() -> Quiz {
    Quiz {
        id: "demo-quiz".into(),
        title: "Machine Learning Demo".into(),
        questions: vec![
            Question {
                id: "q1".into(),
                kind: QuestionKind::SingleChoice,
                prompt: "What is machine learning?".into(),
                options: Some(vec![
                    "Study of algorithms".into(),
                    "Type of AI".into(),
                    "Data science".into(),
                    "All of above".into(),
                ]),
                answer: AnswerValue::single("All of above"),
                difficulty: Difficulty::Easy,
                explanation: None,
            },
            Question {
                id: "q2".into(),
                kind: QuestionKind::SingleChoice,
                prompt: "What is backpropagation?".into(),
                options: Some(vec![
                    "Forward pass".into(),
                    "Gradient computation".into(),
                    "Loss function".into(),
                    "Optimizer".into(),
                ]),
                answer: AnswerValue::single("Gradient computation"),
                difficulty: Difficulty::Medium,
                explanation: Some("Backprop computes gradients of the loss.".into()),
            },
        ],
    }
}

fn default_recommendations() -> Recommendations {
    Recommendations {
        overall_assessment: "Good performance with room for improvement".into(),
        improvement_areas: vec!["Hard question practice".into()],
        recommendations: vec![Recommendation {
            title: "Focus on Hard Questions".into(),
            description: "Revisit the topics behind the questions you missed.".into(),
            priority: Priority::High,
        }],
    }
}

#[async_trait]
impl QuizService for MockService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> anyhow::Result<Quiz> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_quiz_request.lock().unwrap() = Some(request.clone());
        Ok(self.quiz.clone())
    }

    async fn recommend(&self, _request: &RecommendationRequest) -> anyhow::Result<Recommendations> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.recommendations.clone())
    }
}
