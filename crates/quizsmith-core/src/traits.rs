//! Collaborator contracts for quiz generation and recommendations.
//!
//! These async traits are implemented by the `quizsmith-providers` crate.
//! The engine treats both collaborators as opaque: generated quizzes are
//! only checked for well-formedness, and recommendation content is passed
//! through without interpretation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Quiz;
use crate::score::ScoredResult;
use crate::session::ResponseRecord;

/// A service that can generate quizzes from source text and produce study
/// recommendations from a scored attempt.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Human-readable service name (e.g. "openai").
    fn name(&self) -> &str;

    /// Generate a quiz from lecture text.
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> anyhow::Result<Quiz>;

    /// Produce study recommendations from a completed attempt.
    async fn recommend(&self, request: &RecommendationRequest) -> anyhow::Result<Recommendations>;
}

/// Request to generate a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    /// The source text to generate questions from.
    pub lecture_text: String,
    /// Optional course scope for retrieval on the collaborator side.
    #[serde(default)]
    pub course_id: Option<String>,
    /// How many questions to generate.
    #[serde(default)]
    pub num_questions: Option<u32>,
}

/// Request for study recommendations, derived from a scored attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub quiz: Quiz,
    pub user_answers: Vec<ResponseRecord>,
    pub total_time_seconds: u64,
    pub score_percentage: u32,
}

impl RecommendationRequest {
    /// Assemble the request from a quiz, its finalized responses, and the
    /// aggregated result.
    pub fn from_scored(
        quiz: Quiz,
        user_answers: Vec<ResponseRecord>,
        result: &ScoredResult,
    ) -> Self {
        Self {
            quiz,
            user_answers,
            total_time_seconds: result.total_time_seconds,
            score_percentage: result.score_percentage,
        }
    }
}

/// Recommendation payload returned by the collaborator, passed through
/// verbatim to presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub overall_assessment: String,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// One recommendation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_response_parses_collaborator_json() {
        let json = r#"{
            "overallAssessment": "Good performance with room for improvement",
            "improvementAreas": ["Time management", "Hard question practice"],
            "recommendations": [
                {
                    "title": "Focus on Hard Questions",
                    "description": "You struggled with hard questions",
                    "priority": "high"
                }
            ]
        }"#;
        let parsed: Recommendations = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.improvement_areas.len(), 2);
        assert_eq!(parsed.recommendations[0].priority, Priority::High);
    }

    #[test]
    fn request_serializes_with_collaborator_field_names() {
        let request = GenerateQuizRequest {
            lecture_text: "Neural networks ...".into(),
            course_id: Some("cs101".into()),
            num_questions: Some(5),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("lectureText").is_some());
        assert!(json.get("courseId").is_some());
        assert!(json.get("numQuestions").is_some());
    }
}
