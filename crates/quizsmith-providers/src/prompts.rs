//! Prompt construction and payload parsing shared by the LLM backends.
//!
//! Every backend speaks the same contract: a JSON-only system prompt, a user
//! prompt built from the request, and a JSON payload parsed and validated on
//! the way back.

use quizsmith_core::model::{well_formedness_issues, Quiz};
use quizsmith_core::traits::{GenerateQuizRequest, RecommendationRequest, Recommendations};
use uuid::Uuid;

use crate::error::ProviderError;

pub const QUIZ_SYSTEM_PROMPT: &str = "You are an AI quiz generator for university-level courses. \
Use ONLY the provided lecture text to create accurate questions. \
If something is not covered by the text, do not invent new facts. \
Respond with valid JSON only.";

pub const RECOMMENDATION_SYSTEM_PROMPT: &str = "You are an AI study coach. \
Given a learner's quiz performance, produce personalized study recommendations. \
Respond with valid JSON only.";

const DEFAULT_NUM_QUESTIONS: u32 = 10;

/// Build the user prompt for quiz generation.
///
/// The question-type mix and the JSON shape follow the generation
/// collaborator contract: roughly half single-correct multiple choice, a
/// quarter true/false, a quarter multi-correct.
pub fn build_quiz_prompt(request: &GenerateQuizRequest) -> String {
    let num_questions = request.num_questions.unwrap_or(DEFAULT_NUM_QUESTIONS);
    let course_line = request
        .course_id
        .as_deref()
        .map(|id| format!("COURSE: {id}\n\n"))
        .unwrap_or_default();

    format!(
        "{course_line}LECTURE TEXT:\n{lecture}\n\n\
TASK:\n\
- Generate a quiz with {num_questions} questions.\n\
- Mix of question types: approximately 50% multiple-choice single correct (\"mcq\"), \
25% true/false (\"tf\"), 25% multiple-choice multi-correct (\"mcq_multi\").\n\
- Every question needs: \"id\", \"type\", \"question\", \"answer\", \"difficulty\" \
(one of \"easy\", \"medium\", \"hard\"), and an optional \"explanation\".\n\
- \"mcq\" and \"mcq_multi\" questions carry an \"options\" array; the answer must be \
drawn from it (\"mcq_multi\" answers are a JSON array). \"tf\" answers are \"True\" or \
\"False\" with no options. \"fill\" questions have a single exact-match answer string.\n\
- Respond with a single JSON object: {{\"id\": \"...\", \"title\": \"...\", \"questions\": [...]}}.",
        lecture = request.lecture_text,
    )
}

/// Build the user prompt for recommendation generation.
pub fn build_recommendation_prompt(request: &RecommendationRequest) -> anyhow::Result<String> {
    let performance = serde_json::to_string_pretty(request)?;
    Ok(format!(
        "QUIZ PERFORMANCE DATA:\n{performance}\n\n\
TASK:\n\
- Assess the learner's performance and suggest what to study next.\n\
- Respond with a single JSON object: {{\"overallAssessment\": \"...\", \
\"improvementAreas\": [\"...\"], \"recommendations\": [{{\"title\": \"...\", \
\"description\": \"...\", \"priority\": \"high\"|\"medium\"|\"low\"}}]}}."
    ))
}

/// Strip a markdown code fence if the model wrapped its JSON in one.
///
/// Handles ```json ... ``` and bare ``` ... ``` blocks; anything else is
/// returned as-is.
pub fn extract_json_block(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").map_or(rest, str::trim).trim()
}

/// Parse and validate the quiz payload a model returned.
///
/// A missing or blank quiz id is tolerated and replaced; anything that fails
/// well-formedness is an invalid payload, never repaired.
pub fn parse_quiz_payload(content: &str) -> Result<Quiz, ProviderError> {
    let json = extract_json_block(content);
    let mut quiz: Quiz = serde_json::from_str(json)
        .map_err(|e| ProviderError::InvalidPayload(format!("quiz JSON did not parse: {e}")))?;

    if quiz.id.trim().is_empty() {
        quiz.id = Uuid::new_v4().to_string();
    }

    let issues = well_formedness_issues(&quiz);
    if !issues.is_empty() {
        let details = issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ProviderError::InvalidPayload(format!(
            "generated quiz is malformed: {details}"
        )));
    }

    Ok(quiz)
}

/// Parse the recommendations payload a model returned.
pub fn parse_recommendations_payload(content: &str) -> Result<Recommendations, ProviderError> {
    let json = extract_json_block(content);
    serde_json::from_str(json).map_err(|e| {
        ProviderError::InvalidPayload(format!("recommendations JSON did not parse: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_JSON: &str = r#"{
        "id": "quiz-1",
        "title": "Generated Quiz",
        "questions": [
            {
                "id": "q1",
                "type": "mcq",
                "question": "What is backpropagation?",
                "options": ["Forward pass", "Gradient computation"],
                "answer": "Gradient computation",
                "difficulty": "medium"
            }
        ]
    }"#;

    #[test]
    fn quiz_prompt_includes_request_fields() {
        let request = GenerateQuizRequest {
            lecture_text: "Neural networks are universal approximators.".into(),
            course_id: Some("cs231".into()),
            num_questions: Some(4),
        };
        let prompt = build_quiz_prompt(&request);
        assert!(prompt.contains("COURSE: cs231"));
        assert!(prompt.contains("4 questions"));
        assert!(prompt.contains("universal approximators"));
    }

    #[test]
    fn extract_json_block_handles_fences() {
        assert_eq!(extract_json_block("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(extract_json_block("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json_block("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn parse_valid_quiz_payload() {
        let quiz = parse_quiz_payload(QUIZ_JSON).unwrap();
        assert_eq!(quiz.id, "quiz-1");
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn parse_fenced_quiz_payload() {
        let fenced = format!("```json\n{QUIZ_JSON}\n```");
        assert!(parse_quiz_payload(&fenced).is_ok());
    }

    #[test]
    fn blank_quiz_id_is_replaced() {
        let json = QUIZ_JSON.replacen("quiz-1", "", 1);
        let quiz = parse_quiz_payload(&json).unwrap();
        assert!(!quiz.id.is_empty());
    }

    #[test]
    fn malformed_quiz_payload_is_rejected_not_repaired() {
        // Answer not among options
        let json = QUIZ_JSON.replacen("Gradient computation\",", "Pooling\",", 1);
        let err = parse_quiz_payload(&json).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidPayload(_)));
        assert!(err.is_permanent());
    }

    #[test]
    fn non_json_payload_is_rejected() {
        let err = parse_quiz_payload("Sure! Here is your quiz:").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidPayload(_)));
    }
}
