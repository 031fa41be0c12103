//! Scoring and analytics aggregation.
//!
//! Turns a finalized response set into an overall score, per-difficulty
//! breakdown, time statistics, and a per-question outcome sequence fit for a
//! review screen. Pure derivation: recomputing from the same snapshot always
//! yields the same result.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::evaluate::evaluate;
use crate::model::{AnswerValue, Difficulty, Quiz};
use crate::session::ResponseRecord;

/// Correct/total tally for one difficulty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    pub correct: u32,
    pub total: u32,
}

/// Per-question review record.
///
/// Carries enough to render a review row without touching the quiz or the
/// session again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub question_id: String,
    pub prompt: String,
    pub is_correct: bool,
    /// `None` when the question was not answered.
    pub given_answer: Option<AnswerValue>,
    pub correct_answer: AnswerValue,
    pub difficulty: Difficulty,
    pub explanation: Option<String>,
}

/// The scored view of a completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub total_questions: u32,
    pub correct_count: u32,
    /// Percentage of correct answers, rounded half-up.
    pub score_percentage: u32,
    /// All three buckets are always present, even with zero totals.
    pub per_difficulty: BTreeMap<Difficulty, DifficultyBreakdown>,
    pub total_time_seconds: u64,
    /// Unrounded; presentation may round.
    pub average_time_seconds: f64,
    /// Per-question outcomes in quiz order, not answer order.
    pub outcomes: Vec<Outcome>,
}

/// Aggregate a finalized response set into a [`ScoredResult`].
///
/// Questions with no matching record are scored as unanswered. A
/// zero-question quiz is a contract violation from the generation
/// collaborator and is rejected.
pub fn aggregate(quiz: &Quiz, responses: &[ResponseRecord]) -> Result<ScoredResult, EngineError> {
    if quiz.questions.is_empty() {
        return Err(EngineError::EmptyQuiz(quiz.id.clone()));
    }

    let by_id: HashMap<&str, &ResponseRecord> = responses
        .iter()
        .map(|r| (r.question_id.as_str(), r))
        .collect();

    let mut per_difficulty: BTreeMap<Difficulty, DifficultyBreakdown> = Difficulty::ALL
        .iter()
        .map(|d| (*d, DifficultyBreakdown::default()))
        .collect();

    let mut correct_count = 0u32;
    let mut total_time_seconds = 0u64;
    let mut outcomes = Vec::with_capacity(quiz.questions.len());

    for question in &quiz.questions {
        let record = by_id.get(question.id.as_str()).copied();
        let given = record.and_then(|r| r.answer.as_ref());
        let is_correct = evaluate(question, given);

        total_time_seconds += record.map_or(0, |r| r.time_spent_seconds);

        let bucket = per_difficulty.entry(question.difficulty).or_default();
        bucket.total += 1;
        if is_correct {
            bucket.correct += 1;
            correct_count += 1;
        }

        outcomes.push(Outcome {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            is_correct,
            given_answer: given.cloned(),
            correct_answer: question.answer.clone(),
            difficulty: question.difficulty,
            explanation: question.explanation.clone(),
        });
    }

    let total_questions = quiz.questions.len() as u32;
    let score_percentage =
        ((100.0 * f64::from(correct_count)) / f64::from(total_questions)).round() as u32;
    let average_time_seconds = total_time_seconds as f64 / f64::from(total_questions);

    Ok(ScoredResult {
        total_questions,
        correct_count,
        score_percentage,
        per_difficulty,
        total_time_seconds,
        average_time_seconds,
        outcomes,
    })
}
