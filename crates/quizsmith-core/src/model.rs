//! Core data model types for quizsmith.
//!
//! These are the fundamental types the engine uses to represent quizzes,
//! questions, and answer values, plus the well-formedness contract every
//! question must satisfy before a session will accept it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Implicit options for true/false questions.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// Difficulty label attached to every question.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All buckets in display order. Analytics always reports every bucket,
    /// even with a zero total.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The kind of a question, which determines the shape of its accepted
/// answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Multiple choice with exactly one correct option.
    #[serde(rename = "mcq")]
    SingleChoice,
    /// Multiple choice with a set of correct options.
    #[serde(rename = "mcq_multi")]
    MultiChoice,
    /// True/false, options implicit.
    #[serde(rename = "tf")]
    TrueFalse,
    /// Free-text answer, matched exactly.
    #[serde(rename = "fill")]
    FillIn,
}

impl QuestionKind {
    /// Whether selections toggle set membership instead of replacing.
    pub fn is_multi_select(self) -> bool {
        matches!(self, QuestionKind::MultiChoice)
    }

    /// Whether the question carries an explicit `options` list.
    pub fn has_explicit_options(self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultiChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::SingleChoice => write!(f, "mcq"),
            QuestionKind::MultiChoice => write!(f, "mcq_multi"),
            QuestionKind::TrueFalse => write!(f, "tf"),
            QuestionKind::FillIn => write!(f, "fill"),
        }
    }
}

/// An answer value: a single string or a set of strings.
///
/// Used for both a question's answer key and a learner's given answer, so
/// the evaluator dispatches on the tag instead of inspecting loose values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(BTreeSet<String>),
}

impl AnswerValue {
    pub fn single(value: impl Into<String>) -> Self {
        AnswerValue::Single(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// An empty string or an empty set carries no answer.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Single(value) => value.is_empty(),
            AnswerValue::Multi(values) => values.is_empty(),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Single(value) => write!(f, "{value}"),
            AnswerValue::Multi(values) => {
                let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the quiz.
    pub id: String,
    /// What kind of question this is.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// The prompt shown to the learner.
    #[serde(alias = "question")]
    pub prompt: String,
    /// Ordered candidate options; present only for choice questions.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// The answer key.
    pub answer: AnswerValue,
    /// Difficulty label.
    pub difficulty: Difficulty,
    /// Optional explanation shown on the review screen.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// The values a learner may select, or `None` for free-text questions.
    pub fn selectable_options(&self) -> Option<Vec<&str>> {
        match self.kind {
            QuestionKind::SingleChoice | QuestionKind::MultiChoice => self
                .options
                .as_ref()
                .map(|opts| opts.iter().map(String::as_str).collect()),
            QuestionKind::TrueFalse => Some(TRUE_FALSE_OPTIONS.to_vec()),
            QuestionKind::FillIn => None,
        }
    }

    /// Check the well-formedness contract for this question alone.
    pub fn is_well_formed(&self) -> bool {
        self.issues().is_empty()
    }

    fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.id.trim().is_empty() {
            issues.push("question id is empty".to_string());
        }
        if self.prompt.trim().is_empty() {
            issues.push("prompt is empty".to_string());
        }

        match (&self.options, self.kind.has_explicit_options()) {
            (None, true) => issues.push("choice question has no options".to_string()),
            (Some(_), false) => {
                issues.push(format!("{} question must not carry options", self.kind))
            }
            _ => {}
        }

        if let Some(options) = &self.options {
            if options.is_empty() {
                issues.push("options list is empty".to_string());
            }
            let unique: HashSet<&str> = options.iter().map(String::as_str).collect();
            if unique.len() != options.len() {
                issues.push("options contain duplicates".to_string());
            }
        }

        match (self.kind, &self.answer) {
            (QuestionKind::SingleChoice, AnswerValue::Single(value)) => {
                let known = self
                    .options
                    .as_ref()
                    .is_some_and(|opts| opts.iter().any(|o| o == value));
                if !known {
                    issues.push(format!("answer '{value}' is not one of the options"));
                }
            }
            (QuestionKind::MultiChoice, AnswerValue::Multi(values)) => {
                if values.is_empty() {
                    issues.push("multi-choice answer set is empty".to_string());
                }
                if let Some(options) = &self.options {
                    for value in values {
                        if !options.iter().any(|o| o == value) {
                            issues.push(format!("answer '{value}' is not one of the options"));
                        }
                    }
                }
            }
            (QuestionKind::TrueFalse, AnswerValue::Single(value)) => {
                if !TRUE_FALSE_OPTIONS.contains(&value.as_str()) {
                    issues.push(format!("true/false answer must be True or False, got '{value}'"));
                }
            }
            (QuestionKind::FillIn, AnswerValue::Single(value)) => {
                if value.is_empty() {
                    issues.push("fill-in answer is empty".to_string());
                }
            }
            (kind, _) => {
                issues.push(format!("answer shape does not match question type {kind}"));
            }
        }

        issues
    }
}

/// An ordered collection of questions. Immutable once created; the session
/// tracker only ever borrows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// The questions, in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Validate the whole quiz; any issue is a fatal configuration error.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.questions.is_empty() {
            return Err(EngineError::EmptyQuiz(self.id.clone()));
        }
        let issues = well_formedness_issues(self);
        if issues.is_empty() {
            return Ok(());
        }
        let details = issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(EngineError::MalformedQuiz {
            quiz_id: self.id.clone(),
            details,
        })
    }
}

/// A single well-formedness problem found in a quiz.
#[derive(Debug, Clone)]
pub struct QuizIssue {
    /// The offending question, if the issue is question-scoped.
    pub question_id: Option<String>,
    /// What is wrong.
    pub message: String,
}

impl fmt::Display for QuizIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.question_id {
            Some(id) => write!(f, "[{id}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Collect every well-formedness problem in a quiz.
///
/// The engine treats any issue as fatal; this form exists so the `validate`
/// command can report all of them at once.
pub fn well_formedness_issues(quiz: &Quiz) -> Vec<QuizIssue> {
    let mut issues = Vec::new();

    if quiz.questions.is_empty() {
        issues.push(QuizIssue {
            question_id: None,
            message: "quiz has no questions".to_string(),
        });
    }

    let mut seen_ids = HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(question.id.as_str()) {
            issues.push(QuizIssue {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question id: {}", question.id),
            });
        }
        for message in question.issues() {
            issues.push(QuizIssue {
                question_id: Some(question.id.clone()),
                message,
            });
        }
    }

    issues
}
