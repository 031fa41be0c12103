//! Engine error types.
//!
//! Two families: configuration errors, which are fatal and indicate an
//! upstream contract violation by the generation collaborator, and
//! invalid-operation errors, which signal a caller bug and never corrupt
//! session state.

use thiserror::Error;

/// Errors produced by the quiz-session engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The quiz failed well-formedness validation.
    #[error("malformed quiz '{quiz_id}': {details}")]
    MalformedQuiz { quiz_id: String, details: String },

    /// The quiz has no questions.
    #[error("quiz '{0}' has no questions")]
    EmptyQuiz(String),

    /// A transition was attempted on a completed session.
    #[error("session is already completed")]
    SessionCompleted,

    /// A selection targeted a question other than the current one.
    #[error("question '{0}' is not the current question")]
    NotCurrentQuestion(String),

    /// The selected value is not one of the question's options.
    #[error("'{value}' is not an option for question '{question_id}'")]
    InvalidOption { question_id: String, value: String },

    /// `go_previous` was called at the first question.
    #[error("already at the first question")]
    AtFirstQuestion,
}

impl EngineError {
    /// Returns `true` if this error is fatal bad input rather than a
    /// recoverable caller mistake.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::MalformedQuiz { .. } | EngineError::EmptyQuiz(_)
        )
    }
}
