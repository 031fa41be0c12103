//! Quiz session state machine.
//!
//! Tracks navigation through an ordered question list, buffers per-question
//! responses, and anchors per-question timers at first display. Single
//! learner, single quiz, strictly serialized operations.
//!
//! Callers pass the current time into the operations that need it, so the
//! machine stays deterministic under test.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{AnswerValue, Question, Quiz};

/// One finalized per-question response.
///
/// The finalized set carries exactly one record per question in quiz order;
/// `answer: None` is the explicit "unanswered" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// The question this record belongs to.
    pub question_id: String,
    /// The learner's answer, or `None` if the question was never answered.
    #[serde(default)]
    pub answer: Option<AnswerValue>,
    /// Seconds from the question's first display to session finalization.
    pub time_spent_seconds: u64,
}

/// Result of a [`SessionTracker::go_next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward; now at this index.
    Moved(usize),
    /// The session finalized and emitted its response set.
    Finalized(Vec<ResponseRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Completed,
}

/// State machine over one learner's pass through one quiz.
///
/// Borrows the quiz and never mutates it. Timers are anchored at the moment
/// a question first becomes current, so navigating back and forth neither
/// resets nor double-counts elapsed time.
#[derive(Debug)]
pub struct SessionTracker<'a> {
    quiz: &'a Quiz,
    index: usize,
    phase: Phase,
    responses: HashMap<String, AnswerValue>,
    first_shown: HashMap<String, DateTime<Utc>>,
}

impl<'a> SessionTracker<'a> {
    /// Start a session over `quiz`, which must be well-formed.
    ///
    /// The first question's timer starts immediately.
    pub fn start(quiz: &'a Quiz, now: DateTime<Utc>) -> Result<Self, EngineError> {
        quiz.validate()?;
        let mut tracker = Self {
            quiz,
            index: 0,
            phase: Phase::Active,
            responses: HashMap::new(),
            first_shown: HashMap::new(),
        };
        tracker.mark_shown(now);
        Ok(tracker)
    }

    /// The quiz this session runs over.
    pub fn quiz(&self) -> &Quiz {
        self.quiz
    }

    /// Index of the current question while active.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// The question currently displayed, or `None` once completed.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Active => self.quiz.questions.get(self.index),
            Phase::Completed => None,
        }
    }

    /// The response buffered so far for a question, if any.
    pub fn response(&self, question_id: &str) -> Option<&AnswerValue> {
        self.responses.get(question_id)
    }

    /// Record a selection for the current question.
    ///
    /// Single-select kinds replace any prior selection. Multi-choice toggles
    /// membership of `value`; a toggle that empties the set reverts the
    /// question to unanswered. Does not advance the index.
    pub fn select(&mut self, question_id: &str, value: &str) -> Result<(), EngineError> {
        self.ensure_active()?;
        let quiz = self.quiz;
        let question = &quiz.questions[self.index];
        if question.id != question_id {
            return Err(EngineError::NotCurrentQuestion(question_id.to_string()));
        }
        if let Some(options) = question.selectable_options() {
            if !options.contains(&value) {
                return Err(EngineError::InvalidOption {
                    question_id: question_id.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if question.kind.is_multi_select() {
            let mut set = match self.responses.remove(&question.id) {
                Some(AnswerValue::Multi(set)) => set,
                _ => BTreeSet::new(),
            };
            if !set.remove(value) {
                set.insert(value.to_string());
            }
            if !set.is_empty() {
                self.responses
                    .insert(question.id.clone(), AnswerValue::Multi(set));
            }
        } else {
            self.responses
                .insert(question.id.clone(), AnswerValue::single(value));
        }
        Ok(())
    }

    /// Advance to the next question, or finalize at the last one.
    ///
    /// Finalizing computes every question's elapsed time from its first
    /// display to this call, emits the full response set (one record per
    /// question, unanswered included), and moves the machine to its terminal
    /// state. No transition is legal afterwards.
    pub fn go_next(&mut self, now: DateTime<Utc>) -> Result<Advance, EngineError> {
        self.ensure_active()?;
        if self.index + 1 == self.quiz.questions.len() {
            let records = self.finalize(now);
            self.phase = Phase::Completed;
            return Ok(Advance::Finalized(records));
        }
        self.index += 1;
        self.mark_shown(now);
        Ok(Advance::Moved(self.index))
    }

    /// Step back one question. Responses and timers are untouched.
    pub fn go_previous(&mut self) -> Result<usize, EngineError> {
        self.ensure_active()?;
        if self.index == 0 {
            return Err(EngineError::AtFirstQuestion);
        }
        self.index -= 1;
        Ok(self.index)
    }

    fn ensure_active(&self) -> Result<(), EngineError> {
        match self.phase {
            Phase::Active => Ok(()),
            Phase::Completed => Err(EngineError::SessionCompleted),
        }
    }

    // First-shown timestamps are set once and never overwritten; a revisit
    // keeps the original anchor.
    fn mark_shown(&mut self, now: DateTime<Utc>) {
        let id = self.quiz.questions[self.index].id.clone();
        self.first_shown.entry(id).or_insert(now);
    }

    fn finalize(&self, now: DateTime<Utc>) -> Vec<ResponseRecord> {
        self.quiz
            .questions
            .iter()
            .map(|question| {
                let time_spent_seconds = self
                    .first_shown
                    .get(&question.id)
                    .map(|shown| (now - *shown).num_seconds().max(0) as u64)
                    .unwrap_or(0);
                ResponseRecord {
                    question_id: question.id.clone(),
                    answer: self.responses.get(&question.id).cloned(),
                    time_spent_seconds,
                }
            })
            .collect()
    }
}
