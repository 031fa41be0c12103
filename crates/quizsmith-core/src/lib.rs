//! quizsmith-core — Quiz-session engine, evaluator, and scoring.
//!
//! This crate defines the fundamental data model, the session state machine,
//! and the aggregation logic that the entire quizsmith system builds on.

pub mod attempt;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod parser;
pub mod score;
pub mod session;
pub mod traits;
