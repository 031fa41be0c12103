//! Saved attempt records with JSON persistence.
//!
//! The record shape handed to the persistence collaborator. The engine never
//! reads storage itself; it only produces and re-derives this shape.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::score::{aggregate, ScoredResult};
use crate::session::ResponseRecord;
use crate::model::Quiz;

/// One completed, scored quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAttempt {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// The quiz as taken.
    pub quiz: Quiz,
    /// The finalized response set, one record per question.
    pub user_answers: Vec<ResponseRecord>,
    /// Score at the time the attempt was taken.
    pub score_percentage: u32,
    /// Total time across all questions, in seconds.
    pub total_time_seconds: u64,
    /// When the attempt was completed.
    pub date_taken: DateTime<Utc>,
}

impl SavedAttempt {
    /// Build a record from a finalized session and its scored result.
    pub fn new(
        quiz: Quiz,
        user_answers: Vec<ResponseRecord>,
        result: &ScoredResult,
        date_taken: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz,
            user_answers,
            score_percentage: result.score_percentage,
            total_time_seconds: result.total_time_seconds,
            date_taken,
        }
    }

    /// Recompute the scored view from the stored snapshot.
    ///
    /// Aggregation is referentially transparent, so the stored score is
    /// always re-derivable and never authoritative on its own.
    pub fn rescore(&self) -> Result<ScoredResult, EngineError> {
        aggregate(&self.quiz, &self.user_answers)
    }

    /// Save the attempt as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize attempt")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write attempt to {}", path.display()))?;
        Ok(())
    }

    /// Load an attempt from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read attempt from {}", path.display()))?;
        let attempt: SavedAttempt =
            serde_json::from_str(&content).context("failed to parse attempt JSON")?;
        Ok(attempt)
    }
}
