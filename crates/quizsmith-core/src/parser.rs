//! Quiz file parsing.
//!
//! Loads quizzes from hand-authored TOML files and directories, and from the
//! JSON shape the generation collaborator returns. Parsing and validation
//! are separate steps: `validate` wants every issue listed, while the engine
//! rejects a malformed quiz outright.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerValue, Question, QuestionKind, Quiz};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: QuestionKind,
    prompt: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    answer: AnswerValue,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    explanation: Option<String>,
}

fn default_kind() -> QuestionKind {
    QuestionKind::SingleChoice
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question '{}': {}", q.id, e))?;
            Ok(Question {
                id: q.id,
                kind: q.kind,
                prompt: q.prompt,
                options: q.options,
                answer: q.answer,
                difficulty,
                explanation: q.explanation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Quiz {
        id: parsed.quiz.id,
        title: parsed.quiz.title,
        questions,
    })
}

/// Parse the JSON shape the generation collaborator returns.
pub fn quiz_from_json(content: &str) -> Result<Quiz> {
    serde_json::from_str(content).context("failed to parse quiz JSON")
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}
