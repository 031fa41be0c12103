//! The `quizsmith take` command — an interactive session at the terminal.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{Cell, Table};

use quizsmith_core::attempt::SavedAttempt;
use quizsmith_core::model::{Question, QuestionKind, Quiz};
use quizsmith_core::parser;
use quizsmith_core::score::{aggregate, ScoredResult};
use quizsmith_core::session::{Advance, SessionTracker};

pub fn execute(quiz_path: PathBuf, save: Option<PathBuf>) -> Result<()> {
    let quiz = load_quiz(&quiz_path)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let (responses, result) = run_session(&quiz, &mut stdin.lock(), &mut stdout.lock())?;

    print_result(&result);

    if let Some(path) = save {
        let attempt = SavedAttempt::new(quiz, responses, &result, Utc::now());
        attempt.save_json(&path)?;
        println!("Attempt saved: {}", path.display());
        println!("Review it with: quizsmith review --attempt {}", path.display());
    }

    Ok(())
}

fn load_quiz(path: &Path) -> Result<Quiz> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read quiz file: {}", path.display()))?;
        parser::quiz_from_json(&content)
    } else {
        parser::parse_quiz(path)
    }
}

/// Drive a session from a line-oriented input stream.
///
/// Input grammar per line: an option letter selects (or toggles, for
/// multi-choice), `n` advances, `p` steps back, and anything else is a
/// free-text answer for fill-in questions. Finalization happens by
/// advancing past the last question.
fn run_session(
    quiz: &Quiz,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(Vec<quizsmith_core::session::ResponseRecord>, ScoredResult)> {
    let mut session = SessionTracker::start(quiz, Utc::now())?;
    let total = quiz.questions.len();

    writeln!(output, "{} ({} questions)", quiz.title, total)?;
    writeln!(output, "Answer with an option letter; n = next, p = previous.\n")?;

    let records = loop {
        let Some(question) = session.current_question().cloned() else {
            anyhow::bail!("session ended without finalizing");
        };
        show_question(
            output,
            &question,
            session.current_index(),
            total,
            session.response(&question.id),
        )?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before the session finished");
        }
        let trimmed = line.trim();

        match trimmed {
            "" => continue,
            "n" | "next" => match session.go_next(Utc::now())? {
                Advance::Moved(_) => continue,
                Advance::Finalized(records) => break records,
            },
            "p" | "prev" | "previous" => {
                if let Err(e) = session.go_previous() {
                    writeln!(output, "  {e}")?;
                }
                continue;
            }
            answer => {
                let value = resolve_answer(&question, answer);
                if let Err(e) = session.select(&question.id, &value) {
                    writeln!(output, "  {e}")?;
                }
            }
        }
    };

    let result = aggregate(quiz, &records)?;
    Ok((records, result))
}

/// Map an option letter back to its option text; free text passes through.
fn resolve_answer(question: &Question, answer: &str) -> String {
    if question.kind == QuestionKind::FillIn {
        return answer.to_string();
    }
    let Some(options) = question.selectable_options() else {
        return answer.to_string();
    };
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => {
            let index = (letter.to_ascii_lowercase() as usize).wrapping_sub('a' as usize);
            options
                .get(index)
                .map_or_else(|| answer.to_string(), |o| (*o).to_string())
        }
        _ => answer.to_string(),
    }
}

fn show_question(
    output: &mut impl Write,
    question: &Question,
    index: usize,
    total: usize,
    current: Option<&quizsmith_core::model::AnswerValue>,
) -> Result<()> {
    writeln!(
        output,
        "[{}/{}] ({}) {}",
        index + 1,
        total,
        question.difficulty,
        question.prompt
    )?;
    if let Some(options) = question.selectable_options() {
        for (i, option) in options.iter().enumerate() {
            let letter = (b'a' + i as u8) as char;
            writeln!(output, "  {letter}) {option}")?;
        }
    }
    if let Some(current) = current {
        writeln!(output, "  current answer: {current}")?;
    }
    write!(output, "> ")?;
    output.flush()?;
    Ok(())
}

fn print_result(result: &ScoredResult) {
    println!(
        "\nScore: {}% ({}/{} correct, {}s total, {:.1}s average)",
        result.score_percentage,
        result.correct_count,
        result.total_questions,
        result.total_time_seconds,
        result.average_time_seconds,
    );

    let mut table = Table::new();
    table.set_header(vec!["Difficulty", "Correct", "Total"]);
    for (difficulty, breakdown) in &result.per_difficulty {
        table.add_row(vec![
            Cell::new(difficulty),
            Cell::new(breakdown.correct),
            Cell::new(breakdown.total),
        ]);
    }
    println!("{table}");

    let mut review = Table::new();
    review.set_header(vec!["Question", "Result", "Your answer", "Correct answer"]);
    for outcome in &result.outcomes {
        review.add_row(vec![
            Cell::new(&outcome.prompt),
            Cell::new(if outcome.is_correct { "correct" } else { "wrong" }),
            Cell::new(
                outcome
                    .given_answer
                    .as_ref()
                    .map_or_else(|| "(unanswered)".to_string(), ToString::to_string),
            ),
            Cell::new(&outcome.correct_answer),
        ]);
    }
    println!("{review}");
}
