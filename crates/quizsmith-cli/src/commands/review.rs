//! The `quizsmith review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizsmith_core::attempt::SavedAttempt;

pub fn execute(attempt_path: PathBuf) -> Result<()> {
    let attempt = SavedAttempt::load_json(&attempt_path)?;
    let result = attempt.rescore()?;

    println!(
        "Attempt {} — \"{}\" taken {}",
        attempt.id,
        attempt.quiz.title,
        attempt.date_taken.format("%Y-%m-%d %H:%M UTC"),
    );
    println!(
        "Score: {}% ({}/{} correct, {}s total)",
        result.score_percentage,
        result.correct_count,
        result.total_questions,
        result.total_time_seconds,
    );

    if result.score_percentage != attempt.score_percentage {
        println!(
            "Note: stored score was {}%; the quiz content changed since the attempt.",
            attempt.score_percentage
        );
    }

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
    review.set_header(vec![
        "Question",
        "Result",
        "Your answer",
        "Correct answer",
        "Explanation",
    ]);
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
            Cell::new(outcome.explanation.as_deref().unwrap_or("")),
        ]);
    }
    println!("{review}");

    Ok(())
}
