//! The `quizsmith validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizsmith_core::model::well_formedness_issues;
use quizsmith_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![load_one(&quiz_path)?]
    };

    let mut total_issues = 0;

    for quiz in &quizzes {
        println!("Quiz: {} ({} questions)", quiz.title, quiz.questions.len());

        let issues = well_formedness_issues(quiz);
        for issue in &issues {
            println!("  ISSUE: {issue}");
        }
        total_issues += issues.len();
    }

    if total_issues == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_issues} issue(s) found.");
        anyhow::bail!("validation failed");
    }

    Ok(())
}

fn load_one(path: &PathBuf) -> Result<quizsmith_core::model::Quiz> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let content = std::fs::read_to_string(path)?;
        parser::quiz_from_json(&content)
    } else {
        parser::parse_quiz(path)
    }
}
