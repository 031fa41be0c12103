//! The `quizsmith generate` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use quizsmith_core::traits::GenerateQuizRequest;
use quizsmith_providers::with_retries;

pub async fn execute(
    lecture_path: PathBuf,
    num_questions: Option<u32>,
    course: Option<String>,
    provider: Option<String>,
    model: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let lecture_text = std::fs::read_to_string(&lecture_path)
        .with_context(|| format!("failed to read lecture file: {}", lecture_path.display()))?;
    anyhow::ensure!(
        !lecture_text.trim().is_empty(),
        "lecture file is empty: {}",
        lecture_path.display()
    );

    let (service, config) = super::resolve_service(provider, model, config_path.as_deref())?;

    let request = GenerateQuizRequest {
        lecture_text,
        course_id: course,
        num_questions: Some(num_questions.unwrap_or(config.default_num_questions)),
    };

    eprintln!("Generating quiz via {}...", service.name());
    let quiz = with_retries(
        config.max_retries,
        Duration::from_millis(config.retry_delay_ms),
        || service.generate_quiz(&request),
    )
    .await?;

    let output_path = output.unwrap_or_else(|| {
        config
            .output_dir
            .join(format!("{}.json", quiz.id))
    });
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&quiz)?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("failed to write quiz to {}", output_path.display()))?;

    println!(
        "Generated \"{}\" with {} question(s): {}",
        quiz.title,
        quiz.questions.len(),
        output_path.display()
    );
    println!("Take it with: quizsmith take --quiz {}", output_path.display());

    Ok(())
}
