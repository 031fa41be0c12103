//! The `quizsmith recommend` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use quizsmith_core::attempt::SavedAttempt;
use quizsmith_core::traits::RecommendationRequest;
use quizsmith_providers::with_retries;

pub async fn execute(
    attempt_path: PathBuf,
    provider: Option<String>,
    model: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let attempt = SavedAttempt::load_json(&attempt_path)?;
    let result = attempt.rescore()?;

    let (service, config) = super::resolve_service(provider, model, config_path.as_deref())?;

    let request = RecommendationRequest::from_scored(
        attempt.quiz.clone(),
        attempt.user_answers.clone(),
        &result,
    );

    eprintln!("Requesting recommendations via {}...", service.name());
    let recommendations = with_retries(
        config.max_retries,
        Duration::from_millis(config.retry_delay_ms),
        || service.recommend(&request),
    )
    .await?;

    println!("\n{}", recommendations.overall_assessment);

    if !recommendations.improvement_areas.is_empty() {
        println!("\nAreas to improve:");
        for area in &recommendations.improvement_areas {
            println!("  - {area}");
        }
    }

    if !recommendations.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &recommendations.recommendations {
            println!("  [{}] {}", rec.priority, rec.title);
            println!("      {}", rec.description);
        }
    }

    Ok(())
}
