pub mod generate;
pub mod init;
pub mod recommend;
pub mod review;
pub mod take;
pub mod validate;

use anyhow::Result;
use quizsmith_core::traits::QuizService;
use quizsmith_providers::config::{create_service, load_config_from, QuizsmithConfig};
use std::path::Path;

/// Resolve the service and model to use from CLI flags and the config file.
pub(crate) fn resolve_service(
    provider: Option<String>,
    model: Option<String>,
    config_path: Option<&Path>,
) -> Result<(Box<dyn QuizService>, QuizsmithConfig)> {
    let config = load_config_from(config_path)?;
    let provider_name = provider.unwrap_or_else(|| config.default_provider.clone());
    let model = model.unwrap_or_else(|| config.default_model.clone());

    let provider_config = config.providers.get(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "provider '{provider_name}' is not configured; run `quizsmith init` to create a config file"
        )
    })?;

    let service = create_service(provider_config, &model)?;
    Ok((service, config))
}
