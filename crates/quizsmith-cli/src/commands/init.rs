//! The `quizsmith init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizsmith.toml
    if std::path::Path::new("quizsmith.toml").exists() {
        println!("quizsmith.toml already exists, skipping.");
    } else {
        std::fs::write("quizsmith.toml", SAMPLE_CONFIG)?;
        println!("Created quizsmith.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizsmith.toml with your API keys");
    println!("  2. Run: quizsmith validate --quiz quizzes/example.toml");
    println!("  3. Run: quizsmith take --quiz quizzes/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizsmith configuration

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

default_provider = "openai"
default_model = "gpt-4o-mini"
default_num_questions = 10
output_dir = "./quizsmith-output"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "ml-basics"
title = "Machine Learning Basics"

[[questions]]
id = "q1"
type = "mcq"
prompt = "What does a loss function measure?"
options = [
    "How far predictions are from the targets",
    "The number of model parameters",
    "The size of the training set",
    "The learning rate",
]
answer = "How far predictions are from the targets"
difficulty = "easy"
explanation = "Training minimizes the loss, which quantifies prediction error."

[[questions]]
id = "q2"
type = "mcq_multi"
prompt = "Which of these are supervised learning methods?"
options = ["Linear regression", "K-means clustering", "Decision trees", "PCA"]
answer = ["Linear regression", "Decision trees"]
difficulty = "medium"

[[questions]]
id = "q3"
type = "tf"
prompt = "Gradient descent is guaranteed to find the global minimum."
answer = "False"
difficulty = "medium"
explanation = "Non-convex losses have local minima and saddle points."

[[questions]]
id = "q4"
type = "fill"
prompt = "The algorithm that computes gradients layer by layer is called ____."
answer = "backpropagation"
difficulty = "hard"
"#;
