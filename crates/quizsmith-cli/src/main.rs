//! quizsmith CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizsmith", version, about = "Quiz generation and study sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz from lecture text
    Generate {
        /// Path to a text file with the lecture content
        #[arg(long)]
        lecture: PathBuf,

        /// Number of questions to generate
        #[arg(long)]
        num_questions: Option<u32>,

        /// Course identifier to scope generation
        #[arg(long)]
        course: Option<String>,

        /// Service to use (e.g. "openai", "anthropic", "mock")
        #[arg(long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Where to write the generated quiz JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a quiz interactively
    Take {
        /// Path to a quiz file (.toml or .json)
        #[arg(long)]
        quiz: PathBuf,

        /// Where to save the attempt record after finishing
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Review a saved attempt
    Review {
        /// Path to a saved attempt JSON
        #[arg(long)]
        attempt: PathBuf,
    },

    /// Get study recommendations for a saved attempt
    Recommend {
        /// Path to a saved attempt JSON
        #[arg(long)]
        attempt: PathBuf,

        /// Service to use (e.g. "openai", "anthropic", "mock")
        #[arg(long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizsmith=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            lecture,
            num_questions,
            course,
            provider,
            model,
            output,
            config,
        } => {
            commands::generate::execute(lecture, num_questions, course, provider, model, output, config)
                .await
        }
        Commands::Take { quiz, save } => commands::take::execute(quiz, save),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Review { attempt } => commands::review::execute(attempt),
        Commands::Recommend {
            attempt,
            provider,
            model,
            config,
        } => commands::recommend::execute(attempt, provider, model, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
