//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizsmith() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizsmith").unwrap()
}

const VALID_QUIZ: &str = r#"[quiz]
id = "fixture"
title = "Fixture Quiz"

[[questions]]
id = "q1"
type = "mcq"
prompt = "Pick one"
options = ["Alpha", "Beta"]
answer = "Beta"
difficulty = "easy"

[[questions]]
id = "q2"
type = "tf"
prompt = "The sky is blue"
answer = "True"
difficulty = "medium"
"#;

const INVALID_QUIZ: &str = r#"[quiz]
id = "broken"
title = "Broken Quiz"

[[questions]]
id = "q1"
type = "mcq"
prompt = "Pick one"
options = ["Alpha", "Beta"]
answer = "Gamma"
difficulty = "easy"
"#;

#[test]
fn validate_valid_quiz() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quiz.toml");
    std::fs::write(&path, VALID_QUIZ).unwrap();

    quizsmith()
        .arg("validate")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_reports_issues_and_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quiz.toml");
    std::fs::write(&path, INVALID_QUIZ).unwrap();

    quizsmith()
        .arg("validate")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("not one of the options"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.toml"), VALID_QUIZ).unwrap();
    std::fs::write(dir.path().join("b.toml"), VALID_QUIZ).unwrap();

    quizsmith()
        .arg("validate")
        .arg("--quiz")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixture Quiz"));
}

#[test]
fn validate_nonexistent_file() {
    quizsmith()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizsmith()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizsmith.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(dir.path().join("quizsmith.toml").exists());
    assert!(dir.path().join("quizzes/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizsmith()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizsmith()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_quiz_validates_cleanly() {
    let dir = TempDir::new().unwrap();

    quizsmith()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizsmith()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg("quizzes/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn take_scripted_session_saves_attempt() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("quiz.toml");
    let attempt_path = dir.path().join("attempt.json");
    std::fs::write(&quiz_path, VALID_QUIZ).unwrap();

    // Answer q1 with "Beta" (b), advance, answer q2 with "True" (a), finish.
    quizsmith()
        .arg("take")
        .arg("--quiz")
        .arg(&quiz_path)
        .arg("--save")
        .arg(&attempt_path)
        .write_stdin("b\nn\na\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100%"))
        .stdout(predicate::str::contains("Attempt saved"));

    assert!(attempt_path.exists());
}

#[test]
fn take_skipping_everything_scores_zero() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("quiz.toml");
    std::fs::write(&quiz_path, VALID_QUIZ).unwrap();

    quizsmith()
        .arg("take")
        .arg("--quiz")
        .arg(&quiz_path)
        .write_stdin("n\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0%"))
        .stdout(predicate::str::contains("(unanswered)"));
}

#[test]
fn review_rescores_saved_attempt() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("quiz.toml");
    let attempt_path = dir.path().join("attempt.json");
    std::fs::write(&quiz_path, VALID_QUIZ).unwrap();

    quizsmith()
        .arg("take")
        .arg("--quiz")
        .arg(&quiz_path)
        .arg("--save")
        .arg(&attempt_path)
        .write_stdin("b\nn\nb\nn\n")
        .assert()
        .success();

    quizsmith()
        .arg("review")
        .arg("--attempt")
        .arg(&attempt_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixture Quiz"))
        .stdout(predicate::str::contains("Score: 50%"));
}

#[test]
fn recommend_with_mock_provider() {
    let dir = TempDir::new().unwrap();
    let quiz_path = dir.path().join("quiz.toml");
    let attempt_path = dir.path().join("attempt.json");
    let config_path = dir.path().join("quizsmith.toml");
    std::fs::write(&quiz_path, VALID_QUIZ).unwrap();
    std::fs::write(
        &config_path,
        "[providers.mock]\ntype = \"mock\"\ndefault_provider = \"mock\"\n",
    )
    .unwrap();

    quizsmith()
        .arg("take")
        .arg("--quiz")
        .arg(&quiz_path)
        .arg("--save")
        .arg(&attempt_path)
        .write_stdin("b\nn\na\nn\n")
        .assert()
        .success();

    quizsmith()
        .arg("recommend")
        .arg("--attempt")
        .arg(&attempt_path)
        .arg("--provider")
        .arg("mock")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommendations:"));
}

#[test]
fn generate_with_mock_provider() {
    let dir = TempDir::new().unwrap();
    let lecture_path = dir.path().join("lecture.txt");
    let output_path = dir.path().join("generated.json");
    let config_path = dir.path().join("quizsmith.toml");
    std::fs::write(&lecture_path, "Backpropagation computes gradients.").unwrap();
    std::fs::write(
        &config_path,
        "[providers.mock]\ntype = \"mock\"\ndefault_provider = \"mock\"\n",
    )
    .unwrap();

    quizsmith()
        .arg("generate")
        .arg("--lecture")
        .arg(&lecture_path)
        .arg("--provider")
        .arg("mock")
        .arg("--output")
        .arg(&output_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    assert!(output_path.exists());

    // The generated file is itself a valid quiz
    quizsmith()
        .arg("validate")
        .arg("--quiz")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn generate_rejects_empty_lecture() {
    let dir = TempDir::new().unwrap();
    let lecture_path = dir.path().join("lecture.txt");
    std::fs::write(&lecture_path, "   \n").unwrap();

    quizsmith()
        .arg("generate")
        .arg("--lecture")
        .arg(&lecture_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}
