//! Answer evaluation.
//!
//! A pure correctness check over a (question, given answer) pair. No state,
//! no side effects.

use crate::model::{AnswerValue, Question};

/// Returns `true` iff `given` is the correct answer to `question`.
///
/// Single-valued kinds (single-choice, true/false, fill-in) compare with
/// exact, case-sensitive string equality. Fill-in answers are deliberately
/// not trimmed or case-folded. Multi-choice compares as set equality, so
/// selection order is irrelevant. An absent or empty answer is always
/// incorrect, as is an answer whose shape does not match the question kind.
pub fn evaluate(question: &Question, given: Option<&AnswerValue>) -> bool {
    let Some(given) = given else {
        return false;
    };
    if given.is_empty() {
        return false;
    }
    match (&question.answer, given) {
        (AnswerValue::Single(key), AnswerValue::Single(value)) => value == key,
        (AnswerValue::Multi(key), AnswerValue::Multi(values)) => values == key,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, QuestionKind};

    fn question(kind: QuestionKind, options: Option<Vec<&str>>, answer: AnswerValue) -> Question {
        Question {
            id: "q1".into(),
            kind,
            prompt: "prompt".into(),
            options: options.map(|opts| opts.into_iter().map(String::from).collect()),
            answer,
            difficulty: Difficulty::Medium,
            explanation: None,
        }
    }

    #[test]
    fn single_choice_exact_match() {
        let q = question(
            QuestionKind::SingleChoice,
            Some(vec!["A", "B"]),
            AnswerValue::single("B"),
        );
        assert!(evaluate(&q, Some(&AnswerValue::single("B"))));
        assert!(!evaluate(&q, Some(&AnswerValue::single("A"))));
    }

    #[test]
    fn fill_in_is_case_sensitive_and_unnormalized() {
        let q = question(QuestionKind::FillIn, None, AnswerValue::single("Paris"));
        assert!(evaluate(&q, Some(&AnswerValue::single("Paris"))));
        assert!(!evaluate(&q, Some(&AnswerValue::single("paris"))));
        assert!(!evaluate(&q, Some(&AnswerValue::single(" Paris"))));
        assert!(!evaluate(&q, Some(&AnswerValue::single("Paris "))));
    }

    #[test]
    fn multi_choice_is_set_equality() {
        let q = question(
            QuestionKind::MultiChoice,
            Some(vec!["X", "Y", "Z"]),
            AnswerValue::multi(["X", "Y"]),
        );
        assert!(evaluate(&q, Some(&AnswerValue::multi(["Y", "X"]))));
        assert!(!evaluate(&q, Some(&AnswerValue::multi(["X"]))));
        assert!(!evaluate(&q, Some(&AnswerValue::multi(["X", "Y", "Z"]))));
        assert!(!evaluate(&q, Some(&AnswerValue::multi(["X", "Z"]))));
    }

    #[test]
    fn unanswered_is_incorrect() {
        let q = question(
            QuestionKind::SingleChoice,
            Some(vec!["A", "B"]),
            AnswerValue::single("B"),
        );
        assert!(!evaluate(&q, None));
    }

    #[test]
    fn empty_value_is_incorrect() {
        let q = question(QuestionKind::FillIn, None, AnswerValue::single("42"));
        assert!(!evaluate(&q, Some(&AnswerValue::single(""))));

        let q = question(
            QuestionKind::MultiChoice,
            Some(vec!["X", "Y"]),
            AnswerValue::multi(["X"]),
        );
        assert!(!evaluate(&q, Some(&AnswerValue::multi(Vec::<String>::new()))));
    }

    #[test]
    fn mismatched_shape_is_incorrect() {
        let q = question(
            QuestionKind::SingleChoice,
            Some(vec!["A", "B"]),
            AnswerValue::single("B"),
        );
        assert!(!evaluate(&q, Some(&AnswerValue::multi(["B"]))));
    }
}
