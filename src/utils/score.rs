// src/utils/score.rs

use std::collections::HashMap;

use crate::models::{test_paper::Question, test_result::Answer};

/// Result of grading one submission against its paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub correct_count: i64,
    /// Question count of the paper, not of the submission.
    pub total: i64,
    /// Rounded percentage, 0 to 100.
    pub score: i64,
}

/// Grades submitted answers against the paper's answer key.
///
/// Answers for question numbers the paper does not contain are ignored, and
/// unanswered questions count as incorrect. When a question is answered more
/// than once, the first answer is the one graded.
pub fn grade_answers(questions: &[Question], answers: &[Answer]) -> Grade {
    let key: HashMap<i64, i64> = questions
        .iter()
        .map(|q| (q.question_number, q.answer))
        .collect();

    let mut graded = HashMap::new();
    for a in answers {
        graded.entry(a.question_number).or_insert(a.selected_answer);
    }

    let correct_count = graded
        .iter()
        .filter(|&(number, selected)| key.get(number) == Some(selected))
        .count() as i64;

    let total = questions.len() as i64;

    Grade {
        correct_count,
        total,
        score: percentage(correct_count, total),
    }
}

/// `round(correct / total * 100)`, with halves rounded up. Zero when `total` is zero.
fn percentage(correct: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as i64
}
