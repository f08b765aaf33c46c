// src/models/test_paper.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'test_papers' table in the database.
/// One paper per (grade, semester).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestPaper {
    pub id: i64,

    /// Elementary school year, 1 through 6.
    pub grade: i64,

    /// Half-year period, 1 or 2.
    pub semester: i64,

    #[serde(serialize_with = "crate::models::sqlite_datetime::serialize")]
    pub created_at: Option<chrono::NaiveDateTime>,

    /// Ordered question list.
    /// Stored as a JSON array in the database.
    pub questions: Json<Vec<Question>>,
}

/// A single multiple-choice question as stored inside a paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Question {
    #[validate(range(min = 1))]
    pub question_number: i64,

    /// Public path of an uploaded image (e.g. `/uploads/...`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[validate(length(equal = 4))]
    pub choices: Vec<String>,

    /// 1-based index of the correct choice.
    #[validate(range(min = 1, max = 4))]
    pub answer: i64,
}

/// DTO for sending a question to students (excludes the answer).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub question_number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub choices: Vec<String>,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            question_number: q.question_number,
            image_url: q.image_url,
            choices: q.choices,
        }
    }
}

/// DTO for the student-facing paper.
#[derive(Debug, Serialize)]
pub struct PublicTestPaper {
    pub id: i64,
    pub grade: i64,
    pub semester: i64,
    pub questions: Vec<PublicQuestion>,
}

impl From<TestPaper> for PublicTestPaper {
    fn from(paper: TestPaper) -> Self {
        Self {
            id: paper.id,
            grade: paper.grade,
            semester: paper.semester,
            questions: paper.questions.0.into_iter().map(PublicQuestion::from).collect(),
        }
    }
}

/// Row for the admin paper listing (questions omitted).
#[derive(Debug, Serialize, FromRow)]
pub struct TestPaperSummary {
    pub id: i64,
    pub grade: i64,
    pub semester: i64,
    #[serde(serialize_with = "crate::models::sqlite_datetime::serialize")]
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// DTO for creating or replacing the paper of a grade/semester.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveTestPaperRequest {
    #[validate(range(min = 1, max = 6, message = "Grade must be between 1 and 6."))]
    pub grade: i64,
    #[validate(range(min = 1, max = 2, message = "Semester must be 1 or 2."))]
    pub semester: i64,
    #[validate(length(min = 1), custom(function = validate_questions))]
    pub questions: Vec<Question>,
}

fn validate_questions(questions: &[Question]) -> Result<(), validator::ValidationError> {
    let mut seen = HashSet::new();
    for q in questions {
        if q.validate().is_err() {
            return Err(validator::ValidationError::new("invalid_question"));
        }
        if q.choices.iter().any(|c| c.trim().is_empty()) {
            return Err(validator::ValidationError::new("choice_cannot_be_empty"));
        }
        if !seen.insert(q.question_number) {
            return Err(validator::ValidationError::new("duplicate_question_number"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(number: i64, answer: i64) -> Question {
        Question {
            question_number: number,
            image_url: None,
            choices: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            answer,
        }
    }

    fn request(questions: Vec<Question>) -> SaveTestPaperRequest {
        SaveTestPaperRequest {
            grade: 3,
            semester: 1,
            questions,
        }
    }

    #[test]
    fn accepts_well_formed_paper() {
        assert!(request(vec![question(1, 1), question(2, 4)]).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_grade_and_semester() {
        let mut req = request(vec![question(1, 1)]);
        req.grade = 7;
        assert!(req.validate().is_err());

        let mut req = request(vec![question(1, 1)]);
        req.semester = 3;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_empty_question_list() {
        assert!(request(vec![]).validate().is_err());
    }

    #[test]
    fn rejects_bad_questions() {
        assert!(request(vec![question(1, 0)]).validate().is_err());
        assert!(request(vec![question(1, 5)]).validate().is_err());

        let mut three_choices = question(1, 1);
        three_choices.choices.pop();
        assert!(request(vec![three_choices]).validate().is_err());

        let mut blank_choice = question(1, 1);
        blank_choice.choices[2] = "  ".into();
        assert!(request(vec![blank_choice]).validate().is_err());

        assert!(request(vec![question(1, 1), question(1, 2)]).validate().is_err());
    }

    #[test]
    fn public_paper_drops_answers() {
        let paper = TestPaper {
            id: 9,
            grade: 2,
            semester: 2,
            created_at: None,
            questions: Json(vec![question(1, 3)]),
        };

        let value = serde_json::to_value(PublicTestPaper::from(paper)).unwrap();
        let q = &value["questions"][0];
        assert_eq!(q["question_number"], 1);
        assert!(q.get("answer").is_none());
        assert!(q.get("image_url").is_none());
    }
}
