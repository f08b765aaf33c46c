// src/models/test_result.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::models::{test_paper::Question, validate_not_blank};

/// Represents the 'test_results' table in the database.
/// Rows are written once per submission and never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestResult {
    pub id: i64,
    pub student_name: String,
    pub student_phone: String,
    pub grade: i64,
    pub semester: i64,
    pub test_paper_id: i64,
    #[serde(serialize_with = "crate::models::sqlite_datetime::serialize")]
    pub taken_at: Option<chrono::NaiveDateTime>,
    pub answers: Json<Vec<Answer>>,
    /// Percentage score, 0 to 100.
    pub score: i64,
    pub correct_count: i64,
}

/// A result joined with the questions of the paper it was graded against.
#[derive(Debug, Serialize, FromRow)]
pub struct ResultDetail {
    pub id: i64,
    pub student_name: String,
    pub student_phone: String,
    pub grade: i64,
    pub semester: i64,
    pub test_paper_id: i64,
    #[serde(serialize_with = "crate::models::sqlite_datetime::serialize")]
    pub taken_at: Option<chrono::NaiveDateTime>,
    pub answers: Json<Vec<Answer>>,
    pub score: i64,
    pub correct_count: i64,
    pub questions: Json<Vec<Question>>,
}

/// One selected choice on a submitted test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_number: i64,
    /// 1-based index of the chosen option.
    pub selected_answer: i64,
}

/// DTO for submitting a finished test.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTestRequest {
    #[validate(length(max = 50), custom(function = validate_not_blank))]
    pub student_name: String,
    #[validate(length(max = 20), custom(function = validate_not_blank))]
    pub student_phone: String,
    #[validate(range(min = 1, max = 6))]
    pub grade: i64,
    #[validate(range(min = 1, max = 2))]
    pub semester: i64,
    #[validate(range(min = 1))]
    pub test_paper_id: i64,
    pub answers: Vec<Answer>,
}

/// Outcome returned to the student after grading.
#[derive(Debug, Serialize)]
pub struct SubmitTestResponse {
    pub id: i64,
    pub score: i64,
    pub correct_count: i64,
    pub total: i64,
}

/// Query parameters for the admin result listing.
/// Values arrive as raw strings so that empty form fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub search: Option<String>,
    pub grade: Option<String>,
    pub semester: Option<String>,
}
