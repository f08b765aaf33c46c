// src/handlers/student.rs

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    extractors::{json::AppJson, path::AppPath},
    models::{
        test_paper::{PublicTestPaper, Question, TestPaper},
        test_result::{SubmitTestRequest, SubmitTestResponse},
    },
    utils::score::grade_answers,
};

/// Returns the paper for a grade/semester with the answer key stripped.
pub async fn get_test_paper(
    State(pool): State<SqlitePool>,
    AppPath((grade, semester)): AppPath<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let paper = sqlx::query_as::<_, TestPaper>(
        r#"
        SELECT id, grade, semester, created_at, questions
        FROM test_papers
        WHERE grade = ? AND semester = ?
        "#,
    )
    .bind(grade)
    .bind(semester)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch test paper: {:?}", e);
        AppError::from(e)
    })?
    .ok_or(AppError::NotFound(
        "There is no test for this grade and semester yet. Please contact the administrator."
            .to_string(),
    ))?;

    Ok(Json(json!({
        "success": true,
        "data": PublicTestPaper::from(paper)
    })))
}

/// Grades a finished test and records the result.
///
/// * Loads the referenced paper (404 if it does not exist, nothing is stored).
/// * Scores against the paper's full question count.
/// * Inserts a new `test_results` row on every call.
pub async fn submit_test(
    State(pool): State<SqlitePool>,
    AppJson(req): AppJson<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let questions = sqlx::query_scalar::<_, sqlx::types::Json<Vec<Question>>>(
        "SELECT questions FROM test_papers WHERE id = ?",
    )
    .bind(req.test_paper_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Test paper not found".to_string()))?;

    let grade = grade_answers(&questions, &req.answers);
    let answers_json = serde_json::to_string(&req.answers)?;

    let id = sqlx::query(
        r#"
        INSERT INTO test_results
        (student_name, student_phone, grade, semester, test_paper_id, answers, score, correct_count)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.student_name.trim())
    .bind(req.student_phone.trim())
    .bind(req.grade)
    .bind(req.semester)
    .bind(req.test_paper_id)
    .bind(&answers_json)
    .bind(grade.score)
    .bind(grade.correct_count)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to save test result: {:?}", e);
        AppError::from(e)
    })?
    .last_insert_rowid();

    tracing::info!(
        "Result {} recorded for paper {}: {}/{} correct, score {}",
        id,
        req.test_paper_id,
        grade.correct_count,
        grade.total,
        grade.score
    );

    let outcome = SubmitTestResponse {
        id,
        score: grade.score,
        correct_count: grade.correct_count,
        total: grade.total,
    };

    Ok(Json(json!({ "success": true, "data": outcome })))
}
