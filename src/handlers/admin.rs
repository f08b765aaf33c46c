// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Multipart, Query, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    extractors::{json::AppJson, path::AppPath},
    models::{
        admin::{Admin, LoginRequest},
        test_paper::{SaveTestPaperRequest, TestPaper, TestPaperSummary},
        test_result::{ResultDetail, ResultsQuery, TestResult},
    },
    utils::upload::{store_image, validate_image_upload},
};

/// Checks admin credentials.
///
/// No token is issued; the client keeps its own logged-in flag.
pub async fn login(
    State(pool): State<SqlitePool>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = sqlx::query_as::<_, Admin>(
        r#"
        SELECT id, username, password, created_at
        FROM admins
        WHERE username = ? AND password = ?
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.password)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    let admin = admin.ok_or(AppError::AuthError("Invalid username or password".to_string()))?;
    tracing::info!("Admin '{}' logged in", admin.username);

    Ok(Json(json!({
        "success": true,
        "message": "Login successful"
    })))
}

/// Accepts a multipart `image` field and stores it in the upload directory.
pub async fn upload_image(
    State(config): State<Config>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let extension = validate_image_upload(&filename, &content_type)?;

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded image is empty".to_string()));
        }
        if bytes.len() > config.max_file_size {
            return Err(AppError::BadRequest(format!(
                "File size exceeds the {} byte limit",
                config.max_file_size
            )));
        }

        let image_url = store_image(&config.upload_dir, &extension, &bytes).await?;

        return Ok(Json(json!({
            "success": true,
            "imageUrl": image_url
        })));
    }

    Err(AppError::BadRequest("No image file provided".to_string()))
}

/// Creates the paper for a grade/semester, or replaces its questions if one exists.
pub async fn save_test_paper(
    State(pool): State<SqlitePool>,
    AppJson(mut payload): AppJson<SaveTestPaperRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    for q in &mut payload.questions {
        if q.image_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            q.image_url = None;
        }
    }
    let questions_json = serde_json::to_string(&payload.questions)?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM test_papers WHERE grade = ? AND semester = ?")
            .bind(payload.grade)
            .bind(payload.semester)
            .fetch_optional(&pool)
            .await?;

    if let Some(id) = existing {
        sqlx::query(
            r#"
            UPDATE test_papers
            SET questions = ?, created_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&questions_json)
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update test paper: {:?}", e);
            AppError::from(e)
        })?;

        tracing::info!(
            "Replaced test paper {} (grade {}, semester {}) with {} questions",
            id,
            payload.grade,
            payload.semester,
            payload.questions.len()
        );

        return Ok(Json(json!({
            "success": true,
            "message": "Test paper updated",
            "id": id
        })));
    }

    let id = sqlx::query(
        r#"
        INSERT INTO test_papers (grade, semester, questions)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(payload.grade)
    .bind(payload.semester)
    .bind(&questions_json)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create test paper: {:?}", e);
        AppError::from(e)
    })?
    .last_insert_rowid();

    tracing::info!(
        "Created test paper {} (grade {}, semester {})",
        id,
        payload.grade,
        payload.semester
    );

    Ok(Json(json!({
        "success": true,
        "message": "Test paper created",
        "id": id
    })))
}

/// Lists every paper without its questions, ordered by grade then semester.
pub async fn list_test_papers(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let papers = sqlx::query_as::<_, TestPaperSummary>(
        "SELECT id, grade, semester, created_at FROM test_papers ORDER BY grade, semester",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(json!({ "success": true, "data": papers })))
}

/// Retrieves a full paper, answers included.
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
    .await?
    .ok_or(AppError::NotFound("Test paper not found".to_string()))?;

    Ok(Json(json!({ "success": true, "data": paper })))
}

/// Lists submitted results, newest first.
///
/// `search` matches anywhere in the student's name or phone number;
/// `grade` and `semester` narrow the list when present.
pub async fn list_results(
    State(pool): State<SqlitePool>,
    Query(params): Query<ResultsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let search = non_empty(params.search);
    let grade = parse_filter("grade", params.grade)?;
    let semester = parse_filter("semester", params.semester)?;

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        r#"
        SELECT id, student_name, student_phone, grade, semester, test_paper_id,
               taken_at, answers, score, correct_count
        FROM test_results
        WHERE 1 = 1
        "#,
    );

    if let Some(search) = search {
        let pattern = format!("%{}%", search);
        builder.push(" AND (student_name LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR student_phone LIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some(grade) = grade {
        builder.push(" AND grade = ");
        builder.push_bind(grade);
    }

    if let Some(semester) = semester {
        builder.push(" AND semester = ");
        builder.push_bind(semester);
    }

    builder.push(" ORDER BY taken_at DESC, id DESC");

    let results: Vec<TestResult> = builder
        .build_query_as()
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list results: {:?}", e);
            AppError::from(e)
        })?;

    Ok(Json(json!({ "success": true, "data": results })))
}

/// Lists every attempt of one student, identified by name and phone.
pub async fn list_student_results(
    State(pool): State<SqlitePool>,
    AppPath((name, phone)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let results = sqlx::query_as::<_, TestResult>(
        r#"
        SELECT id, student_name, student_phone, grade, semester, test_paper_id,
               taken_at, answers, score, correct_count
        FROM test_results
        WHERE student_name = ? AND student_phone = ?
        ORDER BY taken_at DESC, id DESC
        "#,
    )
    .bind(name)
    .bind(phone)
    .fetch_all(&pool)
    .await?;

    Ok(Json(json!({ "success": true, "data": results })))
}

/// Retrieves one result together with its paper's questions, so each
/// selected answer can be shown next to the correct one.
pub async fn get_result(
    State(pool): State<SqlitePool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = sqlx::query_as::<_, ResultDetail>(
        r#"
        SELECT tr.id, tr.student_name, tr.student_phone, tr.grade, tr.semester,
               tr.test_paper_id, tr.taken_at, tr.answers, tr.score, tr.correct_count,
               tp.questions
        FROM test_results tr
        JOIN test_papers tp ON tr.test_paper_id = tp.id
        WHERE tr.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Result not found".to_string()))?;

    Ok(Json(json!({ "success": true, "data": detail })))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_filter(name: &str, value: Option<String>) -> Result<Option<i64>, AppError> {
    non_empty(value)
        .map(|v| {
            v.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid {} filter: {}", name, v)))
        })
        .transpose()
}
