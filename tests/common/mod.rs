// tests/common/mod.rs

#![allow(dead_code)]

use saimath::{config::Config, db, routes, state::AppState};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub pool: SqlitePool,
    pub upload_dir: TempDir,
}

/// Spawns the app on a random port against a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    db::init_schema(&pool).await.expect("Failed to create schema");
    db::seed_admin(&pool, "admin", "admin123")
        .await
        .expect("Failed to seed admin");

    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        upload_dir: upload_dir.path().to_path_buf(),
        max_file_size: 1024,
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
        rust_log: "error".to_string(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
        pool,
        upload_dir,
    }
}

/// `count` questions whose correct choice is always 2.
pub fn questions(count: i64) -> Vec<Value> {
    (1..=count)
        .map(|n| {
            json!({
                "question_number": n,
                "choices": [format!("{}", n), format!("{}", n + 1), format!("{}", n + 2), format!("{}", n + 3)],
                "answer": 2
            })
        })
        .collect()
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Saves a paper through the admin API and returns its id.
    pub async fn save_paper(&self, grade: i64, semester: i64, questions: Vec<Value>) -> i64 {
        let resp = self
            .client
            .post(self.url("/api/admin/test-papers"))
            .json(&json!({ "grade": grade, "semester": semester, "questions": questions }))
            .send()
            .await
            .expect("Failed to save paper");
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        body["id"].as_i64().expect("paper id")
    }

    /// Submits `(question_number, selected_answer)` pairs against `paper_id`.
    pub async fn submit(
        &self,
        name: &str,
        phone: &str,
        grade: i64,
        semester: i64,
        paper_id: i64,
        answers: Vec<(i64, i64)>,
    ) -> reqwest::Response {
        let answers: Vec<Value> = answers
            .into_iter()
            .map(|(n, choice)| json!({ "question_number": n, "selected_answer": choice }))
            .collect();

        self.client
            .post(self.url("/api/submit-test"))
            .json(&json!({
                "student_name": name,
                "student_phone": phone,
                "grade": grade,
                "semester": semester,
                "test_paper_id": paper_id,
                "answers": answers
            }))
            .send()
            .await
            .expect("Failed to submit test")
    }

    pub async fn result_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM test_results")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
