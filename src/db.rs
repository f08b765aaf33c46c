// src/db.rs

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const CREATE_TEST_PAPERS: &str = r#"
CREATE TABLE IF NOT EXISTS test_papers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    grade INTEGER NOT NULL CHECK(grade BETWEEN 1 AND 6),
    semester INTEGER NOT NULL CHECK(semester IN (1, 2)),
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    questions TEXT NOT NULL,
    UNIQUE(grade, semester)
)
"#;

const CREATE_TEST_RESULTS: &str = r#"
CREATE TABLE IF NOT EXISTS test_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_name TEXT NOT NULL,
    student_phone TEXT NOT NULL,
    grade INTEGER NOT NULL,
    semester INTEGER NOT NULL,
    test_paper_id INTEGER NOT NULL,
    taken_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    answers TEXT NOT NULL,
    score INTEGER NOT NULL,
    correct_count INTEGER NOT NULL,
    FOREIGN KEY (test_paper_id) REFERENCES test_papers(id)
)
"#;

const CREATE_ADMINS: &str = r#"
CREATE TABLE IF NOT EXISTS admins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Opens a pool on the SQLite database at `database_url`.
///
/// The database file (and its directory) is created when missing, and
/// foreign keys are enforced on every connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(sqlx::Error::Io)?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates the tables if they do not exist yet. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_TEST_PAPERS, CREATE_TEST_RESULTS, CREATE_ADMINS] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database schema ready.");
    Ok(())
}

/// Inserts the configured admin account unless that username already exists.
pub async fn seed_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<(), sqlx::Error> {
    let result = sqlx::query("INSERT OR IGNORE INTO admins (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(password)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        tracing::info!("Seeded admin user: {}", username);
    }
    Ok(())
}
