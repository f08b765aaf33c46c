// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Default upper bound for an uploaded image (5 MB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Directory holding uploaded question images, served under `/uploads`.
    pub upload_dir: PathBuf,
    pub max_file_size: usize,
    pub admin_username: String,
    pub admin_password: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/saimath.db".to_string());

        let port = parse_or("PORT", 3001);

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let max_file_size = parse_or("MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE);

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            port,
            upload_dir,
            max_file_size,
            admin_username,
            admin_password,
            rust_log,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
