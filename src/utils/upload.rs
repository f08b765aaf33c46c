// src/utils/upload.rs

use std::path::Path;

use crate::error::AppError;

/// Extensions accepted for question images.
const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// Public URL prefix under which the upload directory is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Checks that an uploaded file is a supported image and returns its
/// lower-cased extension.
pub fn validate_image_upload(filename: &str, content_type: &str) -> Result<String, AppError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| AppError::BadRequest("Only image files can be uploaded (jpeg, jpg, png, gif)".to_string()))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(format!(
            "File extension '{}' is not allowed",
            extension
        )));
    }

    let mime = content_type.trim().to_ascii_lowercase();
    if !mime_allowed_for_extension(&mime, &extension) {
        return Err(AppError::BadRequest(format!(
            "MIME type '{}' does not match extension '.{}'",
            mime, extension
        )));
    }

    Ok(extension)
}

fn mime_allowed_for_extension(mime: &str, extension: &str) -> bool {
    match extension {
        "jpg" | "jpeg" => matches!(mime, "image/jpeg" | "image/jpg"),
        "png" => mime == "image/png",
        "gif" => mime == "image/gif",
        _ => false,
    }
}

/// Builds a collision-free stored file name: `<unix millis>-<uuid>.<ext>`.
pub fn unique_file_name(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension
    )
}

/// Writes the image into `dir` and returns the public URL it is served at.
pub async fn store_image(dir: &Path, extension: &str, bytes: &[u8]) -> Result<String, AppError> {
    tokio::fs::create_dir_all(dir).await?;

    let file_name = unique_file_name(extension);
    tokio::fs::write(dir.join(&file_name), bytes).await?;

    tracing::info!("Stored uploaded image {} ({} bytes)", file_name, bytes.len());

    Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
}
