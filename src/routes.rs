// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{admin, student},
    state::AppState,
    utils::upload::UPLOADS_URL_PREFIX,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Assembles the main application router.
///
/// * Admin routes under `/api/admin`, student routes under `/api`.
/// * Uploaded images served from the upload directory under `/uploads`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_file_size + MULTIPART_OVERHEAD;

    let admin_routes = Router::new()
        .route("/login", post(admin::login))
        .route(
            "/upload-image",
            post(admin::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/test-papers",
            get(admin::list_test_papers).post(admin::save_test_paper),
        )
        .route("/test-papers/{grade}/{semester}", get(admin::get_test_paper))
        .route("/results", get(admin::list_results))
        .route(
            "/results/student/{name}/{phone}",
            get(admin::list_student_results),
        )
        .route("/results/{id}", get(admin::get_result));

    let student_routes = Router::new()
        .route("/test-papers/{grade}/{semester}", get(student::get_test_paper))
        .route("/submit-test", post(student::submit_test));

    let uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .nest("/api/admin", admin_routes)
        .nest("/api", student_routes)
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
