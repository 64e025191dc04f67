pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::dashboard::{handlers as dashboard, websocket};
use crate::evaluation::handlers as evaluations;
use crate::jobs::handlers as jobs;
use crate::rate_limit;
use crate::state::AppState;

/// Resume uploads are the largest bodies we accept.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Candidate API
        .route(
            "/api/candidates",
            get(candidates::handle_list).post(candidates::handle_create),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::handle_get)
                .put(candidates::handle_update)
                .delete(candidates::handle_delete),
        )
        .route(
            "/api/candidates/:id/resume",
            post(candidates::handle_upload_resume),
        )
        .route(
            "/api/candidates/:id/evaluate",
            post(candidates::handle_evaluate),
        )
        .route(
            "/api/candidates/:id/contact",
            post(candidates::handle_contact),
        )
        // Job API
        .route("/api/jobs", get(jobs::handle_list).post(jobs::handle_create))
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get)
                .put(jobs::handle_update)
                .delete(jobs::handle_delete),
        )
        // Evaluation API
        .route(
            "/api/evaluations/skills",
            post(evaluations::handle_evaluate_skills),
        )
        .route(
            "/api/evaluations/questions",
            post(evaluations::handle_questions),
        )
        // Dashboard
        .route("/api/dashboard/stats", get(dashboard::handle_stats))
        .route(
            "/api/dashboard/recent-candidates",
            get(dashboard::handle_recent_candidates),
        )
        .route("/ws/dashboard", get(websocket::ws_upgrade))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let api = match state.rate_limiter.clone() {
        Some(limiter) => api.layer(middleware::from_fn_with_state(limiter, rate_limit::limit)),
        None => api,
    };

    api.route("/health", get(health::health_handler))
        .with_state(state)
}
