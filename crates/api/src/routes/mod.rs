//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//! GET  /uploads/*                     - Static image files
//!
//! # Users (JSON, /api/v1)
//! POST /api/v1/users                  - Register, returns {user, token}
//! GET  /api/v1/users                  - Authenticated user + orphanage listing
//!
//! # Orphanages (JSON, /api/v1)
//! GET    /api/v1/orphanages           - List all orphanages
//! GET    /api/v1/orphanages/{id}      - Orphanage detail
//! POST   /api/v1/orphanages           - Create (multipart, bearer token)
//! PUT    /api/v1/orphanages/{id}      - Update columns (bearer token)
//! DELETE /api/v1/orphanages/{id}      - Delete with images (bearer token)
//! DELETE /api/v1/orphanages/image/{id} - Delete one image (bearer token)
//! ```

pub mod orphanages;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the versioned API router.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register).get(users::me))
        .route("/orphanages", get(orphanages::index).post(orphanages::create))
        .route(
            "/orphanages/{id}",
            get(orphanages::show)
                .put(orphanages::update)
                .delete(orphanages::destroy),
        )
        .route("/orphanages/image/{id}", delete(orphanages::delete_image))
}
