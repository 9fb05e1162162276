use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::State;

pub mod admin;
pub mod visitor;

/// Authenticated organizer console API.
pub fn admin_router(state: Arc<State>) -> Router {
    Router::new()
        .route(
            "/api/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route("/api/projects/edit/{project_id}", get(admin::get_editing_project))
        .route(
            "/api/projects/{project_id}",
            post(admin::update_project).delete(admin::delete_project),
        )
        .with_state(state)
}

/// Public read-only listing.
pub fn visitor_router(state: Arc<State>) -> Router {
    Router::new()
        .route("/api/projects", get(visitor::list_projects))
        .with_state(state)
}
