// Library crate for SkillTracker
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    create_project, create_skill, delete_project, delete_skill, get_dashboard_stats, get_project,
    get_project_with_skills, get_skill, list_projects, list_skills, login, me, register,
    update_project, update_skill,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Auth & User routes
        .route("/api/auth/me", get(me))
        // Skill routes
        .route("/api/skills", get(list_skills))
        .route("/api/skills", post(create_skill))
        .route("/api/skills/{id}", get(get_skill))
        .route("/api/skills/{id}", put(update_skill))
        .route("/api/skills/{id}", delete(delete_skill))
        // Project routes
        .route("/api/projects", get(list_projects))
        .route("/api/projects", post(create_project))
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}/skills", get(get_project_with_skills))
        .route("/api/projects/{id}", put(update_project))
        .route("/api/projects/{id}", delete(delete_project))
        // Dashboard routes
        .route("/api/dashboard/stats", get(get_dashboard_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, SkillTracker!" }))
        // Public auth routes
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
