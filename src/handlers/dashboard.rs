use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::handlers::{ProjectResponse, SkillResponse};
use crate::middlewares::AuthUser;
use crate::models::{DashboardStats, LevelDistribution};
use crate::services::DashboardService;
use crate::state::AppState;

// ============ Response DTO ============

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub total_skills: u64,
    pub total_projects: u64,
    pub projects_in_progress: u64,
    pub projects_completed: u64,
    pub projects_paused: u64,
    pub level_distribution: LevelDistribution,
    pub recent_projects: Vec<ProjectResponse>,
    pub recent_skills: Vec<SkillResponse>,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_skills: stats.total_skills,
            total_projects: stats.total_projects,
            projects_in_progress: stats.projects_in_progress,
            projects_completed: stats.projects_completed,
            projects_paused: stats.projects_paused,
            level_distribution: stats.level_distribution,
            recent_projects: stats.recent_projects.into_iter().map(|p| p.into()).collect(),
            recent_skills: stats.recent_skills.into_iter().map(|s| s.into()).collect(),
        }
    }
}

// ============ Handler ============

/// Get the dashboard summary for the current user
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardStatsResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard_stats(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStatsResponse>> {
    let stats = DashboardService::compute_stats(&state.db, user.id).await?;
    Ok(Json(stats.into()))
}
