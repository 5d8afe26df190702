use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::skill::SkillResponse;
use crate::handlers::PaginationParams;
use crate::middlewares::AuthUser;
use crate::models::{CreateProject, Project, ProjectStatus, ProjectWithSkills, UpdateProject};
use crate::repositories::{OwnedRepository, ProjectRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "2024-01-15")]
    pub start_date: Option<Date>,
    #[schema(value_type = Option<String>, example = "2024-06-30")]
    pub end_date: Option<Date>,
    /// One of "in_progress", "completed", "paused"; defaults to "in_progress"
    pub status: Option<String>,
    /// Skills to link to the new project
    #[serde(default)]
    pub skill_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub start_date: Option<Date>,
    #[schema(value_type = Option<String>)]
    pub end_date: Option<Date>,
    pub status: Option<String>,
    /// Replaces the project's entire link set; an empty or omitted list
    /// unlinks every skill
    #[serde(default)]
    pub skill_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub start_date: Option<Date>,
    #[schema(value_type = Option<String>)]
    pub end_date: Option<Date>,
    pub status: ProjectStatus,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            description: p.description,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectWithSkillsResponse {
    pub project: ProjectResponse,
    pub skills: Vec<SkillResponse>,
}

impl From<ProjectWithSkills> for ProjectWithSkillsResponse {
    fn from(p: ProjectWithSkills) -> Self {
        Self {
            project: p.project.into(),
            skills: p.skills.into_iter().map(|s| s.into()).collect(),
        }
    }
}

/// Parse a status string from form input, defaulting when absent
fn parse_status(status: Option<&str>) -> AppResult<ProjectStatus> {
    match status {
        None => Ok(ProjectStatus::default()),
        Some(value) => ProjectStatus::parse(value)
            .ok_or_else(|| AppError::Validation(format!("Unknown project status: {}", value))),
    }
}

// ============ Handlers ============

/// Create a new project, optionally linked to existing skills
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 400, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let create_project = CreateProject {
        name: payload.name,
        description: payload.description,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: parse_status(payload.status.as_deref())?,
        skill_ids: payload.skill_ids,
    };

    let project = ProjectRepository::create(&state.db, user.id, &create_project).await?;
    Ok(Json(project.into()))
}

/// List all projects for the current user, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let (limit, offset) = params.resolve();

    let projects = ProjectRepository::list_for_user(&state.db, user.id, limit, offset).await?;
    let total = ProjectRepository::count_for_user(&state.db, user.id).await?;

    Ok(Json(ProjectListResponse {
        data: projects.into_iter().map(|p| p.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn get_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectResponse>> {
    let project = ProjectRepository::find_for_user(&state.db, id, user.id).await?;
    Ok(Json(project.into()))
}

/// Get a project together with its linked skills
#[utoipa::path(
    get,
    path = "/api/projects/{id}/skills",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project with linked skills", body = ProjectWithSkillsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn get_project_with_skills(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectWithSkillsResponse>> {
    let project = ProjectRepository::find_with_skills(&state.db, id, user.id).await?;
    Ok(Json(project.into()))
}

/// Update a project and replace its skill link set
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let status = match payload.status.as_deref() {
        None => None,
        Some(value) => Some(
            ProjectStatus::parse(value)
                .ok_or_else(|| AppError::Validation(format!("Unknown project status: {}", value)))?,
        ),
    };

    let update_project = UpdateProject {
        name: payload.name,
        description: payload.description,
        start_date: payload.start_date,
        end_date: payload.end_date,
        status,
        skill_ids: payload.skill_ids,
    };

    let project = ProjectRepository::update(&state.db, id, user.id, &update_project).await?;
    Ok(Json(project.into()))
}

/// Delete a project and its skill links
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<()> {
    ProjectRepository::delete_for_user(&state.db, id, user.id).await?;
    Ok(())
}
