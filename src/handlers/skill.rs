use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::PaginationParams;
use crate::middlewares::AuthUser;
use crate::models::{CreateSkill, Skill, UpdateSkill};
use crate::repositories::{OwnedRepository, SkillRepository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSkillRequest {
    pub name: String,
    pub description: Option<String>,
    /// Proficiency level, 1 through 5 inclusive
    pub level: i16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<i16>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub level: i16,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Skill> for SkillResponse {
    fn from(s: Skill) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            name: s.name,
            description: s.description,
            level: s.level,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillListResponse {
    pub data: Vec<SkillResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

// ============ Handlers ============

/// Create a new skill
#[utoipa::path(
    post,
    path = "/api/skills",
    request_body = CreateSkillRequest,
    responses(
        (status = 200, description = "Skill created successfully", body = SkillResponse),
        (status = 401, description = "Unauthorized"),
        (status = 400, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn create_skill(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateSkillRequest>,
) -> AppResult<Json<SkillResponse>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let create_skill = CreateSkill {
        name: payload.name,
        description: payload.description,
        level: payload.level,
    };

    let skill = SkillRepository::create(&state.db, user.id, &create_skill).await?;
    Ok(Json(skill.into()))
}

/// List all skills for the current user, newest first
#[utoipa::path(
    get,
    path = "/api/skills",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of skills", body = SkillListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn list_skills(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<SkillListResponse>> {
    let (limit, offset) = params.resolve();

    let skills = SkillRepository::list_for_user(&state.db, user.id, limit, offset).await?;
    let total = SkillRepository::count_for_user(&state.db, user.id).await?;

    Ok(Json(SkillListResponse {
        data: skills.into_iter().map(|s| s.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a skill by ID
#[utoipa::path(
    get,
    path = "/api/skills/{id}",
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill details", body = SkillResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Skill not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn get_skill(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SkillResponse>> {
    let skill = SkillRepository::find_for_user(&state.db, id, user.id).await?;
    Ok(Json(skill.into()))
}

/// Update a skill
#[utoipa::path(
    put,
    path = "/api/skills/{id}",
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    request_body = UpdateSkillRequest,
    responses(
        (status = 200, description = "Skill updated successfully", body = SkillResponse),
        (status = 401, description = "Unauthorized"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Skill not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn update_skill(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSkillRequest>,
) -> AppResult<Json<SkillResponse>> {
    let update_skill = UpdateSkill {
        name: payload.name,
        description: payload.description,
        level: payload.level,
    };

    let skill = SkillRepository::update(&state.db, id, user.id, &update_skill).await?;
    Ok(Json(skill.into()))
}

/// Delete a skill (links to projects are removed with it)
#[utoipa::path(
    delete,
    path = "/api/skills/{id}",
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Skill not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Skills"
)]
pub async fn delete_skill(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<()> {
    SkillRepository::delete_for_user(&state.db, id, user.id).await?;
    Ok(())
}
