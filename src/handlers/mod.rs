pub mod auth;
pub mod common;
pub mod dashboard;
pub mod project;
pub mod skill;

pub use auth::{login, me, register, AuthResponse, LoginRequest, RegisterRequest};
pub use common::PaginationParams;
pub use dashboard::{get_dashboard_stats, DashboardStatsResponse};
pub use project::{
    create_project, delete_project, get_project, get_project_with_skills, list_projects,
    update_project, CreateProjectRequest, ProjectListResponse, ProjectResponse,
    ProjectWithSkillsResponse, UpdateProjectRequest,
};
pub use skill::{
    create_skill, delete_skill, get_skill, list_skills, update_skill, CreateSkillRequest,
    SkillListResponse, SkillResponse, UpdateSkillRequest,
};
