use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Skill;

/// Project lifecycle status. Stored as text in the database; anything outside
/// this closed set is rejected at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Paused => "paused",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(ProjectStatus::InProgress),
            "completed" => Some(ProjectStatus::Completed),
            "paused" => Some(ProjectStatus::Paused),
            _ => None,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::InProgress
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: ProjectStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A project together with its linked skills
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithSkills {
    pub project: Project,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: ProjectStatus,
    pub skill_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<ProjectStatus>,
    /// Replaces the full link set, so `[]` clears every existing link
    pub skill_ids: Vec<Uuid>,
}
