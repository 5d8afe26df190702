use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{DashboardStats, LevelDistribution, ProjectStatus};
use crate::repositories::{OwnedRepository, ProjectRepository, SkillRepository};

/// How many recent projects/skills the summary carries
const RECENT_LIMIT: u64 = 3;

/// Read-only aggregator composing skill and project reads into a single
/// per-user summary. It issues no writes and depends only on the two
/// repositories' read operations.
pub struct DashboardService;

impl DashboardService {
    /// Compute the dashboard summary for one user. The sub-fetches are
    /// independent reads and run concurrently; if any of them fails the whole
    /// computation fails rather than returning silently-zeroed fields.
    pub async fn compute_stats(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> AppResult<DashboardStats> {
        let (
            total_skills,
            total_projects,
            projects_in_progress,
            projects_completed,
            projects_paused,
            levels,
            recent_projects,
            recent_skills,
        ) = tokio::try_join!(
            SkillRepository::count_for_user(db, user_id),
            ProjectRepository::count_for_user(db, user_id),
            ProjectRepository::count_by_status(db, user_id, ProjectStatus::InProgress),
            ProjectRepository::count_by_status(db, user_id, ProjectStatus::Completed),
            ProjectRepository::count_by_status(db, user_id, ProjectStatus::Paused),
            SkillRepository::levels_for_user(db, user_id),
            ProjectRepository::recent_for_user(db, user_id, RECENT_LIMIT),
            SkillRepository::recent_for_user(db, user_id, RECENT_LIMIT),
        )?;

        Ok(DashboardStats {
            total_skills,
            total_projects,
            projects_in_progress,
            projects_completed,
            projects_paused,
            level_distribution: LevelDistribution::from_levels(&levels),
            recent_projects,
            recent_skills,
        })
    }
}
