use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Project, Skill, MAX_LEVEL, MIN_LEVEL};

/// Fixed-bucket histogram of skill proficiency levels (1 through 5)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct LevelDistribution {
    pub level_1: u64,
    pub level_2: u64,
    pub level_3: u64,
    pub level_4: u64,
    pub level_5: u64,
}

impl LevelDistribution {
    /// Build the histogram from raw stored levels. Levels outside [1,5] can
    /// only come from data written before the range constraint existed; they
    /// are logged and skipped rather than crashing the dashboard.
    pub fn from_levels(levels: &[i16]) -> Self {
        let mut dist = Self::default();
        for &level in levels {
            dist.record(level);
        }
        dist
    }

    fn record(&mut self, level: i16) {
        match level {
            1 => self.level_1 += 1,
            2 => self.level_2 += 1,
            3 => self.level_3 += 1,
            4 => self.level_4 += 1,
            5 => self.level_5 += 1,
            other => {
                tracing::warn!(
                    level = other,
                    "skill level outside [{}, {}] ignored in distribution",
                    MIN_LEVEL,
                    MAX_LEVEL
                );
            }
        }
    }
}

/// Per-user summary computed by the dashboard aggregator
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_skills: u64,
    pub total_projects: u64,
    pub projects_in_progress: u64,
    pub projects_completed: u64,
    pub projects_paused: u64,
    pub level_distribution: LevelDistribution,
    pub recent_projects: Vec<Project>,
    pub recent_skills: Vec<Skill>,
}
