use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lowest valid proficiency level (inclusive)
pub const MIN_LEVEL: i16 = 1;
/// Highest valid proficiency level (inclusive)
pub const MAX_LEVEL: i16 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub level: i16,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateSkill {
    pub name: String,
    pub description: Option<String>,
    pub level: i16,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkill {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<i16>,
}

/// Check a proficiency level against the valid [1,5] range
pub fn validate_level(level: i16) -> Result<(), String> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(format!(
            "level must be between {} and {}, got {}",
            MIN_LEVEL, MAX_LEVEL, level
        ))
    }
}
