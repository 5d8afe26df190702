use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::skill::{self, ActiveModel, Column, Entity as SkillEntity};
use crate::error::{AppError, AppResult};
use crate::models::{validate_level, CreateSkill, Skill, UpdateSkill};
use crate::repositories::OwnedRepository;

/// Skill repository for database operations
pub struct SkillRepository;

#[async_trait]
impl OwnedRepository<Skill> for SkillRepository {
    async fn find_for_user(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> AppResult<Skill> {
        let model = SkillEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill".to_string()))?;

        Ok(model.into())
    }

    async fn list_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Skill>> {
        let models = SkillEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<u64> {
        let count = SkillEntity::find()
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Delete a skill. Link rows referencing it are removed by the database
    /// cascade, so linked projects simply lose the skill.
    async fn delete_for_user(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = SkillEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Skill".to_string()));
        }

        Ok(())
    }
}

impl SkillRepository {
    /// Create a new skill. The level is validated before anything touches the
    /// database, so an out-of-range value never persists a row.
    pub async fn create(
        db: &DatabaseConnection,
        user_id: Uuid,
        input: &CreateSkill,
    ) -> AppResult<Skill> {
        validate_level(input.level).map_err(AppError::Validation)?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            level: Set(input.level),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Update a skill (with ownership check)
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        user_id: Uuid,
        input: &UpdateSkill,
    ) -> AppResult<Skill> {
        if let Some(level) = input.level {
            validate_level(level).map_err(AppError::Validation)?;
        }

        let model = SkillEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(level) = input.level {
            active.level = Set(level);
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Fetch only the level column for a user's skills (dashboard histogram)
    pub async fn levels_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Vec<i16>> {
        let levels = SkillEntity::find()
            .select_only()
            .column(Column::Level)
            .filter(Column::UserId.eq(user_id))
            .into_tuple::<i16>()
            .all(db)
            .await?;

        Ok(levels)
    }

    /// Latest skills for a user, newest first
    pub async fn recent_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<Skill>> {
        let models = SkillEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

// Conversion from SeaORM model to our domain model
impl From<skill::Model> for Skill {
    fn from(m: skill::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            description: m.description,
            level: m.level,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
