use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, User};

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            password_hash: Set(password_hash.to_string()),
            name: Set(input.name.clone()),
            job_title: Set(input.job_title.clone()),
            role: Set(2), // default role
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("unique") {
                AppError::Conflict("Email already exists".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Find user by id (for the authenticated "me" endpoint)
    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Find user by email (for login)
    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            password_hash: m.password_hash,
            name: m.name,
            job_title: m.job_title,
            role: m.role,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
