pub mod project;
pub mod skill;
pub mod user;

pub use project::ProjectRepository;
pub use skill::SkillRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base trait for repositories over user-owned records. Every operation takes
/// the acting user's id and applies it as an equality filter, so a record
/// belonging to another user behaves exactly like a record that does not
/// exist. The datastore itself performs no authorization; this layer does.
#[async_trait]
pub trait OwnedRepository<T>
where
    T: Send + Sync,
{
    /// Find a record by id, scoped to the owning user
    async fn find_for_user(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> AppResult<T>;

    /// List the user's records, newest first
    async fn list_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<T>>;

    /// Count the user's records
    async fn count_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<u64>;

    /// Delete a record by id, scoped to the owning user
    async fn delete_for_user(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> AppResult<()>;
}
