use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::entity::project_skill::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as LinkEntity,
};
use crate::entity::skill::{Column as SkillColumn, Entity as SkillEntity};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProject, Project, ProjectStatus, ProjectWithSkills, Skill, UpdateProject,
};
use crate::repositories::OwnedRepository;

/// Project repository for database operations, including maintenance of the
/// project-skill link set
pub struct ProjectRepository;

#[async_trait]
impl OwnedRepository<Project> for ProjectRepository {
    async fn find_for_user(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(model.into())
    }

    async fn list_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count_for_user(db: &DatabaseConnection, user_id: Uuid) -> AppResult<u64> {
        let count = ProjectEntity::find()
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Delete a project. Its link rows go with it via the database cascade.
    async fn delete_for_user(db: &DatabaseConnection, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let result = ProjectEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }
}

impl ProjectRepository {
    /// Create a new project and its skill links in a single transaction, so a
    /// failed link insert never leaves a linkless project behind.
    pub async fn create(
        db: &DatabaseConnection,
        user_id: Uuid,
        input: &CreateProject,
    ) -> AppResult<Project> {
        let skill_ids = dedup_ids(&input.skill_ids);

        let txn = db.begin().await?;
        verify_skill_ownership(&txn, user_id, &skill_ids).await?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            status: Set(input.status.as_str().to_string()),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(&txn).await?;
        insert_links(&txn, result.id, &skill_ids).await?;

        txn.commit().await?;
        Ok(result.into())
    }

    /// Update project fields (with ownership check) and replace the full link
    /// set with `input.skill_ids`. The replacement runs inside one
    /// transaction: delete every existing link, then insert the new set. An
    /// empty set still performs the delete, so deselecting all skills clears
    /// prior links.
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        user_id: Uuid,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let skill_ids = dedup_ids(&input.skill_ids);

        let txn = db.begin().await?;
        verify_skill_ownership(&txn, user_id, &skill_ids).await?;

        let model = ProjectEntity::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(Some(start_date));
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(Some(end_date));
        }
        if let Some(status) = input.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(&txn).await?;

        LinkEntity::delete_many()
            .filter(LinkColumn::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        insert_links(&txn, id, &skill_ids).await?;

        txn.commit().await?;
        Ok(result.into())
    }

    /// Fetch a project (with ownership check) together with its linked
    /// skills. The link table carries no owner column; links are only
    /// reachable through the already-checked project.
    pub async fn find_with_skills(
        db: &DatabaseConnection,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<ProjectWithSkills> {
        let project = Self::find_for_user(db, id, user_id).await?;

        let skill_ids: Vec<Uuid> = LinkEntity::find()
            .select_only()
            .column(LinkColumn::SkillId)
            .filter(LinkColumn::ProjectId.eq(id))
            .into_tuple::<Uuid>()
            .all(db)
            .await?;

        // An empty IN clause is malformed for some backends, so short-circuit
        if skill_ids.is_empty() {
            return Ok(ProjectWithSkills {
                project,
                skills: Vec::new(),
            });
        }

        let skills: Vec<Skill> = SkillEntity::find()
            .filter(SkillColumn::Id.is_in(skill_ids))
            .filter(SkillColumn::UserId.eq(user_id))
            .order_by_asc(SkillColumn::Name)
            .all(db)
            .await?
            .into_iter()
            .map(|m| m.into())
            .collect();

        Ok(ProjectWithSkills { project, skills })
    }

    /// Count a user's projects in a given status (dashboard counters)
    pub async fn count_by_status(
        db: &DatabaseConnection,
        user_id: Uuid,
        status: ProjectStatus,
    ) -> AppResult<u64> {
        let count = ProjectEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(status.as_str()))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Latest projects for a user, newest first
    pub async fn recent_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

/// Deduplicate caller-supplied skill ids so the same skill submitted twice
/// cannot violate the composite primary key
fn dedup_ids(skill_ids: &[Uuid]) -> Vec<Uuid> {
    let mut ids = skill_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Every skill about to be linked must exist and belong to the acting user.
/// A foreign skill id behaves exactly like a missing one, so the check leaks
/// nothing about other users' skills. The link table itself carries no owner
/// column; this is where its ownership invariant is enforced.
async fn verify_skill_ownership<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    skill_ids: &[Uuid],
) -> AppResult<()> {
    if skill_ids.is_empty() {
        return Ok(());
    }

    let owned = SkillEntity::find()
        .filter(SkillColumn::Id.is_in(skill_ids.to_vec()))
        .filter(SkillColumn::UserId.eq(user_id))
        .count(conn)
        .await?;

    if owned != skill_ids.len() as u64 {
        return Err(AppError::NotFound("Skill".to_string()));
    }

    Ok(())
}

/// Insert one link row per skill id. Ids must already be deduplicated and
/// ownership-checked.
async fn insert_links<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
    skill_ids: &[Uuid],
) -> AppResult<()> {
    if skill_ids.is_empty() {
        return Ok(());
    }

    let links: Vec<LinkActiveModel> = skill_ids
        .iter()
        .map(|&skill_id| LinkActiveModel {
            project_id: Set(project_id),
            skill_id: Set(skill_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
        })
        .collect();

    LinkEntity::insert_many(links).exec(conn).await?;
    Ok(())
}

// Conversion from SeaORM model to our domain model
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        let status = ProjectStatus::parse(&m.status).unwrap_or_else(|| {
            tracing::warn!(project_id = %m.id, status = %m.status, "unknown project status in database");
            ProjectStatus::default()
        });

        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            description: m.description,
            start_date: m.start_date,
            end_date: m.end_date,
            status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
