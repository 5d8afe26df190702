pub use super::project::Entity as Project;
pub use super::project_skill::Entity as ProjectSkill;
pub use super::skill::Entity as Skill;
pub use super::user::Entity as User;
