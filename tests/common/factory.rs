use uuid::Uuid;

use skilltracker::models::{CreateProject, CreateSkill, CreateUser, Project, ProjectStatus, Skill};
use skilltracker::repositories::{ProjectRepository, SkillRepository, UserRepository};
use skilltracker::services::AuthService;
use skilltracker::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);
        let password = "TestPassword123!";

        let input = CreateUser {
            email: email.clone(),
            password: password.to_string(),
            name: format!("Test User {}", unique_id),
            job_title: Some("Student".to_string()),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let token = AuthService::generate_token(user.id, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Create a test skill at a given level
    pub async fn create_skill(&self, user_id: Uuid, level: i16) -> Skill {
        let input = CreateSkill {
            name: format!("Test Skill {}", Uuid::new_v4()),
            description: Some("Test skill description".to_string()),
            level,
        };

        SkillRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }

    /// Create a test skill with a specific name
    pub async fn create_skill_with_name(&self, user_id: Uuid, name: &str, level: i16) -> Skill {
        let input = CreateSkill {
            name: name.to_string(),
            description: None,
            level,
        };

        SkillRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }

    /// Create a test project with default status and no linked skills
    pub async fn create_project(&self, user_id: Uuid) -> Project {
        self.create_project_with(user_id, ProjectStatus::InProgress, Vec::new())
            .await
    }

    /// Create a test project with a given status and linked skills
    pub async fn create_project_with(
        &self,
        user_id: Uuid,
        status: ProjectStatus,
        skill_ids: Vec<Uuid>,
    ) -> Project {
        let input = CreateProject {
            name: format!("Test Project {}", Uuid::new_v4()),
            description: Some("Test project description".to_string()),
            start_date: None,
            end_date: None,
            status,
            skill_ids,
        };

        ProjectRepository::create(&self.state.db, user_id, &input)
            .await
            .unwrap()
    }
}
