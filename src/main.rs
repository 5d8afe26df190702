use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use skilltracker::config::Config;
use skilltracker::handlers::{
    AuthResponse, CreateProjectRequest, CreateSkillRequest, DashboardStatsResponse, LoginRequest,
    ProjectListResponse, ProjectResponse, ProjectWithSkillsResponse, RegisterRequest,
    SkillListResponse, SkillResponse, UpdateProjectRequest, UpdateSkillRequest,
};
use skilltracker::models::{LevelDistribution, ProjectStatus, UserResponse};
use skilltracker::state::AppState;
use skilltracker::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::skill::create_skill,
        handlers::skill::list_skills,
        handlers::skill::get_skill,
        handlers::skill::update_skill,
        handlers::skill::delete_skill,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::get_project_with_skills,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::dashboard::get_dashboard_stats,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        CreateSkillRequest,
        UpdateSkillRequest,
        SkillResponse,
        SkillListResponse,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectResponse,
        ProjectListResponse,
        ProjectWithSkillsResponse,
        ProjectStatus,
        LevelDistribution,
        DashboardStatsResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Skills", description = "Skill management endpoints"),
        (name = "Projects", description = "Project management endpoints with skill linking"),
        (name = "Dashboard", description = "Per-user summary statistics")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database, runs migrations)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}
