pub mod auth;
pub mod dashboard;

pub use auth::{AuthService, Claims};
pub use dashboard::DashboardService;
