pub mod dashboard;
pub mod project;
pub mod skill;
pub mod user;

pub use dashboard::*;
pub use project::*;
pub use skill::*;
pub use user::*;
