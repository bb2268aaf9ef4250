pub mod accounts;
pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod grades;
pub mod students;
pub mod system;

pub use accounts::configure_account_routes;
pub use announcements::configure_announcement_routes;
pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use grades::configure_grade_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
