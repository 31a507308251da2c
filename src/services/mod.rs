pub mod status;
pub mod user_service;

pub use status::{ModelOutcome, ModelStatus};
pub use user_service::{validate_user, UserService};
