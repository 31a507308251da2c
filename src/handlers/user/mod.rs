pub mod delete;
pub mod get;
pub mod get_all;
pub mod register;
pub mod update;

// Re-export handler functions for use in routing
pub use delete::delete as user_delete;
pub use delete::delete_all as user_delete_all;
pub use get::get as user_get;
pub use get_all::get_all as user_get_all;
pub use register::register as user_register;
pub use update::update as user_update;
