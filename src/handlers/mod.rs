pub mod home;
pub mod user;

pub use home::{health, home, not_found};
