pub mod body;
pub mod envelope;

pub use body::JsonBody;
pub use envelope::{SimpleOperationResult, UserGetAllOperationResult, UserNameOperation, UserOperationResult};
