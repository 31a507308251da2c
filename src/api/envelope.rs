use serde::{Deserialize, Serialize};

use crate::database::User;
use crate::services::ModelOutcome;

/// Response for create, get, update and delete of a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserOperationResult {
    pub status: String,
    pub reason: String,
    #[serde(default)]
    pub user: User,
}

/// Response for get-all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserGetAllOperationResult {
    pub status: String,
    pub reason: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Response carrying no payload: delete-all and every rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimpleOperationResult {
    pub status: String,
    pub reason: String,
}

/// Request body for get and delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserNameOperation {
    #[serde(alias = "userName", default)]
    pub user_name: String,
}

impl From<ModelOutcome<User>> for UserOperationResult {
    fn from(outcome: ModelOutcome<User>) -> Self {
        Self {
            status: outcome.status.text().to_string(),
            reason: outcome.reason,
            user: outcome.value,
        }
    }
}

impl From<ModelOutcome<Vec<User>>> for UserGetAllOperationResult {
    fn from(outcome: ModelOutcome<Vec<User>>) -> Self {
        Self {
            status: outcome.status.text().to_string(),
            reason: outcome.reason,
            count: outcome.value.len(),
            users: outcome.value,
        }
    }
}

impl From<ModelOutcome<()>> for SimpleOperationResult {
    fn from(outcome: ModelOutcome<()>) -> Self {
        Self {
            status: outcome.status.text().to_string(),
            reason: outcome.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ModelStatus;
    use serde_json::json;

    #[test]
    fn get_all_envelope_counts_users() {
        let outcome = ModelOutcome::success(vec![
            User::new("Alfie", "a@x.org", "p1"),
            User::new("Joan", "j@x.org", "p2"),
        ]);
        let value = serde_json::to_value(UserGetAllOperationResult::from(outcome)).unwrap();
        assert_eq!(value["Status"], "Success");
        assert_eq!(value["Reason"], "");
        assert_eq!(value["Count"], 2);
        assert_eq!(value["Users"][1]["UserName"], "Joan");
    }

    #[test]
    fn failure_envelope_still_carries_user() {
        let outcome = ModelOutcome::failure(User::new("Ghost", "g@x", "p"), ModelStatus::NotFound, "gone");
        let value = serde_json::to_value(UserOperationResult::from(outcome)).unwrap();
        assert_eq!(
            value,
            json!({
                "Status": "User not found",
                "Reason": "gone",
                "User": { "ID": 0, "UserName": "Ghost", "Email": "g@x", "Password": "p" }
            })
        );
    }

    #[test]
    fn name_operation_accepts_both_spellings() {
        let a: UserNameOperation = serde_json::from_value(json!({ "UserName": "Tony" })).unwrap();
        let b: UserNameOperation = serde_json::from_value(json!({ "userName": "Tony" })).unwrap();
        let c: UserNameOperation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(a.user_name, "Tony");
        assert_eq!(b.user_name, "Tony");
        assert_eq!(c.user_name, "");
    }
}
