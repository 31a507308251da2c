use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user. `user_name` is the external key and never changes once
/// the record exists; only `email` and `password` are updatable.
///
/// Wire names keep the service's PascalCase JSON (`ID`, `UserName`, ...) and
/// accept camelCase on input. Missing fields decode as empty so validation,
/// not deserialization, reports them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: i32,
    #[serde(alias = "userName", default)]
    #[sqlx(rename = "username")]
    pub user_name: String,
    #[serde(alias = "email", default)]
    pub email: String,
    #[serde(alias = "password", default)]
    pub password: String,
}

impl User {
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

// Passwords are stored as given, so keep them out of log lines.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_pascal_case_names() {
        let user = User {
            id: 7,
            ..User::new("Alfie", "alfie@some_office.org", "passwrd1")
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "ID": 7,
                "UserName": "Alfie",
                "Email": "alfie@some_office.org",
                "Password": "passwrd1"
            })
        );
    }

    #[test]
    fn accepts_camel_case_and_missing_fields() {
        let user: User = serde_json::from_value(json!({ "userName": "Joan", "email": "joan@x.com" })).unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.user_name, "Joan");
        assert_eq!(user.email, "joan@x.com");
        assert_eq!(user.password, "");
    }

    #[test]
    fn debug_redacts_password() {
        let user = User::new("Tony", "tones@x.net", "passwrd3");
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("Tony"));
        assert!(!rendered.contains("passwrd3"));
    }
}
