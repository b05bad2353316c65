//! User records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User row from the `users` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Stored credential; never written to serialized output
    #[serde(skip_serializing)]
    pub password: String,
}

/// Fields required to insert a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: 7,
            name: "Devin Sanders".into(),
            email: "tristanjacobs@gmail.com".into(),
            password: "$2a$10$secret".into(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "tristanjacobs@gmail.com");
        assert!(json.get("password").is_none());
    }
}
