//! User repository
//!
//! Email lookup matches with `LIKE`, so `%` and `_` in the argument act as
//! wildcards and the first matching row wins.

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// First user whose email matches `pattern`.
    pub async fn find_by_email_pattern(&self, pattern: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email LIKE $1")
            .bind(pattern)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Insert a user, returning the stored rows (one row on success).
    pub async fn create(&self, user: &NewUser) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
