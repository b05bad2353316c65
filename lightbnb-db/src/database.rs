//! Accessor facade over the connection pool
//!
//! Every accessor catches failures at its own boundary: the error is logged
//! and the caller gets `None`. A missing row is also `None`, so callers
//! cannot tell "not found" from "failed". Use the repositories in
//! [`crate::repos`] when that distinction matters.

use sqlx::PgPool;

use crate::config::DbConfig;
use crate::error::Result;
use crate::migrations;
use crate::models::{
    FilterOptions, NewProperty, NewUser, Property, PropertyWithRating, Reservation, User,
};
use crate::pool::{create_lazy_pool, create_pool};
use crate::query::{ClauseJoining, PropertySearch};
use crate::repos::{PropertyRepo, ReservationRepo, UserRepo};

/// Handle to the LightBnB database
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    joining: ClauseJoining,
}

impl Database {
    /// Connect a new pool.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        Ok(Self::from_pool(create_pool(config).await?))
    }

    /// Create a handle whose pool connects on first use.
    pub fn connect_lazy(config: &DbConfig) -> Result<Self> {
        Ok(Self::from_pool(create_lazy_pool(config)?))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            joining: ClauseJoining::default(),
        }
    }

    /// Keyword policy used by [`Database::get_all_properties`].
    pub fn with_joining(mut self, joining: ClauseJoining) -> Self {
        self.joining = joining;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }

    /// Create any missing tables.
    pub async fn migrate(&self) -> Result<()> {
        migrations::run(&self.pool).await
    }

    /// First user whose email matches `email` as a `LIKE` pattern.
    pub async fn get_user_with_email(&self, email: &str) -> Option<User> {
        let result = UserRepo::new(&self.pool)
            .find_by_email_pattern(email)
            .await;
        settle("get_user_with_email", result).flatten()
    }

    pub async fn get_user_with_id(&self, id: i32) -> Option<User> {
        let result = UserRepo::new(&self.pool).find_by_id(id).await;
        settle("get_user_with_id", result).flatten()
    }

    /// Insert a user; the stored row comes back in a one-element vec.
    pub async fn add_user(&self, user: &NewUser) -> Option<Vec<User>> {
        let result = UserRepo::new(&self.pool).create(user).await;
        settle("add_user", result)
    }

    pub async fn get_all_reservations(&self, guest_id: i32) -> Option<Vec<Reservation>> {
        let result = ReservationRepo::new(&self.pool)
            .list_for_guest(guest_id)
            .await;
        settle("get_all_reservations", result)
    }

    /// Properties matching `filters`, cheapest first, at most `limit` rows.
    ///
    /// A zero limit is rejected before any query runs and yields `None`.
    pub async fn get_all_properties(
        &self,
        filters: &FilterOptions,
        limit: u32,
    ) -> Option<Vec<PropertyWithRating>> {
        let search = PropertySearch::new(filters)
            .limit(limit)
            .joining(self.joining);
        let result = PropertyRepo::new(&self.pool).search(&search).await;
        settle("get_all_properties", result)
    }

    /// Insert a property; the stored row comes back in a one-element vec.
    pub async fn add_property(&self, property: &NewProperty) -> Option<Vec<Property>> {
        let result = PropertyRepo::new(&self.pool).create(property).await;
        settle("add_property", result)
    }
}

fn settle<T>(operation: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(operation, error = %err, "database operation failed");
            None
        }
    }
}
