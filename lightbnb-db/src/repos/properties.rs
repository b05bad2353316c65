//! Property repository
//!
//! - search: dynamic filters rendered by [`PropertySearch`]
//! - create: INSERT of the fourteen writable columns, RETURNING the row

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewProperty, Property, PropertyWithRating};
use crate::query::PropertySearch;

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Properties matching `search`, cheapest first.
    pub async fn search(&self, search: &PropertySearch<'_>) -> Result<Vec<PropertyWithRating>> {
        let built = search.build()?;
        tracing::debug!(
            sql = %built.sql,
            params = %built.params_display(),
            "property search"
        );

        let rows = built
            .query_as::<PropertyWithRating>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Insert a property, returning the stored rows (one row on success).
    pub async fn create(&self, property: &NewProperty) -> Result<Vec<Property>> {
        let rows = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id,
                title,
                description,
                thumbnail_photo_url,
                cover_photo_url,
                cost_per_night,
                parking_spaces,
                number_of_bathrooms,
                number_of_bedrooms,
                country,
                street,
                city,
                province,
                post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(property.description.as_deref())
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
