//! Reservation repository

use sqlx::PgPool;

use crate::error::Result;
use crate::models::Reservation;

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All reservations made by `guest_id`, earliest start date first.
    ///
    /// Single query: properties and the review average come from JOINs,
    /// grouped per reservation.
    pub async fn list_for_guest(&self, guest_id: i32) -> Result<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT
                reservations.id AS reservation_id,
                properties.*,
                reservations.start_date,
                avg(property_reviews.rating) AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date
            "#,
        )
        .bind(guest_id)
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(guest_id, count = rows.len(), "reservations loaded");
        Ok(rows)
    }
}
