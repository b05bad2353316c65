//! Property search query assembly
//!
//! Clause order is fixed: city, owner, price range, then grouping with an
//! optional rating `HAVING`, ordering by nightly cost and the row limit.
//! Parameters follow the same order, the limit always last.

use crate::models::{FilterOptions, ValidationError};

use super::builder::{BuiltQuery, ClauseJoining, Fragment, SelectBuilder, SqlValue};

/// Rows returned when the caller does not ask for a specific count
pub const DEFAULT_PROPERTY_LIMIT: u32 = 10;

const PROPERTY_SELECT: &str = "SELECT properties.*, avg(property_reviews.rating) AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Property search over a set of filters
#[derive(Debug, Clone)]
pub struct PropertySearch<'a> {
    filters: &'a FilterOptions,
    limit: u32,
    joining: ClauseJoining,
}

impl<'a> PropertySearch<'a> {
    pub fn new(filters: &'a FilterOptions) -> Self {
        Self {
            filters,
            limit: DEFAULT_PROPERTY_LIMIT,
            joining: ClauseJoining::default(),
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Keyword policy for the filter conditions. The owner and price
    /// conditions are written with `AND`; [`ClauseJoining::Verbatim`] keeps
    /// that even when no city condition opened a `WHERE`.
    pub fn joining(mut self, joining: ClauseJoining) -> Self {
        self.joining = joining;
        self
    }

    /// Render the SQL text and its bind parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a zero limit or a price that does not
    /// fit in minor units.
    pub fn build(&self) -> Result<BuiltQuery, ValidationError> {
        if self.limit < 1 {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                min: 1,
            });
        }

        let filters = self.filters;
        let mut select = SelectBuilder::new(PROPERTY_SELECT);
        select.joining(self.joining);

        if let Some(city) = filters.effective_city() {
            select.filter_where(Fragment::bind("city LIKE {}", format!("%{}%", city)));
        }

        if let Some(owner_id) = filters.effective_owner_id() {
            select.and_where(Fragment::bind("owner_id = {}", owner_id));
        }

        match (filters.minimum_price_minor()?, filters.maximum_price_minor()?) {
            (Some(min), Some(max)) => {
                select.and_where(Fragment::new(
                    "(cost_per_night >= {} AND cost_per_night <= {})",
                    vec![SqlValue::BigInt(min), SqlValue::BigInt(max)],
                ));
            }
            (Some(min), None) => {
                select.and_where(Fragment::bind("cost_per_night >= {}", min));
            }
            (None, Some(max)) => {
                select.and_where(Fragment::bind("cost_per_night <= {}", max));
            }
            (None, None) => {}
        }

        select.group_by("properties.id");

        if let Some(rating) = filters.effective_minimum_rating() {
            select.having(Fragment::bind("avg(property_reviews.rating) >= {}", rating));
        }

        select
            .order_by("cost_per_night")
            .limit(i64::from(self.limit));

        Ok(select.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn city_only_renders_single_like_clause() {
        let filters = FilterOptions::new().city("tahoe");
        let built = PropertySearch::new(&filters).build().unwrap();

        assert_eq!(
            built.sql,
            "SELECT properties.*, avg(property_reviews.rating) AS average_rating\n\
             FROM properties\n\
             JOIN property_reviews ON properties.id = property_reviews.property_id\n\
             WHERE city LIKE $1\n\
             GROUP BY properties.id\n\
             ORDER BY cost_per_night\n\
             LIMIT $2"
        );
        assert_eq!(
            built.params,
            vec![SqlValue::Text("%tahoe%".into()), SqlValue::BigInt(10)]
        );
    }

    #[test]
    fn price_range_binds_minor_units_min_then_max() {
        let filters = FilterOptions::new()
            .minimum_price_per_night(Decimal::from(50))
            .maximum_price_per_night(Decimal::from(150));
        let built = PropertySearch::new(&filters).build().unwrap();

        assert_eq!(
            built.params,
            vec![
                SqlValue::BigInt(5000),
                SqlValue::BigInt(15000),
                SqlValue::BigInt(10)
            ]
        );
        assert!(built
            .sql
            .contains("WHERE (cost_per_night >= $1 AND cost_per_night <= $2)"));
    }

    #[test]
    fn single_price_bounds() {
        let filters = FilterOptions::new().minimum_price_per_night(Decimal::from(80));
        let built = PropertySearch::new(&filters).build().unwrap();
        assert!(built.sql.contains("WHERE cost_per_night >= $1\n"));
        assert_eq!(built.params[0], SqlValue::BigInt(8000));

        let filters = FilterOptions::new().maximum_price_per_night(Decimal::new(9999, 2));
        let built = PropertySearch::new(&filters).build().unwrap();
        assert!(built.sql.contains("WHERE cost_per_night <= $1\n"));
        assert_eq!(built.params[0], SqlValue::BigInt(9999));
    }

    #[test]
    fn rating_and_limit_are_the_last_two_params() {
        let filters = FilterOptions::new()
            .city("Vancouver")
            .minimum_rating(Decimal::from(4));
        let built = PropertySearch::new(&filters).limit(20).build().unwrap();

        let n = built.params.len();
        assert_eq!(
            &built.params[n - 2..],
            &[SqlValue::Decimal(Decimal::from(4)), SqlValue::BigInt(20)]
        );
        assert!(built
            .sql
            .ends_with("HAVING avg(property_reviews.rating) >= $2\nORDER BY cost_per_night\nLIMIT $3"));
    }

    #[test]
    fn all_filters_in_order() {
        let filters = FilterOptions::new()
            .city("Calgary")
            .owner_id(12)
            .minimum_price_per_night(Decimal::from(50))
            .maximum_price_per_night(Decimal::from(150))
            .minimum_rating(Decimal::new(35, 1));
        let built = PropertySearch::new(&filters).limit(5).build().unwrap();

        assert_eq!(
            built.params,
            vec![
                SqlValue::Text("%Calgary%".into()),
                SqlValue::Int(12),
                SqlValue::BigInt(5000),
                SqlValue::BigInt(15000),
                SqlValue::Decimal(Decimal::new(35, 1)),
                SqlValue::BigInt(5),
            ]
        );
        assert!(built.sql.contains(
            "WHERE city LIKE $1\n\
             AND owner_id = $2\n\
             AND (cost_per_night >= $3 AND cost_per_night <= $4)\n\
             GROUP BY properties.id\n\
             HAVING avg(property_reviews.rating) >= $5\n\
             ORDER BY cost_per_night\n\
             LIMIT $6"
        ));
    }

    #[test]
    fn owner_without_city_opens_with_where() {
        let filters = FilterOptions::new().owner_id(3);
        let built = PropertySearch::new(&filters).build().unwrap();

        assert!(built.sql.contains("\nWHERE owner_id = $1\n"));
        assert!(!built.sql.contains("AND owner_id"));
    }

    #[test]
    fn verbatim_joining_reproduces_leading_and() {
        let filters = FilterOptions::new().owner_id(3);
        let built = PropertySearch::new(&filters)
            .joining(ClauseJoining::Verbatim)
            .build()
            .unwrap();

        assert!(built.sql.contains("\nAND owner_id = $1\n"));
        assert!(!built.sql.contains("WHERE"));
    }

    #[test]
    fn verbatim_joining_matches_normalized_when_city_leads() {
        let filters = FilterOptions::new().city("tahoe").owner_id(3);
        let normalized = PropertySearch::new(&filters).build().unwrap();
        let verbatim = PropertySearch::new(&filters)
            .joining(ClauseJoining::Verbatim)
            .build()
            .unwrap();

        assert_eq!(normalized, verbatim);
    }

    #[test]
    fn no_filters_binds_only_the_limit() {
        let filters = FilterOptions::default();
        let built = PropertySearch::new(&filters).build().unwrap();

        assert!(!built.sql.contains("WHERE"));
        assert_eq!(built.params, vec![SqlValue::BigInt(i64::from(DEFAULT_PROPERTY_LIMIT))]);
    }

    #[test]
    fn whitespace_city_adds_no_condition() {
        let filters = FilterOptions::new().city("   ");
        let built = PropertySearch::new(&filters).build().unwrap();

        assert!(!built.sql.contains("city LIKE"));
        assert_eq!(built.params, vec![SqlValue::BigInt(10)]);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let filters = FilterOptions::default();
        let err = PropertySearch::new(&filters).limit(0).build().unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "limit",
                min: 1
            }
        );
    }
}
