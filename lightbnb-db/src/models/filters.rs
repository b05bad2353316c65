//! Property search filters
//!
//! Every field is optional and absence means "no constraint". Values the web
//! form submits for untouched inputs (empty city, zero owner/price/rating)
//! count as absent as well.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Optional criteria narrowing a property search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Substring of the property's city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,

    /// Lower price bound in major currency units (dollars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_price_per_night: Option<Decimal>,

    /// Upper price bound in major currency units (dollars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_price_per_night: Option<Decimal>,

    /// Minimum average review rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_rating: Option<Decimal>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn minimum_price_per_night(mut self, price: Decimal) -> Self {
        self.minimum_price_per_night = Some(price);
        self
    }

    pub fn maximum_price_per_night(mut self, price: Decimal) -> Self {
        self.maximum_price_per_night = Some(price);
        self
    }

    pub fn minimum_rating(mut self, rating: Decimal) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// City to match, if it constrains anything.
    pub fn effective_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn effective_owner_id(&self) -> Option<i32> {
        self.owner_id.filter(|id| *id != 0)
    }

    /// Minimum price in minor units (cents).
    pub fn minimum_price_minor(&self) -> Result<Option<i64>, ValidationError> {
        nonzero(self.minimum_price_per_night)
            .map(|p| to_minor_units("minimum_price_per_night", p))
            .transpose()
    }

    /// Maximum price in minor units (cents).
    pub fn maximum_price_minor(&self) -> Result<Option<i64>, ValidationError> {
        nonzero(self.maximum_price_per_night)
            .map(|p| to_minor_units("maximum_price_per_night", p))
            .transpose()
    }

    pub fn effective_minimum_rating(&self) -> Option<Decimal> {
        nonzero(self.minimum_rating)
    }

    /// True when no field constrains the search.
    pub fn is_unconstrained(&self) -> bool {
        self.effective_city().is_none()
            && self.effective_owner_id().is_none()
            && nonzero(self.minimum_price_per_night).is_none()
            && nonzero(self.maximum_price_per_night).is_none()
            && self.effective_minimum_rating().is_none()
    }
}

fn nonzero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// Convert a major-unit amount to minor units, rounding half away from zero.
pub fn to_minor_units(field: &'static str, major: Decimal) -> Result<i64, ValidationError> {
    major
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| ValidationError::Unrepresentable {
            field,
            value: major.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn minor_units_conversion() {
        assert_eq!(to_minor_units("p", Decimal::from(50)), Ok(5000));
        assert_eq!(to_minor_units("p", Decimal::new(1999, 2)), Ok(1999));
        assert_eq!(to_minor_units("p", Decimal::new(12345, 3)), Ok(1235));
    }

    #[test]
    fn minor_units_overflow_is_rejected() {
        let err = to_minor_units("maximum_price_per_night", Decimal::MAX).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Unrepresentable {
                field: "maximum_price_per_night",
                ..
            }
        ));
    }

    #[test]
    fn blank_and_zero_values_are_absent() {
        let filters = FilterOptions {
            city: Some("   ".into()),
            owner_id: Some(0),
            minimum_price_per_night: Some(Decimal::ZERO),
            maximum_price_per_night: None,
            minimum_rating: Some(Decimal::ZERO),
        };

        assert!(filters.effective_city().is_none());
        assert!(filters.effective_owner_id().is_none());
        assert_eq!(filters.minimum_price_minor(), Ok(None));
        assert!(filters.is_unconstrained());
    }

    #[test]
    fn builder_methods_set_fields() {
        let filters = FilterOptions::new()
            .city("Vancouver")
            .owner_id(3)
            .maximum_price_per_night(Decimal::from(150));

        assert_eq!(filters.effective_city(), Some("Vancouver"));
        assert_eq!(filters.effective_owner_id(), Some(3));
        assert_eq!(filters.maximum_price_minor(), Ok(Some(15000)));
        assert!(!filters.is_unconstrained());
    }

    #[test]
    fn deserializes_from_partial_json() {
        let filters: FilterOptions =
            serde_json::from_str(r#"{"city":"tahoe","minimum_rating":4}"#).unwrap();

        assert_eq!(filters.city.as_deref(), Some("tahoe"));
        assert_eq!(filters.minimum_rating, Some(Decimal::from(4)));
        assert!(filters.owner_id.is_none());
    }
}
