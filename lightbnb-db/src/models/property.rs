//! Property records
//!
//! `cost_per_night` is stored in minor units (cents). Search filters take
//! major units and convert, see [`super::filters::to_minor_units`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Property row from the `properties` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// Property joined with the average of its review ratings
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PropertyWithRating {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<Decimal>,
}

/// The fourteen insertable fields of a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl NewProperty {
    /// Whether `row` carries every field of this insert unchanged.
    pub fn echoed_by(&self, row: &Property) -> bool {
        self.owner_id == row.owner_id
            && self.title == row.title
            && self.description == row.description
            && self.thumbnail_photo_url == row.thumbnail_photo_url
            && self.cover_photo_url == row.cover_photo_url
            && self.cost_per_night == row.cost_per_night
            && self.parking_spaces == row.parking_spaces
            && self.number_of_bathrooms == row.number_of_bathrooms
            && self.number_of_bedrooms == row.number_of_bedrooms
            && self.country == row.country
            && self.street == row.street
            && self.city == row.city
            && self.province == row.province
            && self.post_code == row.post_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProperty {
        serde_json::from_str(
            r#"{
                "owner_id": 1,
                "title": "Speed lamp",
                "thumbnail_photo_url": "https://images.example/thumb.jpg",
                "cover_photo_url": "https://images.example/cover.jpg",
                "cost_per_night": 93061,
                "country": "Canada",
                "street": "536 Namsub Highway",
                "city": "Sotboske",
                "province": "Quebec",
                "post_code": "28142"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn optional_counts_default_to_zero() {
        let property = sample();
        assert_eq!(property.parking_spaces, 0);
        assert_eq!(property.number_of_bedrooms, 0);
        assert!(property.description.is_none());
    }

    #[test]
    fn echo_check_compares_every_field() {
        let new = sample();
        let mut row = Property {
            id: 42,
            owner_id: new.owner_id,
            title: new.title.clone(),
            description: new.description.clone(),
            thumbnail_photo_url: new.thumbnail_photo_url.clone(),
            cover_photo_url: new.cover_photo_url.clone(),
            cost_per_night: new.cost_per_night,
            parking_spaces: new.parking_spaces,
            number_of_bathrooms: new.number_of_bathrooms,
            number_of_bedrooms: new.number_of_bedrooms,
            country: new.country.clone(),
            street: new.street.clone(),
            city: new.city.clone(),
            province: new.province.clone(),
            post_code: new.post_code.clone(),
            active: true,
        };
        assert!(new.echoed_by(&row));

        row.post_code = "00000".into();
        assert!(!new.echoed_by(&row));
    }

    #[test]
    fn rating_flattens_into_property_json() {
        let row = PropertyWithRating {
            property: Property {
                id: 1,
                owner_id: 1,
                title: "Blank corner".into(),
                description: None,
                thumbnail_photo_url: "t".into(),
                cover_photo_url: "c".into(),
                cost_per_night: 8500,
                parking_spaces: 1,
                number_of_bathrooms: 1,
                number_of_bedrooms: 2,
                country: "Canada".into(),
                street: "651 Nami Road".into(),
                city: "Bohbatev".into(),
                province: "Alberta".into(),
                post_code: "83680".into(),
                active: true,
            },
            average_rating: Some(Decimal::new(45, 1)),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["city"], "Bohbatev");
        assert_eq!(json["average_rating"], "4.5");
    }
}
