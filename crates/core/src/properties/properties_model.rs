//! Property domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A rentable unit owned by a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub realm_id: String,
    pub name: String,
    /// Free-form kind, e.g. "apartment", "office", "parking".
    pub property_type: Option<String>,
    /// Monthly rent asked for the property.
    pub price: Option<Decimal>,
    /// True when no tenant currently occupies the property.
    pub available: bool,
}

/// Realm-wide property occupancy counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOverview {
    pub count_all: usize,
    pub count_free: usize,
    pub count_busy: usize,
}

impl PropertyOverview {
    pub fn from_properties(properties: &[Property]) -> Self {
        properties.iter().fold(Self::default(), |mut overview, property| {
            overview.count_all += 1;
            if property.available {
                overview.count_free += 1;
            } else {
                overview.count_busy += 1;
            }
            overview
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: &str, available: bool) -> Property {
        Property {
            id: id.to_string(),
            realm_id: "r1".to_string(),
            name: format!("Unit {}", id),
            property_type: None,
            price: None,
            available,
        }
    }

    #[test]
    fn overview_splits_free_and_busy() {
        let properties = vec![
            property("a", true),
            property("b", false),
            property("c", false),
            property("d", true),
        ];
        let overview = PropertyOverview::from_properties(&properties);
        assert_eq!(overview.count_all, 4);
        assert_eq!(overview.count_free, 2);
        assert_eq!(overview.count_busy, 2);
    }
}
