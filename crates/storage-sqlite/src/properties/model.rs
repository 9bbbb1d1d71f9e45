//! Database models for properties.

use diesel::prelude::*;
use rentledger_core::properties::Property;

use crate::errors::StorageError;
use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::properties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct PropertyDB {
    pub id: String,
    pub realm_id: String,
    pub name: String,
    pub property_type: Option<String>,
    /// Decimal rendered as TEXT.
    pub price: Option<String>,
    pub available: bool,
}

impl TryFrom<PropertyDB> for Property {
    type Error = StorageError;

    fn try_from(db: PropertyDB) -> Result<Self, Self::Error> {
        let price = db
            .price
            .as_deref()
            .map(|p| parse_decimal("price", p))
            .transpose()?;
        Ok(Self {
            id: db.id,
            realm_id: db.realm_id,
            name: db.name,
            property_type: db.property_type,
            price,
            available: db.available,
        })
    }
}

impl From<Property> for PropertyDB {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            realm_id: property.realm_id,
            name: property.name,
            property_type: property.property_type,
            price: property.price.map(|p| p.to_string()),
            available: property.available,
        }
    }
}
