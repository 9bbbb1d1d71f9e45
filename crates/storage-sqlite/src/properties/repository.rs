use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use rentledger_core::properties::{Property, PropertyRepositoryTrait};
use rentledger_core::{Error, Result};

use super::model::PropertyDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::properties;

pub struct PropertyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PropertyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find_all_properties_impl(&self, realm_id: &str) -> Result<Vec<Property>> {
        let mut conn = get_connection(&self.pool)?;
        properties::table
            .filter(properties::realm_id.eq(realm_id))
            .select(PropertyDB::as_select())
            .order((properties::name.asc(), properties::id.asc()))
            .load::<PropertyDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(|row| Property::try_from(row).map_err(Error::from))
            .collect()
    }

    /// Inserts a property, or replaces the one with the same id.
    pub async fn save_property(&self, property: Property) -> Result<Property> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Property> {
                let row = PropertyDB::from(property);
                let saved = diesel::insert_into(properties::table)
                    .values(&row)
                    .on_conflict(properties::id)
                    .do_update()
                    .set(&row)
                    .returning(PropertyDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Property::try_from(saved)?)
            })
            .await
    }
}

#[async_trait]
impl PropertyRepositoryTrait for PropertyRepository {
    async fn find_all_properties(&self, realm_id: &str) -> Result<Vec<Property>> {
        self.find_all_properties_impl(realm_id)
    }
}
