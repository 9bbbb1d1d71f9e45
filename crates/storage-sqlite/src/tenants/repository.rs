use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use rentledger_core::tenants::{Tenant, TenantRepositoryTrait};
use rentledger_core::Result;

use super::model::TenantDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::tenants;

pub struct TenantRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TenantRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_tenants(&self, realm_id: &str) -> Result<Vec<Tenant>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tenants::table
            .filter(tenants::realm_id.eq(realm_id))
            .select(TenantDB::as_select())
            .order((tenants::name.asc(), tenants::id.asc()))
            .load::<TenantDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Tenant::from).collect())
    }

    fn find_tenant_impl(&self, realm_id: &str, tenant_id: &str) -> Result<Option<Tenant>> {
        let mut conn = get_connection(&self.pool)?;
        let row = tenants::table
            .filter(tenants::id.eq(tenant_id))
            .filter(tenants::realm_id.eq(realm_id))
            .select(TenantDB::as_select())
            .first::<TenantDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Tenant::from))
    }

    /// Inserts a tenant, or replaces the one with the same id.
    pub async fn save_tenant(&self, tenant: Tenant) -> Result<Tenant> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Tenant> {
                let row = TenantDB::from(tenant);
                let saved = diesel::insert_into(tenants::table)
                    .values(&row)
                    .on_conflict(tenants::id)
                    .do_update()
                    .set(&row)
                    .returning(TenantDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(saved.into())
            })
            .await
    }
}

#[async_trait]
impl TenantRepositoryTrait for TenantRepository {
    async fn find_all_tenants(&self, realm_id: &str) -> Result<Vec<Tenant>> {
        self.load_tenants(realm_id)
    }

    async fn find_tenant(&self, realm_id: &str, tenant_id: &str) -> Result<Option<Tenant>> {
        self.find_tenant_impl(realm_id, tenant_id)
    }
}
