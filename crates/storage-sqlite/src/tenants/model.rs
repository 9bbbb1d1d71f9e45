//! Database models for tenants.

use chrono::NaiveDate;
use diesel::prelude::*;
use rentledger_core::tenants::Tenant;

#[derive(Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::tenants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TenantDB {
    pub id: String,
    pub realm_id: String,
    pub name: String,
    pub begin_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
}

impl From<TenantDB> for Tenant {
    fn from(db: TenantDB) -> Self {
        Self {
            id: db.id,
            realm_id: db.realm_id,
            name: db.name,
            begin_date: db.begin_date,
            end_date: db.end_date,
            termination_date: db.termination_date,
        }
    }
}

impl From<Tenant> for TenantDB {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id,
            realm_id: tenant.realm_id,
            name: tenant.name,
            begin_date: tenant.begin_date,
            end_date: tenant.end_date,
            termination_date: tenant.termination_date,
        }
    }
}
