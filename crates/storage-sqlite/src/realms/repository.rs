use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use rentledger_core::realms::{Realm, RealmRepositoryTrait};
use rentledger_core::Result;

use super::model::{RealmDB, RealmMemberDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{realm_members, realms};

pub struct RealmRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RealmRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn resolve_realm_impl(&self, realm_id: &str) -> Result<Option<Realm>> {
        let mut conn = get_connection(&self.pool)?;
        let realm = realms::table
            .find(realm_id)
            .select(RealmDB::as_select())
            .first::<RealmDB>(&mut conn)
            .optional()
            .into_core()?;

        let Some(realm) = realm else {
            debug!("Realm {} does not exist", realm_id);
            return Ok(None);
        };

        let members = realm_members::table
            .filter(realm_members::realm_id.eq(&realm.id))
            .select(realm_members::email)
            .order(realm_members::email.asc())
            .load::<String>(&mut conn)
            .into_core()?;

        Ok(Some(realm.into_domain(members)))
    }

    fn find_realms_for_member_impl(&self, email: &str) -> Result<Vec<Realm>> {
        let mut conn = get_connection(&self.pool)?;

        // The email column collates NOCASE, so this match ignores case.
        let realm_ids = realm_members::table
            .filter(realm_members::email.eq(email))
            .select(realm_members::realm_id)
            .load::<String>(&mut conn)
            .into_core()?;
        if realm_ids.is_empty() {
            return Ok(Vec::new());
        }

        let realm_rows = realms::table
            .filter(realms::id.eq_any(&realm_ids))
            .select(RealmDB::as_select())
            .order((realms::name.asc(), realms::id.asc()))
            .load::<RealmDB>(&mut conn)
            .into_core()?;

        let mut members_by_realm: HashMap<String, Vec<String>> = HashMap::new();
        for member in realm_members::table
            .filter(realm_members::realm_id.eq_any(&realm_ids))
            .select(RealmMemberDB::as_select())
            .order(realm_members::email.asc())
            .load::<RealmMemberDB>(&mut conn)
            .into_core()?
        {
            members_by_realm
                .entry(member.realm_id)
                .or_default()
                .push(member.email);
        }

        Ok(realm_rows
            .into_iter()
            .map(|realm| {
                let members = members_by_realm.remove(&realm.id).unwrap_or_default();
                realm.into_domain(members)
            })
            .collect())
    }

    /// Inserts a realm together with its member list.
    pub async fn create_realm(&self, realm: Realm) -> Result<Realm> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Realm> {
                diesel::insert_into(realms::table)
                    .values(RealmDB::from(&realm))
                    .execute(conn)
                    .into_core()?;

                let members: Vec<RealmMemberDB> = realm
                    .members
                    .iter()
                    .map(|email| RealmMemberDB {
                        realm_id: realm.id.clone(),
                        email: email.clone(),
                    })
                    .collect();
                if !members.is_empty() {
                    diesel::insert_into(realm_members::table)
                        .values(&members)
                        .execute(conn)
                        .into_core()?;
                }

                Ok(realm)
            })
            .await
    }
}

#[async_trait]
impl RealmRepositoryTrait for RealmRepository {
    async fn resolve_realm(&self, realm_id: &str) -> Result<Option<Realm>> {
        self.resolve_realm_impl(realm_id)
    }

    async fn find_realms_for_member(&self, email: &str) -> Result<Vec<Realm>> {
        self.find_realms_for_member_impl(email)
    }
}
