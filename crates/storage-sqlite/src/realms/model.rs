//! Database models for realms.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rentledger_core::realms::Realm;

#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::realms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RealmDB {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// One member email of a realm.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::realm_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RealmMemberDB {
    pub realm_id: String,
    pub email: String,
}

impl RealmDB {
    pub fn into_domain(self, members: Vec<String>) -> Realm {
        Realm {
            id: self.id,
            name: self.name,
            members,
        }
    }
}

impl From<&Realm> for RealmDB {
    fn from(realm: &Realm) -> Self {
        Self {
            id: realm.id.clone(),
            name: realm.name.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
