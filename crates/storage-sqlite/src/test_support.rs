//! Temp-file database fixtures for repository tests.

use std::sync::Arc;

use rentledger_core::properties::Property;
use rentledger_core::realms::Realm;
use rentledger_core::tenants::Tenant;
use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the database file alive for the test's duration.
    _dir: TempDir,
}

/// Creates a migrated database in a fresh temp directory.
///
/// Must run inside a Tokio runtime since it spawns the writer actor.
pub fn test_db() -> TestDb {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let db_path = init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub fn realm(id: &str, members: &[&str]) -> Realm {
    Realm {
        id: id.to_string(),
        name: format!("Realm {}", id),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn tenant(id: &str, realm_id: &str, name: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        realm_id: realm_id.to_string(),
        name: name.to_string(),
        begin_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: None,
        termination_date: None,
    }
}

pub fn property(id: &str, realm_id: &str, available: bool) -> Property {
    Property {
        id: id.to_string(),
        realm_id: realm_id.to_string(),
        name: format!("Unit {}", id),
        property_type: Some("apartment".to_string()),
        price: Some(rust_decimal::Decimal::new(95000, 2)),
        available,
    }
}
