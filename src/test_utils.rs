//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test accounts with sensible defaults.

use crate::{
    core::account::{NewAccount, create_account},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Placeholder stored instead of a real hash; hashing is only exercised by auth tests.
pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$placeholder";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Field values for a test account.
///
/// # Defaults
/// * `email`: lower-cased member id at `example.com`
/// * `first_name`: `"Test"`, `last_name`: the member id
/// * `member_tier`: `"Gold"`
pub fn test_new_account(member_id: &str, points: i64) -> NewAccount {
    NewAccount {
        email: format!("{}@example.com", member_id.to_lowercase()),
        password_hash: TEST_PASSWORD_HASH.to_string(),
        first_name: "Test".to_string(),
        last_name: member_id.to_string(),
        phone: "081-234-5678".to_string(),
        birthday: "1990-01-01".to_string(),
        member_id: member_id.to_string(),
        member_tier: "Gold".to_string(),
        points,
    }
}

/// Creates a test account with the defaults of [`test_new_account`].
pub async fn create_test_account(
    db: &DatabaseConnection,
    member_id: &str,
    points: i64,
) -> Result<entities::account::Model> {
    create_account(db, test_new_account(member_id, points)).await
}

/// Creates a test account with a custom display name.
pub async fn create_named_account(
    db: &DatabaseConnection,
    member_id: &str,
    first_name: &str,
    last_name: &str,
    points: i64,
) -> Result<entities::account::Model> {
    let mut new = test_new_account(member_id, points);
    new.first_name = first_name.to_string();
    new.last_name = last_name.to_string();
    create_account(db, new).await
}

/// Builds an account model without touching a database, for `MockDatabase` tests.
pub fn test_account_model(id: i64, member_id: &str, points: i64) -> entities::account::Model {
    let now = chrono::Utc::now();
    entities::account::Model {
        id,
        email: format!("{}@example.com", member_id.to_lowercase()),
        password_hash: TEST_PASSWORD_HASH.to_string(),
        first_name: "Test".to_string(),
        last_name: member_id.to_string(),
        phone: "081-234-5678".to_string(),
        birthday: "1990-01-01".to_string(),
        member_id: member_id.to_string(),
        member_tier: "Gold".to_string(),
        points,
        created_at: now,
        updated_at: now,
    }
}
