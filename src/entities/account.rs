//! Account entity - One row per registered member.
//!
//! Each account carries an internal id, a public `member_id` used for transfers and
//! search, login credentials, profile fields and the point balance. Only the
//! transfer engine writes `points` after registration.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Internal identifier, assigned at creation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login e-mail address
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string; never leaves the backend
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Birthday as `YYYY-MM-DD`
    pub birthday: String,
    /// Public member identifier (e.g. `"LBK001234"`)
    #[sea_orm(unique)]
    pub member_id: String,
    /// Tier label such as `"Gold"`
    pub member_tier: String,
    /// Available points, never negative
    pub points: i64,
    /// When the account was registered
    pub created_at: DateTimeUtc,
    /// When the account row last changed
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// First and last name joined for display.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Accounts are referenced by transfer records; the foreign keys live there.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
