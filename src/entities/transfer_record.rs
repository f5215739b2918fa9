//! Transfer record entity - The append-only ledger of completed transfers.
//!
//! Each record links a `sender_id` and a `recipient_id` (both `accounts.id`) with a
//! positive `amount`, a `kind` tag, a [`TransferStatus`] and a description.
//! Rows are written once, as the last step of a successful transfer.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind tag written on every point transfer.
pub const KIND_TRANSFER: &str = "transfer";

/// Lifecycle status of a record. Only `Completed` is produced today.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Reserved
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Debit, credit and record all committed
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Reserved
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl TransferStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Transfer record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transfer_records")]
pub struct Model {
    /// Unique, monotonically assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account the points left
    pub sender_id: i64,
    /// Account the points arrived at
    pub recipient_id: i64,
    /// Points moved, always positive
    pub amount: i64,
    /// Record kind, `"transfer"`
    pub kind: String,
    /// Lifecycle status
    pub status: TransferStatus,
    /// Human-readable description, e.g. `"Transfer to Somchai Jaidee"`
    pub description: String,
    /// When the owning transfer committed
    pub created_at: DateTimeUtc,
}

/// Each record belongs to two accounts
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The debited account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::SenderId",
        to = "super::account::Column::Id"
    )]
    Sender,
    /// The credited account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::RecipientId",
        to = "super::account::Column::Id"
    )]
    Recipient,
}

impl ActiveModelBehavior for ActiveModel {}
