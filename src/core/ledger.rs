//! Ledger - Append-only log of completed transfers.
//!
//! Records are inserted once, inside the transfer's database transaction, and never
//! updated or deleted. Reads return records newest first with ties broken by id.

use crate::{
    entities::{TransferRecord, TransferStatus, transfer_record},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, QuerySelect, Set, prelude::*};

/// Field values for a record about to be appended.
#[derive(Debug, Clone)]
pub struct NewTransferRecord {
    /// Debited account id
    pub sender_id: i64,
    /// Credited account id
    pub recipient_id: i64,
    /// Points moved
    pub amount: i64,
    /// Human-readable description
    pub description: String,
}

/// Appends one completed transfer record and returns it with its assigned id.
pub async fn append_transfer_record<C>(
    db: &C,
    record: NewTransferRecord,
) -> Result<transfer_record::Model>
where
    C: ConnectionTrait,
{
    if record.amount <= 0 {
        return Err(Error::invalid("transfer amount must be positive"));
    }
    if record.sender_id == record.recipient_id {
        return Err(Error::SelfTransfer);
    }

    let model = transfer_record::ActiveModel {
        sender_id: Set(record.sender_id),
        recipient_id: Set(record.recipient_id),
        amount: Set(record.amount),
        kind: Set(transfer_record::KIND_TRANSFER.to_string()),
        status: Set(TransferStatus::Completed),
        description: Set(record.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Lists up to `limit` records where the account is sender or recipient, newest first.
pub async fn list_for_account<C>(
    db: &C,
    account_id: i64,
    limit: u64,
) -> Result<Vec<transfer_record::Model>>
where
    C: ConnectionTrait,
{
    TransferRecord::find()
        .filter(
            Condition::any()
                .add(transfer_record::Column::SenderId.eq(account_id))
                .add(transfer_record::Column::RecipientId.eq(account_id)),
        )
        .order_by_desc(transfer_record::Column::CreatedAt)
        .order_by_desc(transfer_record::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
