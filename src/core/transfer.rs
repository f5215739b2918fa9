//! Transfer engine - Moves points from the caller to another member.
//!
//! A transfer is validated in a fixed order before the database is touched for
//! writing:
//!
//! 1. recipient identifier present and amount positive ([`Error::InvalidRequest`]);
//!    the identifier is matched exactly as given, whitespace included
//! 2. recipient is not the caller ([`Error::SelfTransfer`])
//! 3. caller's balance covers the amount ([`Error::InsufficientFunds`])
//! 4. recipient exists ([`Error::RecipientNotFound`])
//!
//! The debit, the credit and the ledger append then run in one database transaction.
//! The guarded debit is the first statement of the transaction, so the write lock is
//! taken up front and the funds check is repeated against the committed balance
//! before the recipient is resolved. Every early return drops the transaction
//! uncommitted, which rolls it back, so a failed transfer leaves balances and ledger
//! exactly as they were. Database errors inside the unit surface as
//! [`Error::TransferFailed`].

use crate::{
    core::{
        account,
        ledger::{self, NewTransferRecord},
    },
    entities::account::Model as AccountModel,
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// The parts of the recipient shown back to the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientSummary {
    /// Recipient's member identifier
    pub member_id: String,
    /// Recipient's given name
    pub first_name: String,
    /// Recipient's family name
    pub last_name: String,
}

/// Outcome of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    /// Id of the ledger record written for this transfer
    pub transaction_id: i64,
    /// Sender's balance as committed
    pub remaining_points: i64,
    /// Points moved
    pub transferred_amount: i64,
    /// Who received the points
    pub recipient: RecipientSummary,
}

/// Database errors raised inside the atomic unit are reported as a failed transfer.
fn in_unit(err: Error) -> Error {
    match err {
        Error::Database(source) => Error::TransferFailed { source },
        other => other,
    }
}

/// Transfers `amount` points from `caller` to the member identified by
/// `recipient_member_id`.
///
/// `caller` is the identity delivered by authentication; its `points` field is the
/// snapshot used for the early funds check. The committed debit is guarded again in
/// the database, so a balance drained by a concurrent transfer after the snapshot was
/// taken still fails with [`Error::InsufficientFunds`] and rolls back.
#[instrument(skip(db, caller), fields(sender = %caller.member_id))]
pub async fn transfer(
    db: &DatabaseConnection,
    caller: &AccountModel,
    recipient_member_id: &str,
    amount: i64,
) -> Result<TransferReceipt> {
    if recipient_member_id.trim().is_empty() || amount <= 0 {
        return Err(Error::invalid("to_member_id and positive amount required"));
    }

    if recipient_member_id == caller.member_id {
        return Err(Error::SelfTransfer);
    }

    if caller.points < amount {
        return Err(Error::InsufficientFunds {
            available: caller.points,
            required: amount,
        });
    }

    let txn = db
        .begin()
        .await
        .map_err(|source| Error::TransferFailed { source })?;

    if !account::debit(&txn, caller.id, amount).await.map_err(in_unit)? {
        let available = account::get_account_by_id(&txn, caller.id)
            .await
            .map_err(in_unit)?
            .map_or(0, |current| current.points);
        warn!(available, amount, "Balance changed before debit, transfer rejected");
        return Err(Error::InsufficientFunds {
            available,
            required: amount,
        });
    }

    let recipient = account::get_account_by_member_id(&txn, recipient_member_id)
        .await
        .map_err(in_unit)?
        .ok_or_else(|| Error::RecipientNotFound {
            member_id: recipient_member_id.to_string(),
        })?;

    account::credit(&txn, recipient.id, amount)
        .await
        .map_err(in_unit)?;

    let record = ledger::append_transfer_record(
        &txn,
        NewTransferRecord {
            sender_id: caller.id,
            recipient_id: recipient.id,
            amount,
            description: format!("Transfer to {}", recipient.display_name()),
        },
    )
    .await
    .map_err(in_unit)?;

    let remaining_points = account::get_account_by_id(&txn, caller.id)
        .await
        .map_err(in_unit)?
        .map(|sender| sender.points)
        .ok_or_else(|| Error::TransferFailed {
            source: sea_orm::DbErr::RecordNotFound(format!("account {}", caller.id)),
        })?;

    txn.commit()
        .await
        .map_err(|source| Error::TransferFailed { source })?;

    info!(
        transaction_id = record.id,
        recipient = %recipient.member_id,
        amount,
        remaining_points,
        "Transfer committed"
    );

    Ok(TransferReceipt {
        transaction_id: record.id,
        remaining_points,
        transferred_amount: amount,
        recipient: RecipientSummary {
            member_id: recipient.member_id,
            first_name: recipient.first_name,
            last_name: recipient.last_name,
        },
    })
}
