//! History reader - Recent transfers seen from one account's side.
//!
//! Ledger records are turned into [`HistoryEntry`] values: the counterparty, an
//! amount signed by direction and the commit time split into date and time.

use crate::{
    core::ledger,
    entities::{Account, account, transfer_record},
    errors::Result,
};
use sea_orm::{DatabaseConnection, prelude::*};
use serde::Serialize;
use std::collections::HashMap;

/// Default number of entries returned by [`recent_for`].
pub const DEFAULT_HISTORY_LIMIT: u64 = 10;

/// Which side of a transfer the viewing account was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The account was debited
    Sent,
    /// The account was credited
    Received,
}

/// One transfer as shown to one of its two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Ledger record id
    pub id: i64,
    /// Counterparty's first and last name
    pub contact_name: String,
    /// Counterparty's member identifier
    pub contact_member_id: String,
    /// Negative when sent, positive when received
    pub amount: i64,
    /// Direction relative to the viewing account
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Record status
    pub status: String,
    /// Commit date, `YYYY-MM-DD`
    pub date: String,
    /// Commit time, `HH:MM`
    pub time: String,
}

fn to_entry(
    viewer_id: i64,
    record: transfer_record::Model,
    counterparties: &HashMap<i64, account::Model>,
) -> HistoryEntry {
    let (direction, counterparty_id, amount) = if record.sender_id == viewer_id {
        (Direction::Sent, record.recipient_id, -record.amount)
    } else {
        (Direction::Received, record.sender_id, record.amount)
    };

    let (contact_name, contact_member_id) = counterparties
        .get(&counterparty_id)
        .map(|contact| (contact.display_name(), contact.member_id.clone()))
        .unwrap_or_default();

    HistoryEntry {
        id: record.id,
        contact_name,
        contact_member_id,
        amount,
        direction,
        status: record.status.as_str().to_string(),
        date: record.created_at.format("%Y-%m-%d").to_string(),
        time: record.created_at.format("%H:%M").to_string(),
    }
}

/// Entries produced by [`recent_for`], formatted as they are pulled.
#[derive(Debug)]
pub struct RecentHistory {
    viewer_id: i64,
    records: std::vec::IntoIter<transfer_record::Model>,
    counterparties: HashMap<i64, account::Model>,
}

impl Iterator for RecentHistory {
    type Item = HistoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| to_entry(self.viewer_id, record, &self.counterparties))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for RecentHistory {}

/// Returns up to `limit` of the account's most recent transfers, newest first.
///
/// Records and counterparties are read once; the returned iterator formats them
/// lazily and yields each entry exactly once.
pub async fn recent_for(
    db: &DatabaseConnection,
    viewer: &account::Model,
    limit: u64,
) -> Result<RecentHistory> {
    let records = ledger::list_for_account(db, viewer.id, limit).await?;

    let mut counterparty_ids: Vec<i64> = records
        .iter()
        .map(|r| {
            if r.sender_id == viewer.id {
                r.recipient_id
            } else {
                r.sender_id
            }
        })
        .collect();
    counterparty_ids.sort_unstable();
    counterparty_ids.dedup();

    let counterparties: HashMap<i64, account::Model> = if counterparty_ids.is_empty() {
        HashMap::new()
    } else {
        Account::find()
            .filter(account::Column::Id.is_in(counterparty_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    Ok(RecentHistory {
        viewer_id: viewer.id,
        records: records.into_iter(),
        counterparties,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::transfer::transfer;
    use crate::entities::TransferStatus;
    use crate::test_utils::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_entry_signs_and_splits_timestamp() {
        let alice = test_account_model(1, "LBK000001", 0);
        let bob = test_account_model(2, "LBK000002", 0);
        let counterparties = HashMap::from([(1, alice), (2, bob)]);

        let record = transfer_record::Model {
            id: 7,
            sender_id: 1,
            recipient_id: 2,
            amount: 250,
            kind: "transfer".to_string(),
            status: TransferStatus::Completed,
            description: "Transfer to Test LBK000002".to_string(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap(),
        };

        let sent = to_entry(1, record.clone(), &counterparties);
        assert_eq!(sent.amount, -250);
        assert_eq!(sent.direction, Direction::Sent);
        assert_eq!(sent.contact_member_id, "LBK000002");
        assert_eq!(sent.date, "2024-03-09");
        assert_eq!(sent.time, "14:05");
        assert_eq!(sent.status, "completed");

        let received = to_entry(2, record, &counterparties);
        assert_eq!(received.amount, 250);
        assert_eq!(received.direction, Direction::Received);
        assert_eq!(received.contact_member_id, "LBK000001");
    }

    #[test]
    fn test_entry_serializes_direction_as_type() {
        let entry = HistoryEntry {
            id: 1,
            contact_name: "Suda Suayngam".to_string(),
            contact_member_id: "LBK002345".to_string(),
            amount: -1000,
            direction: Direction::Sent,
            status: "completed".to_string(),
            date: "2024-03-09".to_string(),
            time: "14:05".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "sent");
        assert_eq!(json["amount"], -1000);
        assert!(json.get("direction").is_none());
    }

    #[tokio::test]
    async fn test_recent_for_after_scenario_transfer() -> Result<()> {
        let db = setup_test_db().await?;
        let sender = create_named_account(&db, "LBK001234", "Somchai", "Jaidee", 15_420).await?;
        let recipient =
            create_named_account(&db, "LBK002345", "Suda", "Suayngam", 15_420).await?;

        transfer(&db, &sender, "LBK002345", 1000).await?;

        let sent: Vec<HistoryEntry> = recent_for(&db, &sender, DEFAULT_HISTORY_LIMIT)
            .await?
            .collect();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].amount, -1000);
        assert_eq!(sent[0].direction, Direction::Sent);
        assert_eq!(sent[0].contact_name, "Suda Suayngam");
        assert_eq!(sent[0].contact_member_id, "LBK002345");

        let received: Vec<HistoryEntry> = recent_for(&db, &recipient, DEFAULT_HISTORY_LIMIT)
            .await?
            .collect();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].amount, 1000);
        assert_eq!(received[0].direction, Direction::Received);
        assert_eq!(received[0].contact_name, "Somchai Jaidee");
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_for_caps_at_limit_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_account(&db, "LBK000001", 10_000).await?;
        let b = create_test_account(&db, "LBK000002", 10_000).await?;

        // Alternate directions: a sends odd amounts, b sends even amounts back.
        for amount in 1..=12 {
            if amount % 2 == 1 {
                let a_now = crate::core::account::get_account_by_id(&db, a.id).await?.unwrap();
                transfer(&db, &a_now, "LBK000002", amount).await?;
            } else {
                let b_now = crate::core::account::get_account_by_id(&db, b.id).await?.unwrap();
                transfer(&db, &b_now, "LBK000001", amount).await?;
            }
        }

        let entries: Vec<HistoryEntry> = recent_for(&db, &a, 10).await?.collect();
        assert_eq!(entries.len(), 10);

        let amounts: Vec<i64> = entries.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![12, -11, 10, -9, 8, -7, 6, -5, 4, -3]);
        assert!(entries.windows(2).all(|w| w[0].id > w[1].id));

        let few: Vec<HistoryEntry> = recent_for(&db, &a, 3).await?.collect();
        assert_eq!(few.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_for_without_transfers_is_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let lonely = create_test_account(&db, "LBK000001", 100).await?;

        assert_eq!(recent_for(&db, &lonely, 10).await?.count(), 0);
        Ok(())
    }
}
