//! Account lookup - Public search of members by member identifier.

use crate::{
    core::account::get_account_by_member_id,
    entities::account,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// What any member may see about another member. Never carries balance, e-mail or
/// internal id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    /// Member identifier
    pub member_id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Tier label
    pub member_tier: String,
}

impl From<account::Model> for PublicProfile {
    fn from(account: account::Model) -> Self {
        Self {
            member_id: account.member_id,
            first_name: account.first_name,
            last_name: account.last_name,
            member_tier: account.member_tier,
        }
    }
}

/// Finds the public profile for a member identifier.
pub async fn find_public(db: &DatabaseConnection, member_id: &str) -> Result<PublicProfile> {
    get_account_by_member_id(db, member_id)
        .await?
        .map(PublicProfile::from)
        .ok_or_else(|| Error::NotFound {
            member_id: member_id.to_string(),
        })
}

/// Searches for another member on behalf of `caller`.
///
/// Looking up one's own member identifier is refused so this path cannot be used to
/// read the caller's own record.
pub async fn search_member(
    db: &DatabaseConnection,
    caller: &account::Model,
    member_id: &str,
) -> Result<PublicProfile> {
    if member_id.trim().is_empty() {
        return Err(Error::invalid("member_id query parameter required"));
    }
    if member_id == caller.member_id {
        return Err(Error::SelfLookup);
    }
    find_public(db, member_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_public_integration() -> Result<()> {
        let db = setup_test_db().await?;
        create_named_account(&db, "LBK002345", "Suda", "Suayngam", 15_420).await?;

        let profile = find_public(&db, "LBK002345").await?;
        assert_eq!(
            profile,
            PublicProfile {
                member_id: "LBK002345".to_string(),
                first_name: "Suda".to_string(),
                last_name: "Suayngam".to_string(),
                member_tier: "Gold".to_string(),
            }
        );

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("points").is_none());
        assert!(json.get("email").is_none());
        assert!(json.get("id").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_public_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = find_public(&db, "LBK999999").await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_member_policy() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let caller = test_account_model(1, "LBK001234", 100);

        let empty = search_member(&db, &caller, "").await;
        assert!(matches!(empty.unwrap_err(), Error::InvalidRequest { .. }));

        let own = search_member(&db, &caller, "LBK001234").await;
        assert!(matches!(own.unwrap_err(), Error::SelfLookup));

        let blank = search_member(&db, &caller, "   ").await;
        assert!(matches!(blank.unwrap_err(), Error::InvalidRequest { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_member_matches_id_exactly() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = create_test_account(&db, "LBK001234", 100).await?;
        create_test_account(&db, "LBK002345", 100).await?;

        let padded = search_member(&db, &caller, " LBK002345 ").await;
        assert!(matches!(padded.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_member_finds_other() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = create_test_account(&db, "LBK001234", 100).await?;
        create_test_account(&db, "LBK002345", 100).await?;

        let found = search_member(&db, &caller, "LBK002345").await?;
        assert_eq!(found.member_id, "LBK002345");
        Ok(())
    }
}
