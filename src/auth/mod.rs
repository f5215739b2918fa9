//! Registration, login and identity resolution.
//!
//! This is the identity provider for the core: it turns credentials into a token and a
//! token back into an [`account::Model`]. The core only ever sees the resolved account.

/// Argon2 password hashing
pub mod password;
/// JWT issuing and verification
pub mod token;

pub use token::{Claims, TokenKeys};

use crate::{
    config::Settings,
    core::account::{self as account_store, NewAccount},
    entities::account,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// Registration input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    /// Login e-mail address
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Birthday as `YYYY-MM-DD`
    pub birthday: String,
    /// Requested member identifier
    pub member_id: String,
}

/// Creates an account with the configured starting balance and tier.
#[instrument(skip(db, settings, req), fields(member_id = %req.member_id))]
pub async fn register(
    db: &DatabaseConnection,
    settings: &Settings,
    req: RegisterRequest,
) -> Result<account::Model> {
    if req.email.trim().is_empty() || req.password.is_empty() || req.member_id.trim().is_empty()
    {
        return Err(Error::invalid("email, password and member_id required"));
    }

    let password_hash = password::hash_password(&req.password)?;
    let created = account_store::create_account(
        db,
        NewAccount {
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            birthday: req.birthday,
            member_id: req.member_id,
            member_tier: settings.default_tier.clone(),
            points: settings.starting_points,
        },
    )
    .await?;

    info!(account_id = created.id, "Account registered");
    Ok(created)
}

/// Checks credentials and issues a login token.
///
/// Unknown e-mail and wrong password are indistinguishable to the caller.
#[instrument(skip(db, keys, password))]
pub async fn login(
    db: &DatabaseConnection,
    keys: &TokenKeys,
    email: &str,
    password: &str,
) -> Result<String> {
    let Some(account) = account_store::get_account_by_email(db, email).await? else {
        warn!("Login for unknown e-mail");
        return Err(Error::InvalidCredentials);
    };

    password::verify_password(password, &account.password_hash)?;
    keys.issue(account.id)
}

/// Resolves a bearer token to the account it was issued for.
///
/// Every failure, including a valid token for a vanished account, is
/// [`Error::Unauthenticated`].
pub async fn authenticate(
    db: &DatabaseConnection,
    keys: &TokenKeys,
    token: &str,
) -> Result<account::Model> {
    let account_id = keys.verify(token)?.account_id()?;
    account_store::get_account_by_id(db, account_id)
        .await?
        .ok_or(Error::Unauthenticated)
}
