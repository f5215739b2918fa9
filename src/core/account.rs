//! Account store - Reads and writes rows of the `accounts` table.
//!
//! Lookups are available by internal id, member identifier and e-mail. Balance writes
//! are generic over [`ConnectionTrait`] so they run inside the caller's database
//! transaction when invoked from the transfer engine.

use crate::{
    entities::{Account, account},
    errors::{DuplicateField, Error, Result},
};
use sea_orm::{Set, SqlErr, prelude::*, sea_query::Expr};
use tracing::debug;

/// Field values for a new account row. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login e-mail address
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone number
    pub phone: String,
    /// Birthday as `YYYY-MM-DD`
    pub birthday: String,
    /// Public member identifier
    pub member_id: String,
    /// Tier label
    pub member_tier: String,
    /// Opening balance
    pub points: i64,
}

/// Finds an account by its internal id.
pub async fn get_account_by_id<C>(db: &C, id: i64) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Finds an account by its public member identifier.
pub async fn get_account_by_member_id<C>(db: &C, member_id: &str) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find()
        .filter(account::Column::MemberId.eq(member_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an account by its login e-mail.
pub async fn get_account_by_email<C>(db: &C, email: &str) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find()
        .filter(account::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new account, rejecting a taken e-mail or member identifier.
///
/// E-mail is checked before member identifier. A uniqueness violation raised by the
/// database itself (two registrations racing) is reported the same way.
pub async fn create_account<C>(db: &C, new: NewAccount) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    if new.points < 0 {
        return Err(Error::invalid("opening balance cannot be negative"));
    }
    if get_account_by_email(db, &new.email).await?.is_some() {
        return Err(Error::Duplicate {
            field: DuplicateField::Email,
        });
    }
    if get_account_by_member_id(db, &new.member_id).await?.is_some() {
        return Err(Error::Duplicate {
            field: DuplicateField::MemberId,
        });
    }

    let now = chrono::Utc::now();
    let model = account::ActiveModel {
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        phone: Set(new.phone),
        birthday: Set(new.birthday),
        member_id: Set(new.member_id),
        member_tier: Set(new.member_tier),
        points: Set(new.points),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model.insert(db).await.map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            let field = if message.contains("member_id") {
                DuplicateField::MemberId
            } else {
                DuplicateField::Email
            };
            Error::Duplicate { field }
        }
        _ => Error::Database(err),
    })
}

/// Overwrites an account's balance. Negative balances are rejected.
pub async fn set_balance<C>(db: &C, id: i64, new_balance: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    if new_balance < 0 {
        return Err(Error::invalid("balance cannot be negative"));
    }

    let result = Account::update_many()
        .col_expr(account::Column::Points, Expr::value(new_balance))
        .col_expr(account::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(account::Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotUpdated.into());
    }
    Ok(())
}

/// Removes `amount` points from an account if, and only if, it holds at least that many.
///
/// The check and the decrement are one statement:
/// `UPDATE accounts SET points = points - ? WHERE id = ? AND points >= ?`,
/// so two concurrent debits can never both pass against the same balance.
/// Returns `false` when the guard rejected the debit.
pub async fn debit<C>(db: &C, id: i64, amount: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Account::update_many()
        .col_expr(
            account::Column::Points,
            Expr::col(account::Column::Points).sub(amount),
        )
        .col_expr(account::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(account::Column::Id.eq(id))
        .filter(account::Column::Points.gte(amount))
        .exec(db)
        .await?;

    debug!(account_id = id, amount, applied = (result.rows_affected == 1), "debit");
    Ok(result.rows_affected == 1)
}

/// Adds `amount` points to an account.
///
/// The sum must stay within `i64`; `SQLite` would otherwise store it as `REAL`. A
/// credit that would overflow, like one to a missing account, updates nothing and
/// fails with [`DbErr::RecordNotUpdated`].
pub async fn credit<C>(db: &C, id: i64, amount: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    if amount < 0 {
        return Err(Error::invalid("credit amount cannot be negative"));
    }

    let result = Account::update_many()
        .col_expr(
            account::Column::Points,
            Expr::col(account::Column::Points).add(amount),
        )
        .col_expr(account::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(account::Column::Id.eq(id))
        .filter(account::Column::Points.lte(i64::MAX - amount))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotUpdated.into());
    }
    debug!(account_id = id, amount, "credit");
    Ok(())
}
