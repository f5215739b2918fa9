//! Core business logic - framework-agnostic account, ledger and transfer operations.
//!
//! Every function takes the database handle explicitly; nothing here knows about
//! HTTP or tokens.

/// Account store
pub mod account;
/// Recent-transfer view for one account
pub mod history;
/// Append-only transfer log
pub mod ledger;
/// Public member search
pub mod lookup;
/// Point transfer between members
pub mod transfer;
