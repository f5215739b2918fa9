//! `points-transfer` - member points accounts and peer-to-peer point transfers
//!
//! Members register, log in with a bearer token, look each other up by member id and
//! send points to one another. Every transfer debits one balance, credits another and
//! appends a ledger record as a single atomic unit.

// Hard errors: no unsafe, no ignored results, no broken doc links
#![deny(
    unsafe_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Error paths propagate; tests opt out locally
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::dbg_macro,

    // Shared state goes through Arc::clone
    clippy::clone_on_ref_ptr,
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::too_many_lines,

    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc, // every fallible fn returns crate::errors::Result
)]

/// Registration, login and bearer-token identity
pub mod auth;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - accounts, transfers, ledger history and member lookup
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// HTTP routes, handlers and authentication middleware
pub mod http;

#[cfg(test)]
pub mod test_utils;
