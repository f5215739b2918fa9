//! # HTTP boundary
//!
//! Builds the axum router around the core. Authentication runs as route middleware;
//! handlers receive the resolved account and never see credentials.
//!
//! | Method | Path                   | Auth | Description                    |
//! |--------|------------------------|------|--------------------------------|
//! | GET    | `/`                    | no   | Liveness                       |
//! | POST   | `/register`            | no   | Create an account              |
//! | POST   | `/login`               | no   | Exchange credentials for token |
//! | GET    | `/me`                  | yes  | Caller's own account           |
//! | POST   | `/transfer`            | yes  | Send points to a member        |
//! | GET    | `/transactions/recent` | yes  | Caller's recent transfers      |
//! | GET    | `/search/user`         | yes  | Public profile by member id    |

/// Error to response mapping
pub mod error;
/// Route handlers
pub mod handlers;
/// Bearer-token authentication
pub mod middleware;
/// Shared handler state
pub mod state;


pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route("/transfer", post(handlers::transfer))
        .route("/transactions/recent", get(handlers::recent_transactions))
        .route("/search/user", get(handlers::search_user))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            middleware::require_account,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
