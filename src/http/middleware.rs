use crate::{auth, errors::Error, http::error::ApiError, http::state::AppState};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Resolves the `Authorization: Bearer <token>` header to an account and stores it in
/// the request extensions for the handler.
pub async fn require_account(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError(Error::Unauthenticated))?;

    let token = match header_value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        _ => return Err(ApiError(Error::Unauthenticated)),
    };

    let account = auth::authenticate(&state.db, &state.keys, token).await?;
    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}
