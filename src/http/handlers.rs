//! Request handlers. Each one parses the wire shape, calls one core or auth operation
//! and serializes the result.

use crate::{
    auth::{self, RegisterRequest},
    core::{history, lookup, transfer},
    entities::account,
    errors::Error,
    http::{error::ApiError, state::AppState},
};
use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

type ApiResult<T> = Result<T, ApiError>;

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(%rejection, "Unparsable request body");
        ApiError(Error::invalid("invalid payload"))
    })
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

/// Registration response body.
#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    /// New account id
    pub id: i64,
    /// Login e-mail
    pub email: String,
    /// Member identifier
    pub member_id: String,
}

/// `POST /register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    let req = payload(body)?;
    let created = auth::register(&state.db, &state.settings, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            id: created.id,
            email: created.email,
            member_id: created.member_id,
        }),
    ))
}

/// Login request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Login e-mail
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let req = payload(body)?;
    let token = auth::login(&state.db, &state.keys, &req.email, &req.password).await?;
    Ok(Json(json!({ "token": token })))
}

/// `GET /me`
pub async fn me(Extension(caller): Extension<account::Model>) -> Json<account::Model> {
    Json(caller)
}

/// Transfer request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransferRequest {
    /// Recipient's member identifier
    pub to_member_id: String,
    /// Points to move
    pub amount: i64,
}

/// Transfer response body.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// Fixed success message
    pub message: &'static str,
    /// Committed outcome
    #[serde(flatten)]
    pub receipt: transfer::TransferReceipt,
}

/// `POST /transfer`
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<account::Model>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<Json<TransferResponse>> {
    let req = payload(body)?;
    let receipt = transfer::transfer(&state.db, &caller, &req.to_member_id, req.amount).await?;
    Ok(Json(TransferResponse {
        message: "Transfer successful",
        receipt,
    }))
}

/// Recent-history response body.
#[derive(Debug, Serialize)]
pub struct RecentTransactionsResponse {
    /// Entries, newest first
    pub transactions: Vec<history::HistoryEntry>,
}

/// `GET /transactions/recent`
pub async fn recent_transactions(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<account::Model>,
) -> ApiResult<Json<RecentTransactionsResponse>> {
    let transactions = history::recent_for(&state.db, &caller, state.settings.history_limit)
        .await?
        .collect();
    Ok(Json(RecentTransactionsResponse { transactions }))
}

/// Query string of the member search.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Member identifier to look up
    pub member_id: String,
}

/// `GET /search/user?member_id=`
pub async fn search_user(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<account::Model>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<lookup::PublicProfile>> {
    let Query(params) = params.map_err(|_| ApiError(Error::invalid("invalid query")))?;
    let profile = lookup::search_member(&state.db, &caller, &params.member_id).await?;
    Ok(Json(profile))
}
