use alloy::primitives::{Address, Bytes, B256};
use axum::{
    extract::{Extension, FromRequest, FromRequestParts, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::abi::{self, CallOutcome};
use crate::accounts::parse_address;
use crate::auth::{require_signature, AuthenticatedCaller};
use crate::error::{AppError, AppResult};
use crate::node::{LedgerNode, NodeStatus, TxReceipt};
use crate::types::{
    AggregateReport, ArtistProfile, CreativeAnalyticsRecord, IncomeRecord, PlatformStats, SessionId,
};

/// JSON body extractor whose rejections use the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections use the API error shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub owner: Address,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub value: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagResponse {
    pub address: Address,
    pub value: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterArtistRequest {
    pub artist_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeAnalystRequest {
    pub analyst: Address,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCallRequest {
    pub data: Bytes,
}

// App state holding the node
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<LedgerNode>,
}

pub fn create_router(node: Arc<LedgerNode>) -> Router {
    let state = AppState { node };

    // Caller-scoped routes need a valid request signature
    let signed = Router::new()
        .route("/api/v1/artists", post(register_artist))
        .route("/api/v1/analysts", post(authorize_analyst))
        .route("/api/v1/profile", get(my_profile))
        .route("/api/v1/income", post(submit_income_data))
        .route("/api/v1/creative-analytics", post(submit_creative_analytics))
        .route("/api/v1/analysis", post(generate_income_analysis))
        .route("/api/v1/reports/{session}", get(aggregate_report))
        .route("/api/v1/rpc", post(raw_call))
        .route_layer(middleware::from_fn(require_signature));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/node/status", get(node_status))
        .route("/api/v1/owner", get(owner))
        .route("/api/v1/total-artists", get(total_artists))
        .route("/api/v1/session", get(analysis_session_id))
        .route("/api/v1/platform/stats", get(platform_stats))
        .route("/api/v1/artists/{address}/registered", get(is_registered_artist))
        .route("/api/v1/analysts/{address}/authorized", get(is_authorized_analyst))
        .route("/api/v1/receipts/{hash}", get(receipt))
        .merge(signed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn node_status(State(state): State<AppState>) -> Json<NodeStatus> {
    Json(state.node.status().await)
}

async fn owner(State(state): State<AppState>) -> Json<OwnerResponse> {
    let owner = state.node.view(|c| c.owner()).await;
    Json(OwnerResponse { owner })
}

async fn total_artists(State(state): State<AppState>) -> Json<CountResponse> {
    let value = state.node.view(|c| c.total_artists()).await;
    Json(CountResponse { value })
}

async fn analysis_session_id(State(state): State<AppState>) -> Json<CountResponse> {
    let value = state.node.view(|c| c.analysis_session_id()).await;
    Json(CountResponse { value })
}

async fn platform_stats(State(state): State<AppState>) -> Json<PlatformStats> {
    Json(state.node.view(|c| c.get_platform_stats()).await)
}

async fn is_registered_artist(
    ApiPath(address): ApiPath<String>,
    State(state): State<AppState>,
) -> AppResult<Json<FlagResponse>> {
    let address = parse_address(&address)?;
    let value = state.node.view(|c| c.is_registered_artist(address)).await;
    Ok(Json(FlagResponse { address, value }))
}

async fn is_authorized_analyst(
    ApiPath(address): ApiPath<String>,
    State(state): State<AppState>,
) -> AppResult<Json<FlagResponse>> {
    let address = parse_address(&address)?;
    let value = state.node.view(|c| c.is_authorized_analyst(address)).await;
    Ok(Json(FlagResponse { address, value }))
}

async fn receipt(
    ApiPath(hash): ApiPath<String>,
    State(state): State<AppState>,
) -> AppResult<Json<TxReceipt>> {
    let hash: B256 = hash
        .parse()
        .map_err(|e| AppError::InvalidInput(format!("Invalid transaction hash '{}': {}", hash, e)))?;
    let receipt = state
        .node
        .receipt(hash)
        .await
        .ok_or_else(|| AppError::NotFound(format!("no transaction {}", hash)))?;
    Ok(Json(receipt))
}

async fn my_profile(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
) -> AppResult<Json<ArtistProfile>> {
    let profile = state.node.view_as(from, |c, ctx| c.get_my_profile(ctx)).await?;
    Ok(Json(profile))
}

async fn aggregate_report(
    ApiPath(session): ApiPath<SessionId>,
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
) -> AppResult<Json<AggregateReport>> {
    let report = state
        .node
        .view_as(from, |c, ctx| c.get_aggregate_report(ctx, session))
        .await?;
    Ok(Json(report))
}

async fn register_artist(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
    ApiJson(payload): ApiJson<RegisterArtistRequest>,
) -> AppResult<Json<TxReceipt>> {
    let receipt = state
        .node
        .transact(from, |c, ctx| c.register_artist(ctx, &payload.artist_id))
        .await?;
    Ok(Json(receipt))
}

async fn authorize_analyst(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
    ApiJson(payload): ApiJson<AuthorizeAnalystRequest>,
) -> AppResult<Json<TxReceipt>> {
    let receipt = state
        .node
        .transact(from, |c, ctx| c.authorize_analyst(ctx, payload.analyst))
        .await?;
    Ok(Json(receipt))
}

async fn submit_income_data(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
    ApiJson(record): ApiJson<IncomeRecord>,
) -> AppResult<Json<TxReceipt>> {
    let receipt = state
        .node
        .transact(from, |c, ctx| c.submit_income_data(ctx, record))
        .await?;
    Ok(Json(receipt))
}

async fn submit_creative_analytics(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
    ApiJson(record): ApiJson<CreativeAnalyticsRecord>,
) -> AppResult<Json<TxReceipt>> {
    let receipt = state
        .node
        .transact(from, |c, ctx| c.submit_creative_analytics(ctx, record))
        .await?;
    Ok(Json(receipt))
}

async fn generate_income_analysis(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
) -> AppResult<Json<TxReceipt>> {
    let receipt = state
        .node
        .transact(from, |c, ctx| c.generate_income_analysis(ctx))
        .await?;
    Ok(Json(receipt))
}

async fn raw_call(
    State(state): State<AppState>,
    Extension(AuthenticatedCaller(from)): Extension<AuthenticatedCaller>,
    ApiJson(payload): ApiJson<RawCallRequest>,
) -> AppResult<Json<CallOutcome>> {
    let outcome = abi::dispatch(&state.node, from, &payload.data).await?;
    Ok(Json(outcome))
}
