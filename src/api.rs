//! HTTP surface used by the chat client.

use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::domain::aggregates::{project_order, OrderParties, OrderPayload, OrderRecord};
use crate::domain::sell_command::{is_sell_command, parse_sell_command, SellCommandError, SellCommandResult};
use crate::store::{OrderRepository, Page};
use crate::ChatCommerceError;

pub const SERVICE_NAME: &str = "opensase-chatcommerce";

#[derive(Clone)] pub struct AppState { pub orders: Arc<dyn OrderRepository> }

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": SERVICE_NAME})) }))
        .route("/api/v1/sell-commands/parse", post(parse_command))
        .route("/api/v1/sell-commands/project", post(project_command))
        .route("/api/v1/chat/messages", post(post_chat_message))
        .route("/api/v1/orders", get(list_orders))
        .route("/api/v1/orders/:id", get(get_order))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

fn reject(e: ChatCommerceError) -> (StatusCode, String) {
    let status = match &e {
        ChatCommerceError::InvalidArgument(_) | ChatCommerceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChatCommerceError::OrderNotFound => StatusCode::NOT_FOUND,
        ChatCommerceError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

#[derive(Debug, Deserialize)] pub struct ParseRequest { pub text: String }

async fn parse_command(Json(r): Json<ParseRequest>) -> Json<SellCommandResult> {
    Json(parse_sell_command(&r.text))
}

#[derive(Debug, Deserialize)] pub struct ProjectRequest { pub text: String, #[serde(flatten)] pub parties: OrderParties }

async fn project_command(Json(r): Json<ProjectRequest>) -> Result<Json<OrderPayload>, (StatusCode, String)> {
    let parsed = parse_sell_command(&r.text);
    if !parsed.is_valid {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, parsed.error.unwrap_or_default()));
    }
    project_order(&parsed, r.parties).map(Json).map_err(reject)
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest { pub text: String, pub product_id: Option<String>, pub buyer_id: String, pub seller_id: String }

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChatMessageResponse {
    Order { order: OrderRecord },
    Message { text: String, reason: Option<String> },
}

/// Places an order when the message is a sell command about a product;
/// anything else is passed back as plain chat text.
async fn post_chat_message(State(s): State<AppState>, Json(r): Json<ChatMessageRequest>) -> Result<(StatusCode, Json<ChatMessageResponse>), (StatusCode, String)> {
    let plain = |reason: Option<String>| (StatusCode::OK, Json(ChatMessageResponse::Message { text: r.text.clone(), reason }));
    if !is_sell_command(&r.text) {
        return Ok(plain(Some(SellCommandError::NotASellCommand.to_string())));
    }
    let parsed = parse_sell_command(&r.text);
    if !parsed.is_valid {
        return Ok(plain(parsed.error.clone()));
    }
    let Some(product_id) = r.product_id.clone() else {
        return Ok(plain(Some("No product attached to the conversation".to_string())));
    };
    let parties = OrderParties::new(product_id, r.buyer_id.clone(), r.seller_id.clone());
    let payload = project_order(&parsed, parties).map_err(|e| {
        tracing::warn!(error = %e, "rejected sell command projection");
        reject(e)
    })?;
    let order = s.orders.insert(payload).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(ChatMessageResponse::Order { order })))
}

#[derive(Debug, Deserialize)] pub struct ListParams { pub page: Option<u32>, pub per_page: Option<u32> }

async fn list_orders(State(s): State<AppState>, Query(p): Query<ListParams>) -> Result<Json<Page<OrderRecord>>, (StatusCode, String)> {
    let page = s.orders.list(p.page.unwrap_or(1), p.per_page.unwrap_or(20)).await.map_err(reject)?;
    Ok(Json(page))
}

async fn get_order(State(s): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<OrderRecord>, (StatusCode, String)> {
    s.orders.get(id).await.map_err(reject)?.map(Json).ok_or_else(|| reject(ChatCommerceError::OrderNotFound))
}
