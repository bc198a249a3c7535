//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use validator::Validate;

use crate::AppError;
use crate::auth::OPENID_HEADER;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::{NewOrder, OrderError, OrderLifecycle, OrderStatus};
use crate::utils::{AppResponse, AppResult, ok, ok_with_message};

/// 创建订单请求
///
/// 身份优先取 `x-wx-openid` 头，其次取 body 里的 userId。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "itemsJson cannot be empty"))]
    pub items_json: String,
    #[validate(length(min = 1, message = "addressSnapshot cannot be empty"))]
    pub address_snapshot: String,
    #[validate(range(min = 0.01, message = "totalAmount must be greater than 0"))]
    pub total_amount: f64,
    pub user_id: Option<String>,
}

/// POST /api/order/create - 创建订单（初始状态 pending）
pub async fn create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Header identity takes precedence over the body field
    let user_id = headers
        .get(OPENID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .or(payload.user_id.clone())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation("Missing user identity"))?;

    let lifecycle = OrderLifecycle::new(state.pool());
    let order = lifecycle
        .create_order(NewOrder {
            user_id,
            total_amount: payload.total_amount,
            items_json: payload.items_json,
            address_snapshot: payload.address_snapshot,
        })
        .await?;

    Ok(ok(order))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub id: i64,
    pub status: String,
}

/// POST /api/order/status - 请求状态流转
///
/// 重复请求同一状态返回空操作成功；非法流转返回 422，
/// 消息同时点名当前状态与目标状态。
pub async fn update_status(
    State(state): State<ServerState>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let lifecycle = OrderLifecycle::new(state.pool());
    let outcome = lifecycle.request_transition(req.id, &req.status).await?;

    let message = if outcome.is_noop() {
        "Status unchanged"
    } else {
        "Status updated"
    };
    Ok(ok_with_message(outcome.order().clone(), message))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackingRequest {
    pub id: i64,
    pub tracking_number: String,
}

/// POST /api/order/tracking - 更新运单号（不受状态机约束）
pub async fn update_tracking(
    State(state): State<ServerState>,
    Json(req): Json<UpdateTrackingRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let lifecycle = OrderLifecycle::new(state.pool());
    let order = lifecycle.update_tracking(req.id, &req.tracking_number).await?;
    Ok(ok(order))
}

/// GET /api/order/detail/:id - 订单详情
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let lifecycle = OrderLifecycle::new(state.pool());
    let order = lifecycle
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;
    Ok(ok(order))
}

/// GET /api/order/merchant/list - 商家订单列表（当前返回全部订单）
pub async fn merchant_list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let lifecycle = OrderLifecycle::new(state.pool());
    let orders = lifecycle.list_all().await?;
    Ok(ok(orders))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderListQuery {
    pub user_id: Option<String>,
    /// 可选状态过滤
    pub status: Option<String>,
}

/// GET /api/order/user/list - 用户订单列表
///
/// 身份取 `x-wx-openid` 头，缺省时回退 userId 查询参数。
pub async fn user_list(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<UserOrderListQuery>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let user_id = headers
        .get(OPENID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .or(query.user_id.clone())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation("Missing user identity"))?;

    let lifecycle = OrderLifecycle::new(state.pool());
    let orders = match query.status.as_deref() {
        Some(status) => {
            let status: OrderStatus = status
                .parse()
                .map_err(|_| OrderError::InvalidStatus(status.to_string()))?;
            lifecycle.list_by_user_and_status(&user_id, status).await?
        }
        None => lifecycle.list_by_user(&user_id).await?,
    };
    Ok(ok(orders))
}
