//! Merchant API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Merchant, MerchantCreate, MerchantUpdate};
use crate::db::repository::{
    MerchantRepository, OrderRepository, PetRepository, ProductRepository, ServiceRepository,
};
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/merchant/dashboard - 商家后台统计
///
/// 门控已解析的身份直接从请求扩展复用，不再二次查询。
pub async fn dashboard(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    tracing::debug!(openid = %user.openid, role = %user.role, "Dashboard requested");
    let pool = state.pool();
    let pets = PetRepository::new(pool.clone()).count().await?;
    let products = ProductRepository::new(pool.clone()).count().await?;
    let services = ServiceRepository::new(pool.clone()).count().await?;
    let orders = OrderRepository::new(pool).list_all().await?.len();

    Ok(ok(json!({
        "pets": pets,
        "products": products,
        "services": services,
        "orders": orders,
        // 独立客户数尚未统计
        "customers": 0,
        "recentOrders": [],
    })))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub keyword: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// GET /api/merchant/list - 分页获取商家列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    let repo = MerchantRepository::new(state.pool());
    let merchants = repo
        .list(query.page, query.size, query.keyword.as_deref())
        .await?;
    let total = merchants.len();

    Ok(ok(json!({
        "list": merchants,
        "page": query.page,
        "size": query.size,
        "total": total,
    })))
}

/// GET /api/merchant/detail/:id - 商家详情
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Merchant>>> {
    let repo = MerchantRepository::new(state.pool());
    let merchant = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Merchant {}", id)))?;
    Ok(ok(merchant))
}

/// POST /api/merchant/add - 新增商家
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MerchantCreate>,
) -> AppResult<Json<AppResponse<Merchant>>> {
    let repo = MerchantRepository::new(state.pool());
    let merchant = repo.create(payload).await?;
    Ok(ok(merchant))
}

/// PUT /api/merchant/update - 更新商家（整体替换）
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<MerchantUpdate>,
) -> AppResult<Json<AppResponse<Merchant>>> {
    let repo = MerchantRepository::new(state.pool());
    let merchant = repo.update(payload).await?;
    Ok(ok(merchant))
}

/// DELETE /api/merchant/delete/:id - 删除商家
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = MerchantRepository::new(state.pool());
    let result = repo.delete(id).await?;
    Ok(ok(result))
}
