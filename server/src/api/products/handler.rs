//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// GET /api/product/list - 分页获取商品列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list(query.page, query.size).await?;
    Ok(ok(products))
}

/// GET /api/product/detail/:id - 商品详情
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;
    Ok(ok(product))
}

/// POST /api/product/add - 新增商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo.create(payload).await?;
    Ok(ok(product))
}

/// PUT /api/product/update - 更新商品（整体替换）
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo.update(payload).await?;
    Ok(ok(product))
}

/// DELETE /api/product/delete/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ProductRepository::new(state.pool());
    let result = repo.delete(id).await?;
    Ok(ok(result))
}
