//! Service API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{Service, ServiceCreate, ServiceUpdate};
use crate::db::repository::ServiceRepository;
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

/// GET /api/service/list - 分页获取服务列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Service>>>> {
    let repo = ServiceRepository::new(state.pool());
    let services = repo.list(query.page, query.size).await?;
    Ok(ok(services))
}

/// GET /api/service/detail/:id - 服务详情
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Service>>> {
    let repo = ServiceRepository::new(state.pool());
    let service = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {}", id)))?;
    Ok(ok(service))
}

/// POST /api/service/add - 新增服务
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<AppResponse<Service>>> {
    let repo = ServiceRepository::new(state.pool());
    let service = repo.create(payload).await?;
    Ok(ok(service))
}

/// PUT /api/service/update - 更新服务（整体替换）
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<AppResponse<Service>>> {
    let repo = ServiceRepository::new(state.pool());
    let service = repo.update(payload).await?;
    Ok(ok(service))
}

/// DELETE /api/service/delete/:id - 删除服务
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ServiceRepository::new(state.pool());
    let result = repo.delete(id).await?;
    Ok(ok(result))
}
