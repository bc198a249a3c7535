//! Pet API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::{Pet, PetCreate, PetUpdate};
use crate::db::repository::PetRepository;
use crate::utils::{AppResponse, AppResult, ok};

/// Query params for paginated listing
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

/// GET /api/cat/list - 分页获取宠物列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Pet>>>> {
    let repo = PetRepository::new(state.pool());
    let pets = repo.list(query.page, query.size).await?;
    Ok(ok(pets))
}

/// GET /api/cat/detail/:id - 宠物详情
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Pet>>> {
    let repo = PetRepository::new(state.pool());
    let pet = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Pet {}", id)))?;
    Ok(ok(pet))
}

/// POST /api/cat/add - 新增宠物
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PetCreate>,
) -> AppResult<Json<AppResponse<Pet>>> {
    let repo = PetRepository::new(state.pool());
    let pet = repo.create(payload).await?;
    Ok(ok(pet))
}

/// PUT /api/cat/update - 更新宠物（整体替换）
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<PetUpdate>,
) -> AppResult<Json<AppResponse<Pet>>> {
    let repo = PetRepository::new(state.pool());
    let pet = repo.update(payload).await?;
    Ok(ok(pet))
}

#[derive(Debug, Deserialize)]
pub struct PetStatusRequest {
    pub id: i64,
    pub status: String,
}

/// PUT /api/cat/status - 只更新挂牌状态
pub async fn update_status(
    State(state): State<ServerState>,
    Json(req): Json<PetStatusRequest>,
) -> AppResult<Json<AppResponse<Pet>>> {
    let repo = PetRepository::new(state.pool());
    let pet = repo.update_status(req.id, &req.status).await?;
    Ok(ok(pet))
}

/// DELETE /api/cat/delete/:id - 删除宠物
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = PetRepository::new(state.pool());
    let result = repo.delete(id).await?;
    Ok(ok(result))
}
