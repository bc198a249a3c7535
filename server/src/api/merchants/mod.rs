//! Merchant API 模块
//!
//! 整个 `/api/merchant` 命名空间位于授权门控之后，仅 merchant / admin
//! 角色可达（见 [`crate::auth`]）。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/merchant", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/list", get(handler::list))
        .route("/detail/{id}", get(handler::detail))
        .route("/add", post(handler::create))
        .route("/update", put(handler::update))
        .route("/delete/{id}", delete(handler::delete))
}
