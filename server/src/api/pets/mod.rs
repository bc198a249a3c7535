//! Pet API 模块
//!
//! 路径沿用小程序端的 `/api/cat` 约定。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cat", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/list", get(handler::list))
        .route("/detail/{id}", get(handler::detail))
        .route("/add", post(handler::create))
        .route("/update", put(handler::update))
        .route("/status", put(handler::update_status))
        .route("/delete/{id}", delete(handler::delete))
}
