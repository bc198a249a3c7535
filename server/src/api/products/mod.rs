//! Product API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/product", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/list", get(handler::list))
        .route("/detail/{id}", get(handler::detail))
        .route("/add", post(handler::create))
        .route("/update", put(handler::update))
        .route("/delete/{id}", delete(handler::delete))
}
