//! Order API Module
//!
//! 所有状态变更都走生命周期引擎；这里只做请求解析与响应包装。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/create", post(handler::create))
        .route("/status", post(handler::update_status))
        .route("/tracking", post(handler::update_tracking))
        .route("/detail/{id}", get(handler::detail))
        // 商家订单列表（当前返回全部订单）
        .route("/merchant/list", get(handler::merchant_list))
        .route("/user/list", get(handler::user_list))
}
