//! PetMall Server - 宠物市集小程序后端
//!
//! # 架构概述
//!
//! - **订单生命周期** (`orders`): 封闭状态机 + 幂等状态流转引擎
//! - **授权门控** (`auth`): 基于身份头与角色的请求拦截
//! - **HTTP API** (`api`): RESTful API 接口
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx) 存储
//!
//! # 模块结构
//!
//! ```text
//! server/src/
//! ├── core/          # 配置、状态、服务器启动
//! ├── auth/          # 授权门控（纯策略 + 中间件）
//! ├── orders/        # 订单状态机与生命周期引擎
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层（模型 + 仓储）
//! └── utils/         # 错误、响应、日志
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, GatePolicy};
pub use core::{Config, Server, ServerState, build_router};
pub use db::DbService;
pub use orders::{NewOrder, OrderError, OrderLifecycle, OrderStatus, TransitionOutcome};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
