//! 认证授权模块
//!
//! 受保护命名空间的请求门控：
//! - [`GatePolicy`] - 纯决策策略
//! - [`CurrentUser`] - 解析后的调用方身份
//! - [`authorize`] - axum 中间件

pub mod gate;
pub mod middleware;

pub use gate::{CurrentUser, GateDenial, GatePolicy};
pub use gate::{DEBUG_OPENID_HEADER, OPENID_HEADER, PROTECTED_PREFIX};
pub use middleware::authorize;
