//! 授权中间件
//!
//! 把 [`GatePolicy`](super::gate::GatePolicy) 接到 axum 请求管线上：
//! 提取身份头、做一次角色查询、执行纯决策，放行时注入
//! [`CurrentUser`](super::gate::CurrentUser)。每个请求最多一次查询，
//! 不跨请求缓存（角色可能随时变更）。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::gate::{CurrentUser, GatePolicy};
use crate::AppError;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;

/// Authorization gate for the protected namespace
pub async fn authorize(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let policy = GatePolicy::new(state.config.enable_debug_header);

    let path = req.uri().path().to_string();
    if !policy.applies_to(&path) {
        return Ok(next.run(req).await);
    }

    let identity = policy.extract_identity(req.headers());

    // 仅在有身份时查询一次角色
    let role = match identity.as_deref() {
        Some(openid) => UserRepository::new(state.pool())
            .find_by_openid(openid)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .map(|user| user.role),
        None => None,
    };

    match GatePolicy::decide(identity, role) {
        Ok(user) => {
            req.extensions_mut().insert::<CurrentUser>(user);
            Ok(next.run(req).await)
        }
        Err(denial) => {
            security_log!(
                "WARN",
                "access_denied",
                path = path,
                reason = format!("{:?}", denial)
            );
            Err(denial.into())
        }
    }
}
