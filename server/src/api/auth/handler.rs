//! Authentication Handlers
//!
//! 手机号登录：首次登录即注册，返回 openid 作为会话令牌。
//! 小程序正式环境应走 wx.login → code → openid；这里沿用演示流程，
//! 用手机号推导确定性 openid。

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::AppError;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppResponse, AppResult, ok};

const DEFAULT_AVATAR: &str = "https://placehold.co/100x100/png?text=U";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    /// 短信验证码 - 演示流程不校验
    #[serde(default)]
    pub code: String,
}

/// POST /api/auth/login - 登录（未注册则自动注册，默认 user 角色）
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<serde_json::Value>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // 演示用确定性 openid；merchant / admin 角色由独立的角色变更操作授予
    let openid = format!("openid_{}", req.phone);

    let repo = UserRepository::new(state.pool());
    let user = match repo.find_by_openid(&openid).await? {
        Some(user) => user,
        None => {
            let nickname = format!("User {}", req.phone.get(7..).unwrap_or(&req.phone));
            let user = repo
                .create(
                    &openid,
                    Some(nickname.as_str()),
                    Some(DEFAULT_AVATAR),
                    Some(req.phone.as_str()),
                )
                .await?;
            tracing::info!(openid = %user.openid, "Registered new user");
            user
        }
    };

    Ok(ok(json!({
        "token": user.openid.clone(),
        "role": user.role,
        "openid": user.openid.clone(),
        "userInfo": user,
    })))
}
