//! 授权门控策略
//!
//! 受保护命名空间的放行/拒绝决策。决策本身是 (路径, 身份, 角色查询结果)
//! 的纯函数；头部提取与角色查询由中间件完成后注入。
//!
//! # 策略顺序
//!
//! 1. 路径不在保护前缀下 → 无条件放行
//! 2. 从 `x-wx-openid` 取身份；允许时回退 `x-debug-openid`（仅限非生产）
//! 3. 无身份 → 401
//! 4. 身份未注册 → 403 (User not registered)
//! 5. 角色非 merchant / admin → 403 (Insufficient Permissions)
//! 6. 放行，并把解析出的 [`CurrentUser`] 注入请求扩展

use axum::http::HeaderMap;

use crate::AppError;
use crate::db::models::Role;

/// Namespace guarded by the gate
pub const PROTECTED_PREFIX: &str = "/api/merchant";

/// Identity header injected by the WeChat gateway
pub const OPENID_HEADER: &str = "x-wx-openid";

/// Local-debug fallback header; only honored when the config enables it
pub const DEBUG_OPENID_HEADER: &str = "x-debug-openid";

/// Identity resolved by the gate, reusable downstream within one request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub openid: String,
    pub role: Role,
}

/// Denial reasons, mapped 1:1 onto response codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDenial {
    /// No identity from either header (401)
    MissingIdentity,
    /// Identity has no registered record (403)
    NotRegistered,
    /// Registered, but the role carries no access here (403)
    InsufficientRole(Role),
}

impl From<GateDenial> for AppError {
    fn from(denial: GateDenial) -> Self {
        match denial {
            GateDenial::MissingIdentity => AppError::Unauthorized,
            GateDenial::NotRegistered => AppError::forbidden("User not registered"),
            GateDenial::InsufficientRole(_) => AppError::forbidden("Insufficient Permissions"),
        }
    }
}

/// Gate configuration snapshot
#[derive(Debug, Clone)]
pub struct GatePolicy {
    protected_prefix: &'static str,
    allow_debug_header: bool,
}

impl GatePolicy {
    pub fn new(allow_debug_header: bool) -> Self {
        Self {
            protected_prefix: PROTECTED_PREFIX,
            allow_debug_header,
        }
    }

    /// Whether the gate has any say over this path
    pub fn applies_to(&self, path: &str) -> bool {
        path.starts_with(self.protected_prefix)
    }

    /// Caller identity from the primary header, falling back to the
    /// debug header when enabled. Empty values count as absent.
    pub fn extract_identity(&self, headers: &HeaderMap) -> Option<String> {
        let primary = header_value(headers, OPENID_HEADER);
        if primary.is_some() {
            return primary;
        }
        if self.allow_debug_header {
            return header_value(headers, DEBUG_OPENID_HEADER);
        }
        None
    }

    /// The pure allow/deny decision
    pub fn decide(identity: Option<String>, role: Option<Role>) -> Result<CurrentUser, GateDenial> {
        let openid = identity.ok_or(GateDenial::MissingIdentity)?;
        let role = role.ok_or(GateDenial::NotRegistered)?;
        if !role.is_privileged() {
            return Err(GateDenial::InsufficientRole(role));
        }
        Ok(CurrentUser { openid, role })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn only_protected_prefix_is_gated() {
        let policy = GatePolicy::new(false);
        assert!(policy.applies_to("/api/merchant/list"));
        assert!(policy.applies_to("/api/merchant/dashboard"));
        assert!(!policy.applies_to("/api/order/create"));
        assert!(!policy.applies_to("/api/cat/list"));
        assert!(!policy.applies_to("/"));
    }

    #[test]
    fn primary_header_wins_over_debug() {
        let policy = GatePolicy::new(true);
        let mut headers = HeaderMap::new();
        headers.insert(OPENID_HEADER, HeaderValue::from_static("wx-123"));
        headers.insert(DEBUG_OPENID_HEADER, HeaderValue::from_static("dbg-456"));
        assert_eq!(policy.extract_identity(&headers), Some("wx-123".to_string()));
    }

    #[test]
    fn debug_header_is_ignored_when_disabled() {
        let mut headers = HeaderMap::new();
        headers.insert(DEBUG_OPENID_HEADER, HeaderValue::from_static("dbg-456"));

        let enabled = GatePolicy::new(true);
        assert_eq!(enabled.extract_identity(&headers), Some("dbg-456".to_string()));

        let disabled = GatePolicy::new(false);
        assert_eq!(disabled.extract_identity(&headers), None);
    }

    #[test]
    fn empty_header_counts_as_absent() {
        let policy = GatePolicy::new(true);
        let mut headers = HeaderMap::new();
        headers.insert(OPENID_HEADER, HeaderValue::from_static(""));
        assert_eq!(policy.extract_identity(&headers), None);
    }

    #[test]
    fn decision_matrix() {
        // 无身份
        assert_eq!(
            GatePolicy::decide(None, None).unwrap_err(),
            GateDenial::MissingIdentity
        );
        // 有身份但未注册
        assert_eq!(
            GatePolicy::decide(Some("wx-1".into()), None).unwrap_err(),
            GateDenial::NotRegistered
        );
        // 普通用户角色不足
        assert_eq!(
            GatePolicy::decide(Some("wx-1".into()), Some(Role::User)).unwrap_err(),
            GateDenial::InsufficientRole(Role::User)
        );
        // merchant / admin 放行
        for role in [Role::Merchant, Role::Admin] {
            let user = GatePolicy::decide(Some("wx-1".into()), Some(role)).unwrap();
            assert_eq!(user.openid, "wx-1");
            assert_eq!(user.role, role);
        }
    }
}
