//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`AppResponse`] - API 响应结构
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E0xxx | 业务错误 | E0003 资源不存在 |
//! | E2xxx | 权限错误 | E2001 无权限 |
//! | E3xxx | 认证错误 | E3001 未登录 |
//! | E9xxx | 系统错误 | E9002 数据库错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order 42"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API 统一响应结构
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// 错误码 (E0000 表示成功)
    pub code: String,
    /// 消息
    pub message: String,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证/权限错误 (4xx) ==========
    /// 缺少身份 (401)
    #[error("Unauthorized: missing identity")]
    Unauthorized,

    /// 无权限 (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 资源冲突 (409)
    #[error("Resource already exists: {0}")]
    Conflict(String),

    /// 验证失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 未知订单状态 (400)
    #[error("Unknown order status: {0}")]
    InvalidStatus(String),

    /// 非法状态流转 (422)
    #[error("Cannot transition order from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    // ========== 系统错误 (5xx) ==========
    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict(resource.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// 错误码 (稳定的机器可读标识)
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "E3001",
            AppError::Forbidden(_) => "E2001",
            AppError::NotFound(_) => "E0003",
            AppError::Conflict(_) => "E0004",
            AppError::Validation(_) => "E0002",
            AppError::InvalidStatus(_) => "E0007",
            AppError::InvalidTransition { .. } => "E0008",
            AppError::Database(_) => "E9002",
            AppError::Internal(_) => "E9001",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            // Authentication (401)
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized: Missing Identity".to_string(),
            ),

            // Authorization (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, format!("Forbidden: {}", msg)),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("{} not found", msg)),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, format!("{} already exists", msg)),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Unknown status value (400)
            AppError::InvalidStatus(s) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown order status: {}", s),
            ),

            // Transition not allowed by the state machine (422)
            AppError::InvalidTransition { from, to } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Cannot transition order from {} to {}", from, to),
            ),

            // Database errors (500) - details stay in the log
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }

            // Internal errors (500) - details stay in the log
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(resource) => AppError::NotFound(resource),
            RepoError::Duplicate(resource) => AppError::Conflict(resource),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
