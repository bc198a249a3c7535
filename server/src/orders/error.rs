//! Lifecycle engine errors
//!
//! 业务规则违反以类型化结果返回，不在引擎内打日志或格式化响应。

use thiserror::Error;

use super::status::OrderStatus;
use crate::AppError;
use crate::db::repository::RepoError;

/// Engine errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Requested status string is outside the closed enum
    #[error("Unknown order status: {0}")]
    InvalidStatus(String),

    /// Recognized status, but unreachable from the current one
    #[error("Cannot transition order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepoError> for OrderError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(resource) => OrderError::NotFound(resource),
            // A duplicate surviving the engine's retry loop is a system fault
            RepoError::Duplicate(msg) => OrderError::Database(msg),
            RepoError::Database(msg) => OrderError::Database(msg),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(resource) => AppError::NotFound(resource),
            OrderError::InvalidStatus(s) => AppError::InvalidStatus(s),
            OrderError::InvalidTransition { from, to } => AppError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::Database(msg) => AppError::Database(msg),
        }
    }
}
