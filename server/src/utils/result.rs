//! 应用级 Result 别名

use crate::AppError;

/// Result alias used by HTTP handlers and the service layer
pub type AppResult<T> = Result<T, AppError>;
