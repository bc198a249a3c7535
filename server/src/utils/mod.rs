//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`AppResponse`] - API 响应结构
//! - [`AppResult`] - 应用级 Result 别名
//! - 日志等工具

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use logger::{init_logger, init_logger_with_file};
pub use result::AppResult;
