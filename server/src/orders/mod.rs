//! 订单生命周期模块
//!
//! - [`OrderStatus`] - 封闭状态枚举与流转表
//! - [`OrderLifecycle`] - 创建 / 流转 / 运单号 / 删除 / 查询
//! - [`OrderError`] - 类型化业务错误
//! - [`TransitionOutcome`] - 区分真实流转与幂等空操作

pub mod error;
pub mod lifecycle;
pub mod status;

pub use error::OrderError;
pub use lifecycle::{NewOrder, OrderLifecycle, TransitionOutcome};
pub use status::OrderStatus;
