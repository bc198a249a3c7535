//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录接口
//! - [`orders`] - 订单接口（创建 / 状态流转 / 运单号 / 查询）
//! - [`pets`] - 宠物接口
//! - [`products`] - 商品接口
//! - [`services`] - 服务项目接口
//! - [`merchants`] - 商家接口（受授权门控保护）
//! - [`upload`] - 文件上传接口

pub mod auth;
pub mod health;
pub mod merchants;
pub mod orders;
pub mod pets;
pub mod products;
pub mod services;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
