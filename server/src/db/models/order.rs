//! Order Model
//!
//! 订单实体：内部数字主键 + 对外唯一订单号，状态由
//! [`OrderStatus`](crate::orders::OrderStatus) 状态机约束。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::orders::OrderStatus;

/// Order entity
///
/// `order_no` is generated once at creation and never changes; `status`
/// only moves through the lifecycle engine's transition table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_no: String,
    pub user_id: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub items_json: String,
    pub address_snapshot: String,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
