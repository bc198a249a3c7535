//! Order Lifecycle Engine
//!
//! 订单状态字段的唯一所有者：创建、状态流转、运单号、删除与查询都
//! 经由这里。状态流转的读-校验-写通过条件更新串行化（见
//! [`OrderRepository::update_status`]），两个并发请求最多一个生效。

use rand::Rng;
use sqlx::SqlitePool;

use super::error::OrderError;
use super::status::OrderStatus;
use crate::db::models::Order;
use crate::db::repository::OrderRepository;

/// Bounded retries for the order-number generator; the UNIQUE constraint
/// is the actual uniqueness guarantee.
const ORDER_NO_MAX_ATTEMPTS: u32 = 5;

/// Bounded re-reads when a conditional status write loses its race.
const TRANSITION_MAX_ATTEMPTS: u32 = 3;

/// Create-order input, validated before anything is persisted
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub total_amount: f64,
    pub items_json: String,
    pub address_snapshot: String,
}

/// Transition result: a real state change, or an idempotent no-op
#[derive(Debug)]
pub enum TransitionOutcome {
    Applied(Order),
    NoOp(Order),
}

impl TransitionOutcome {
    pub fn order(&self) -> &Order {
        match self {
            TransitionOutcome::Applied(order) | TransitionOutcome::NoOp(order) => order,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, TransitionOutcome::NoOp(_))
    }
}

/// Lifecycle engine over the order repository
#[derive(Clone)]
pub struct OrderLifecycle {
    repo: OrderRepository,
}

impl OrderLifecycle {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: OrderRepository::new(pool),
        }
    }

    /// Create a new order in `pending` status
    ///
    /// The order number format follows the storefront convention
    /// (`ORD` + millis + random suffix); collisions are caught by the
    /// database constraint and answered with a fresh number.
    pub async fn create_order(&self, data: NewOrder) -> Result<Order, OrderError> {
        if data.user_id.trim().is_empty() {
            return Err(OrderError::Validation("userId is required".to_string()));
        }
        if data.total_amount <= 0.0 {
            return Err(OrderError::Validation(
                "totalAmount must be greater than 0".to_string(),
            ));
        }

        for _ in 0..ORDER_NO_MAX_ATTEMPTS {
            let order_no = generate_order_no();
            match self.repo.insert(&order_no, &data).await {
                Ok(order) => return Ok(order),
                Err(e) if e.is_duplicate() => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(OrderError::Database(
            "order number generation exhausted retries".to_string(),
        ))
    }

    /// Request a status transition
    ///
    /// 1. load → `NotFound`;
    /// 2. parse → `InvalidStatus`;
    /// 3. requested == current → no-op success（幂等重试）;
    /// 4. transition table → `InvalidTransition`, naming both statuses;
    /// 5. conditional write; a lost race re-reads the now-current status
    ///    and re-validates.
    pub async fn request_transition(
        &self,
        id: i64,
        requested: &str,
    ) -> Result<TransitionOutcome, OrderError> {
        for _ in 0..TRANSITION_MAX_ATTEMPTS {
            let order = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| OrderError::NotFound(format!("Order {}", id)))?;

            // 缺失订单先于非法状态串报告
            let target: OrderStatus = requested
                .parse()
                .map_err(|_| OrderError::InvalidStatus(requested.to_string()))?;

            if order.status == target {
                return Ok(TransitionOutcome::NoOp(order));
            }
            if !order.status.can_transition_to(target) {
                return Err(OrderError::InvalidTransition {
                    from: order.status,
                    to: target,
                });
            }

            if self.repo.update_status(&order.order_no, order.status, target).await? {
                let updated = self
                    .repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| OrderError::NotFound(format!("Order {}", id)))?;
                return Ok(TransitionOutcome::Applied(updated));
            }
            // Lost the race: a concurrent transition landed between the
            // read and the write. Loop re-reads the fresh status.
        }

        Err(OrderError::Database(format!(
            "order {} transition kept losing the race",
            id
        )))
    }

    /// Set the tracking number; independent of the state machine
    pub async fn update_tracking(&self, id: i64, tracking_number: &str) -> Result<Order, OrderError> {
        if !self.repo.update_tracking(id, tracking_number).await? {
            return Err(OrderError::NotFound(format!("Order {}", id)));
        }
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("Order {}", id)))
    }

    /// Hard delete, bypassing the state machine (administrative use;
    /// user-facing flows should cancel instead)
    pub async fn delete_order(&self, id: i64) -> Result<(), OrderError> {
        if !self.repo.delete(id).await? {
            return Err(OrderError::NotFound(format!("Order {}", id)));
        }
        Ok(())
    }

    // ========== Queries (no side effects) ==========

    pub async fn get(&self, id: i64) -> Result<Option<Order>, OrderError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn get_by_order_no(&self, order_no: &str) -> Result<Option<Order>, OrderError> {
        Ok(self.repo.find_by_order_no(order_no).await?)
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo.list_by_user(user_id).await?)
    }

    pub async fn list_by_user_and_status(
        &self,
        user_id: &str,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo.list_by_user_and_status(user_id, status).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.repo.list_all().await?)
    }
}

/// `ORD{timestamp_millis}{3-digit random}`
fn generate_order_no() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("ORD{}{:03}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_no_has_expected_shape() {
        let no = generate_order_no();
        assert!(no.starts_with("ORD"));
        // 13 位毫秒时间戳 + 3 位随机后缀
        assert_eq!(no.len(), "ORD".len() + 13 + 3);
        assert!(no["ORD".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
