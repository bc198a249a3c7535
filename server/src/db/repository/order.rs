//! Order Repository
//!
//! 订单表数据访问。状态写入使用条件更新（`WHERE status = 期望值`），
//! 配合生命周期引擎实现每单串行的读-校验-写。

use chrono::Utc;
use sqlx::SqlitePool;

use super::RepoResult;
use crate::db::models::Order;
use crate::orders::{NewOrder, OrderStatus};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find order by internal id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    /// Find order by external order number
    pub async fn find_by_order_no(&self, order_no: &str) -> RepoResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_no = ?")
            .bind(order_no)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    /// List orders belonging to a user, newest first
    pub async fn list_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// List a user's orders filtered by status, newest first
    pub async fn list_by_user_and_status(
        &self,
        user_id: &str,
        status: OrderStatus,
    ) -> RepoResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = ? AND status = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// List all orders (merchant/admin view), newest first
    pub async fn list_all(&self) -> RepoResult<Vec<Order>> {
        let orders =
            sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(orders)
    }

    /// Insert a new pending order
    ///
    /// The UNIQUE constraint on `order_no` surfaces as
    /// [`RepoError::Duplicate`](super::RepoError::Duplicate); the caller
    /// regenerates the number and retries.
    pub async fn insert(&self, order_no: &str, data: &NewOrder) -> RepoResult<Order> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO orders \
             (order_no, user_id, total_amount, status, items_json, address_snapshot, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order_no)
        .bind(&data.user_id)
        .bind(data.total_amount)
        .bind(OrderStatus::Pending)
        .bind(&data.items_json)
        .bind(&data.address_snapshot)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or_else(|| {
            super::RepoError::Database(format!("inserted order {} not readable", order_no))
        })
    }

    /// Conditionally move an order's status
    ///
    /// The write only lands when the persisted status still equals
    /// `expected`; returns `false` when a concurrent transition won the
    /// race (caller re-reads and re-validates).
    pub async fn update_status(
        &self,
        order_no: &str,
        expected: OrderStatus,
        new_status: OrderStatus,
    ) -> RepoResult<bool> {
        let result =
            sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE order_no = ? AND status = ?")
                .bind(new_status)
                .bind(Utc::now())
                .bind(order_no)
                .bind(expected)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Set the tracking number, regardless of status
    pub async fn update_tracking(&self, id: i64, tracking_number: &str) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE orders SET tracking_number = ?, updated_at = ? WHERE id = ?")
            .bind(tracking_number)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Hard delete (administrative use; bypasses the state machine)
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
