//! Service Repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Service, ServiceCreate, ServiceUpdate};

#[derive(Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Paginated listing, newest first
    pub async fn list(&self, page: i64, size: i64) -> RepoResult<Vec<Service>> {
        let offset = (page.max(1) - 1) * size;
        let services = sqlx::query_as::<_, Service>(
            "SELECT * FROM services ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Service>> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    pub async fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO services \
             (name, category, price, duration, description, merchant_name, merchant_id, image, sales, rating, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.price)
        .bind(&data.duration)
        .bind(&data.description)
        .bind(&data.merchant_name)
        .bind(data.merchant_id)
        .bind(&data.image)
        .bind(data.sales)
        .bind(data.rating)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database(format!("inserted service {} not readable", id)))
    }

    /// Full replace by id
    pub async fn update(&self, data: ServiceUpdate) -> RepoResult<Service> {
        let result = sqlx::query(
            "UPDATE services SET \
             name = ?, category = ?, price = ?, duration = ?, description = ?, merchant_name = ?, \
             merchant_id = ?, image = ?, sales = ?, rating = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.price)
        .bind(&data.duration)
        .bind(&data.description)
        .bind(&data.merchant_name)
        .bind(data.merchant_id)
        .bind(&data.image)
        .bind(data.sales)
        .bind(data.rating)
        .bind(Utc::now())
        .bind(data.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Service {}", data.id)));
        }
        self.find_by_id(data.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {}", data.id)))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
