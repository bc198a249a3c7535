//! Merchant Repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Merchant, MerchantCreate, MerchantUpdate};

#[derive(Clone)]
pub struct MerchantRepository {
    pool: SqlitePool,
}

impl MerchantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Paginated listing with optional name keyword filter
    pub async fn list(&self, page: i64, size: i64, keyword: Option<&str>) -> RepoResult<Vec<Merchant>> {
        let offset = (page.max(1) - 1) * size;
        let merchants = match keyword {
            Some(kw) if !kw.is_empty() => {
                sqlx::query_as::<_, Merchant>(
                    "SELECT * FROM merchants WHERE name LIKE ? ORDER BY id LIMIT ? OFFSET ?",
                )
                .bind(format!("%{}%", kw))
                .bind(size)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Merchant>(
                    "SELECT * FROM merchants ORDER BY id LIMIT ? OFFSET ?",
                )
                .bind(size)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(merchants)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Merchant>> {
        let merchant = sqlx::query_as::<_, Merchant>("SELECT * FROM merchants WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(merchant)
    }

    pub async fn create(&self, data: MerchantCreate) -> RepoResult<Merchant> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO merchants (name, phone, address, logo, rating, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.logo)
        .bind(data.rating)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database(format!("inserted merchant {} not readable", id)))
    }

    /// Full replace by id
    pub async fn update(&self, data: MerchantUpdate) -> RepoResult<Merchant> {
        let result = sqlx::query(
            "UPDATE merchants SET name = ?, phone = ?, address = ?, logo = ?, rating = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.logo)
        .bind(data.rating)
        .bind(Utc::now())
        .bind(data.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Merchant {}", data.id)));
        }
        self.find_by_id(data.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Merchant {}", data.id)))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM merchants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
