//! Product Repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Product, ProductCreate, ProductUpdate};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Paginated listing, newest first
    pub async fn list(&self, page: i64, size: i64) -> RepoResult<Vec<Product>> {
        let offset = (page.max(1) - 1) * size;
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO products \
             (name, category, price, original_price, stock, sales, rating, image, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.price)
        .bind(data.original_price)
        .bind(data.stock)
        .bind(data.sales)
        .bind(data.rating)
        .bind(&data.image)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database(format!("inserted product {} not readable", id)))
    }

    /// Full replace by id
    pub async fn update(&self, data: ProductUpdate) -> RepoResult<Product> {
        let result = sqlx::query(
            "UPDATE products SET \
             name = ?, category = ?, price = ?, original_price = ?, stock = ?, sales = ?, \
             rating = ?, image = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.price)
        .bind(data.original_price)
        .bind(data.stock)
        .bind(data.sales)
        .bind(data.rating)
        .bind(&data.image)
        .bind(Utc::now())
        .bind(data.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Product {}", data.id)));
        }
        self.find_by_id(data.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {}", data.id)))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
