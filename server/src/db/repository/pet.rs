//! Pet Repository

use chrono::Utc;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Pet, PetCreate, PetUpdate};

#[derive(Clone)]
pub struct PetRepository {
    pool: SqlitePool,
}

impl PetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Paginated listing, newest first
    pub async fn list(&self, page: i64, size: i64) -> RepoResult<Vec<Pet>> {
        let offset = (page.max(1) - 1) * size;
        let pets = sqlx::query_as::<_, Pet>(
            "SELECT * FROM pets ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(pets)
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Pet>> {
        let pet = sqlx::query_as::<_, Pet>("SELECT * FROM pets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(pet)
    }

    pub async fn create(&self, data: PetCreate) -> RepoResult<Pet> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO pets \
             (name, breed, age, gender, price, deposit, status, description, avatar, health_status, merchant_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.breed)
        .bind(&data.age)
        .bind(&data.gender)
        .bind(data.price)
        .bind(data.deposit)
        .bind(data.status.as_deref().unwrap_or("available"))
        .bind(&data.description)
        .bind(&data.avatar)
        .bind(&data.health_status)
        .bind(data.merchant_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database(format!("inserted pet {} not readable", id)))
    }

    /// Full replace by id
    pub async fn update(&self, data: PetUpdate) -> RepoResult<Pet> {
        let result = sqlx::query(
            "UPDATE pets SET \
             name = ?, breed = ?, age = ?, gender = ?, price = ?, deposit = ?, status = ?, \
             description = ?, avatar = ?, health_status = ?, merchant_id = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&data.name)
        .bind(&data.breed)
        .bind(&data.age)
        .bind(&data.gender)
        .bind(data.price)
        .bind(data.deposit)
        .bind(data.status.as_deref().unwrap_or("available"))
        .bind(&data.description)
        .bind(&data.avatar)
        .bind(&data.health_status)
        .bind(data.merchant_id)
        .bind(Utc::now())
        .bind(data.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Pet {}", data.id)));
        }
        self.find_by_id(data.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Pet {}", data.id)))
    }

    /// Status-only update (listing state, not the order state machine)
    pub async fn update_status(&self, id: i64, status: &str) -> RepoResult<Pet> {
        let result = sqlx::query("UPDATE pets SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Pet {}", id)));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Pet {}", id)))
    }

    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
