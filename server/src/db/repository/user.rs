//! User Repository
//!
//! 身份记录访问：openid → 角色。首次登录时创建，角色变更为独立操作。

use chrono::Utc;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::db::models::{Role, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by external identity
    pub async fn find_by_openid(&self, openid: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE openid = ?")
            .bind(openid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Register a new identity with the default `user` role
    pub async fn create(
        &self,
        openid: &str,
        nickname: Option<&str>,
        avatar_url: Option<&str>,
        phone: Option<&str>,
    ) -> RepoResult<User> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO users (openid, nickname, avatar_url, phone, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(openid)
        .bind(nickname)
        .bind(avatar_url)
        .bind(phone)
        .bind(Role::User)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_openid(openid)
            .await?
            .ok_or_else(|| RepoError::Database(format!("inserted user {} not readable", openid)))
    }

    /// Role change (external to the authorization gate)
    pub async fn update_role(&self, openid: &str, role: Role) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE openid = ?")
            .bind(role)
            .bind(Utc::now())
            .bind(openid)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
