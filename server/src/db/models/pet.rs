//! Pet Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pet listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub price: f64,
    pub deposit: Option<f64>,
    /// 挂牌状态，自由文本 (available / reserved / sold)
    pub status: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub health_status: Option<String>,
    pub merchant_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetCreate {
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub deposit: Option<f64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub health_status: Option<String>,
    pub merchant_id: Option<i64>,
}

/// Full-replace update payload (the client sends the whole entity back)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub deposit: Option<f64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub health_status: Option<String>,
    pub merchant_id: Option<i64>,
}
