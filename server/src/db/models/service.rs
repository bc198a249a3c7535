//! Service Model
//!
//! 宠物服务项目 (洗护、寄养、医疗等)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_id: Option<i64>,
    pub image: Option<String>,
    pub sales: i64,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreate {
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_id: Option<i64>,
    pub image: Option<String>,
    #[serde(default)]
    pub sales: i64,
    pub rating: Option<f64>,
}

/// Full-replace update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_id: Option<i64>,
    pub image: Option<String>,
    #[serde(default)]
    pub sales: i64,
    pub rating: Option<f64>,
}
