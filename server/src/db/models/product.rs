//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shop product
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub original_price: Option<f64>,
    pub stock: i64,
    pub sales: i64,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub original_price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub sales: i64,
    pub rating: Option<f64>,
    pub image: Option<String>,
}

/// Full-replace update payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    pub original_price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub sales: i64,
    pub rating: Option<f64>,
    pub image: Option<String>,
}
