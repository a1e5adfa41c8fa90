// models/src/medical/medication.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A Medicines row. Stock is set directly by admins; orders do not touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Medicine {
    pub medicine_id: i64,
    pub name: String,
    pub stock: i64,
    pub expiry_date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub stock: i64,
    pub price: f64,
    pub expiry_date: Option<String>,
}

/// A medicine order. Only the total is recorded, never the line items.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub patient_id: String,
    pub order_date: String,
    pub cost: f64,
}
