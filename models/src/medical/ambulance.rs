// models/src/medical/ambulance.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dispatched ambulance call, stamped with the local date and time it was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Call {
    pub call_id: String,
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCall {
    pub patient_id: String,
    pub address: String,
}
