// models/src/medical/doctor.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user::Role;

/// Public doctor listing used when booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorSummary {
    pub full_name: String,
    pub specialization: Option<String>,
    pub doctor_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WorkingHours {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// What a doctor gets back from a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorIdentity {
    pub doctor_id: String,
    pub full_name: String,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorProfile {
    pub doctor_id: String,
    pub full_name: String,
    pub specialization: Option<String>,
    pub phone_number: Option<String>,
}

/// The Doctors extension row joined with its user, looked up by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorAccount {
    pub doctor_id: String,
    pub user_id: i64,
    pub specialization: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub phone_number: Option<String>,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
    pub role: Role,
}
