// models/src/medical/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The role a user is created with. Each role has an extension table
/// (Patients, Doctors, LabStaff, Admin) keyed by `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    LabStaff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::LabStaff => "labstaff",
            Role::Admin => "admin",
        }
    }
}

/// A row of the Users table.
///
/// Passwords are compared as stored; they are never written back out in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
    pub role: Role,
}

/// A user account about to be registered. Always created with the `patient` role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub contact_number: String,
    pub password: String,
}

/// The admin listing projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
}

/// Self-service profile change: name, email and password at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Admin profile: the Admin extension row joined with its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AdminProfile {
    pub admin_id: String,
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
    pub role: Role,
}

/// Lab staff profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LabStaffProfile {
    pub date_of_birth: Option<String>,
    pub full_name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub hire_date: Option<String>,
}
