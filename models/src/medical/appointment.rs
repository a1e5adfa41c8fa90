// models/src/medical/appointment.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::ValidationError;

/// Appointment lifecycle. Bookings start `pending`; the stored spellings
/// are mixed-case and are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum AppointmentStatus {
    #[serde(rename = "pending")]
    #[sqlx(rename = "pending")]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(AppointmentStatus::Pending),
            "Confirmed" => Ok(AppointmentStatus::Confirmed),
            "Completed" => Ok(AppointmentStatus::Completed),
            "Cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// A raw Appointments row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub room_id: Option<String>,
    pub status: AppointmentStatus,
}

/// A patient's view of an appointment, carrying the doctor's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PatientAppointment {
    pub appointment_id: String,
    pub appointment_date: String,
    pub full_name: String,
    pub appointment_time: String,
    pub room_id: Option<String>,
    pub status: AppointmentStatus,
}

/// A doctor's view of an appointment, carrying the patient's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorAppointment {
    pub appointment_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub patient_name: String,
    pub room_id: Option<String>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
}

/// A validated date/time pair used by every reschedule operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub date: String,
    pub time: String,
}
