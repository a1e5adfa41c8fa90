// models/src/medical/patient.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PatientProfile {
    pub date_of_birth: Option<String>,
    pub full_name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub status: Option<String>,
}

/// A patient as seen from a doctor's appointment book: one row per appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorPatient {
    pub full_name: String,
    pub date_of_birth: Option<String>,
    pub contact_number: Option<String>,
    pub status: String,
    pub appointment_time: String,
    pub patient_id: String,
    pub appointment_id: String,
}

/// Free-text diagnosis record, read-only from the doctor service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Diagnosis {
    pub diagnosis_id: i64,
    pub patient_id: String,
    pub diagnosis: String,
    pub notes: Option<String>,
    pub date: Option<String>,
}
