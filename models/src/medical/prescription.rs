// models/src/medical/prescription.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrescription {
    pub patient_id: String,
    pub medicine: String,
    pub dosage: String,
    pub duration: String,
    pub diagnosis: String,
}

/// One line of a patient's prescription history; `prescription` reads
/// `"<medicine> - <dosage> - <duration>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PrescriptionHistoryEntry {
    pub date: String,
    pub diagnosis: String,
    pub prescription: String,
}
