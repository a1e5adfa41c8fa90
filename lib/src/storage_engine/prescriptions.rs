// lib/src/storage_engine/prescriptions.rs

use chrono::Local;
use models::medical::{Diagnosis, NewPrescription, PrescriptionHistoryEntry};
use tracing::info;

use crate::database::Database;
use crate::errors::Result;

impl Database {
    /// Saves a prescription stamped with the current local time. Returns its id.
    pub async fn add_prescription(&self, prescription: &NewPrescription) -> Result<i64> {
        let stamped = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let prescription_id: i64 = sqlx::query_scalar(
            "INSERT INTO prescriptions (patient_id, medicine, dosage, duration, diagnosis, date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING prescription_id",
        )
        .bind(&prescription.patient_id)
        .bind(&prescription.medicine)
        .bind(&prescription.dosage)
        .bind(&prescription.duration)
        .bind(&prescription.diagnosis)
        .bind(&stamped)
        .fetch_one(self.pool())
        .await?;
        info!("Saved prescription {} for patient {}", prescription_id, prescription.patient_id);
        Ok(prescription_id)
    }

    pub async fn prescription_history(&self, patient_id: &str) -> Result<Vec<PrescriptionHistoryEntry>> {
        Ok(sqlx::query_as::<_, PrescriptionHistoryEntry>(
            "SELECT SUBSTR(date, 1, 10) AS date, diagnosis, \
                    medicine || ' - ' || dosage || ' - ' || duration AS prescription \
             FROM prescriptions WHERE patient_id = ?1 ORDER BY date, prescription_id",
        )
        .bind(patient_id)
        .fetch_all(self.pool())
        .await?)
    }

    pub async fn list_diagnoses(&self, patient_id: &str) -> Result<Vec<Diagnosis>> {
        Ok(sqlx::query_as::<_, Diagnosis>(
            "SELECT diagnosis_id, patient_id, diagnosis, notes, date FROM diagnosis \
             WHERE patient_id = ?1 ORDER BY diagnosis_id",
        )
        .bind(patient_id)
        .fetch_all(self.pool())
        .await?)
    }
}
