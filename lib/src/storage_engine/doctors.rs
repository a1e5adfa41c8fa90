// lib/src/storage_engine/doctors.rs

use models::medical::{DoctorIdentity, DoctorProfile, DoctorSummary, WorkingHours};

use crate::database::Database;
use crate::errors::Result;

impl Database {
    pub async fn list_doctors(&self) -> Result<Vec<DoctorSummary>> {
        Ok(sqlx::query_as::<_, DoctorSummary>(
            "SELECT u.full_name, d.specialization, d.doctor_id \
             FROM users u JOIN doctors d ON d.user_id = u.user_id ORDER BY d.doctor_id",
        )
        .fetch_all(self.pool())
        .await?)
    }

    pub async fn doctor_working_hours(&self, doctor_id: &str) -> Result<Option<WorkingHours>> {
        Ok(sqlx::query_as::<_, WorkingHours>("SELECT start_time, end_time FROM doctors WHERE doctor_id = ?1")
            .bind(doctor_id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Working hours of the doctor an appointment is booked with.
    pub async fn appointment_doctor_hours(&self, appointment_id: &str) -> Result<Option<WorkingHours>> {
        Ok(sqlx::query_as::<_, WorkingHours>(
            "SELECT d.start_time, d.end_time \
             FROM doctors d JOIN appointments a ON d.doctor_id = a.doctor_id WHERE a.appointment_id = ?1",
        )
        .bind(appointment_id)
        .fetch_optional(self.pool())
        .await?)
    }

    /// Doctor whose user matches the email and password exactly.
    pub async fn find_doctor_by_credentials(&self, email: &str, password: &str) -> Result<Option<DoctorIdentity>> {
        Ok(sqlx::query_as::<_, DoctorIdentity>(
            "SELECT d.doctor_id, u.full_name, d.specialization, u.contact_number \
             FROM doctors d JOIN users u ON d.user_id = u.user_id \
             WHERE u.email = ?1 AND u.password = ?2",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(self.pool())
        .await?)
    }

    pub async fn doctor_profile(&self, doctor_id: &str) -> Result<Option<DoctorProfile>> {
        Ok(sqlx::query_as::<_, DoctorProfile>(
            "SELECT d.doctor_id, u.full_name, d.specialization, d.phone_number \
             FROM doctors d JOIN users u ON d.user_id = u.user_id WHERE d.doctor_id = ?1",
        )
        .bind(doctor_id)
        .fetch_optional(self.pool())
        .await?)
    }
}
