// lib/src/storage_engine/appointments.rs

use models::medical::{
    Appointment, AppointmentStatus, DoctorAppointment, DoctorPatient, NewAppointment, PatientAppointment,
    Schedule,
};
use models::PrefixedId;
use tracing::info;

use crate::database::Database;
use crate::errors::Result;
use crate::storage_engine::sequence::Sequence;

impl Database {
    /// A patient's appointments with the name of the doctor each is booked with.
    pub async fn list_patient_appointments(&self, patient_id: &str) -> Result<Vec<PatientAppointment>> {
        Ok(sqlx::query_as::<_, PatientAppointment>(
            "SELECT a.appointment_id, a.appointment_date, u.full_name, a.appointment_time, a.room_id, a.status \
             FROM appointments a \
             JOIN doctors d ON a.doctor_id = d.doctor_id \
             JOIN users u ON d.user_id = u.user_id \
             WHERE a.patient_id = ?1 \
             ORDER BY a.appointment_date, a.appointment_time",
        )
        .bind(patient_id)
        .fetch_all(self.pool())
        .await?)
    }

    /// A doctor's appointment book, newest date first.
    pub async fn list_doctor_appointments(&self, doctor_id: &str) -> Result<Vec<DoctorAppointment>> {
        Ok(sqlx::query_as::<_, DoctorAppointment>(
            "SELECT a.appointment_id, a.appointment_date, a.appointment_time, u.full_name AS patient_name, \
                    a.room_id, a.status \
             FROM appointments a \
             JOIN patients p ON a.patient_id = p.patient_id \
             JOIN users u ON p.user_id = u.user_id \
             WHERE a.doctor_id = ?1 \
             ORDER BY a.appointment_date DESC, a.appointment_time DESC",
        )
        .bind(doctor_id)
        .fetch_all(self.pool())
        .await?)
    }

    pub async fn list_doctor_appointment_rows(&self, doctor_id: &str) -> Result<Vec<Appointment>> {
        Ok(sqlx::query_as::<_, Appointment>(
            "SELECT appointment_id, patient_id, doctor_id, appointment_date, appointment_time, room_id, status \
             FROM appointments WHERE doctor_id = ?1 ORDER BY appointment_date, appointment_time",
        )
        .bind(doctor_id)
        .fetch_all(self.pool())
        .await?)
    }

    /// Books a `pending` appointment under the next `A<n>` identifier.
    pub async fn book_appointment(&self, booking: &NewAppointment) -> Result<PrefixedId> {
        let mut tx = self.pool().begin().await?;
        let appointment_id = Sequence::APPOINTMENTS.next_id(&mut *tx).await?;
        sqlx::query(
            "INSERT INTO appointments (appointment_id, patient_id, doctor_id, appointment_date, appointment_time, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(appointment_id.to_string())
        .bind(&booking.patient_id)
        .bind(&booking.doctor_id)
        .bind(&booking.date)
        .bind(&booking.time)
        .bind(AppointmentStatus::Pending)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!("Booked appointment {} for patient {} with doctor {}", appointment_id, booking.patient_id, booking.doctor_id);
        Ok(appointment_id)
    }

    /// Patient-side reschedule; the appointment goes back to `pending`.
    pub async fn reschedule_appointment(&self, appointment_id: &str, schedule: &Schedule) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE appointments SET appointment_date = ?1, appointment_time = ?2, status = ?3 \
             WHERE appointment_id = ?4",
        )
        .bind(&schedule.date)
        .bind(&schedule.time)
        .bind(AppointmentStatus::Pending)
        .bind(appointment_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }

    /// Doctor-side reschedule; the status is left as it is.
    pub async fn move_appointment(&self, appointment_id: &str, schedule: &Schedule) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE appointments SET appointment_date = ?1, appointment_time = ?2 WHERE appointment_id = ?3",
        )
        .bind(&schedule.date)
        .bind(&schedule.time)
        .bind(appointment_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of appointments matched. SQLite counts a row whose
    /// status already had the new value, so repeating a change still reports 1.
    pub async fn set_appointment_status(&self, appointment_id: &str, status: AppointmentStatus) -> Result<u64> {
        let result = sqlx::query("UPDATE appointments SET status = ?1 WHERE appointment_id = ?2")
            .bind(status)
            .bind(appointment_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn cancel_appointment(&self, appointment_id: &str) -> Result<u64> {
        self.set_appointment_status(appointment_id, AppointmentStatus::Cancelled).await
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = ?1")
            .bind(appointment_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Patients with an appointment booked with the doctor, one row per appointment.
    pub async fn doctor_patients(&self, doctor_id: &str) -> Result<Vec<DoctorPatient>> {
        Ok(sqlx::query_as::<_, DoctorPatient>(
            "SELECT u.full_name, u.date_of_birth, u.contact_number, a.status, a.appointment_time, \
                    p.patient_id, a.appointment_id \
             FROM users u \
             JOIN patients p ON u.user_id = p.user_id \
             JOIN appointments a ON p.patient_id = a.patient_id \
             WHERE a.doctor_id = ?1 \
             ORDER BY a.appointment_date, a.appointment_time",
        )
        .bind(doctor_id)
        .fetch_all(self.pool())
        .await?)
    }
}
