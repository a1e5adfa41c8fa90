// rest_api/src/routes/doctor.rs

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use models::medical::{Appointment, Diagnosis, DoctorAccount, DoctorPatient, DoctorProfile, PrescriptionHistoryEntry};

use crate::errors::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::payloads::{PrescriptionRequest, ProfileUpdateRequest, ScheduleRequest, StatusUpdateRequest};
use crate::routes::{affected, doctor_appointments, doctor_login, found, success};
use crate::state::AppState;

/// Doctor routes, including the login and appointment book shared with the admin service.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctor/login", post(doctor_login))
        .route("/doctor/appointments/:id", get(doctor_appointments).put(update_appointment_status))
        .route("/doctor/profile/:id", get(doctor_profile))
        .route("/api/doctor-profile/:id", get(doctor_account))
        .route("/api/patients/:id", get(doctor_patients))
        .route("/api/appointments/:id", get(appointment_rows))
        .route("/api/appointments/:id/cancel", put(cancel_appointment))
        .route("/api/diagnosis/:id", get(diagnoses))
        .route("/api/reshedule/:id", put(move_appointment))
        .route("/api/prescriptions", post(add_prescription))
        .route("/api/prescriptions/:id", get(prescription_history))
        .route("/api/update-profile", post(update_profile))
}

async fn update_appointment_status(
    State(state): State<AppState>,
    ApiPath(appointment_id): ApiPath<String>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> ApiResult<Json<Value>> {
    let status = payload.validate()?;
    affected(state.db.set_appointment_status(&appointment_id, status).await?, "Appointment not found")?;
    info!("Appointment {} is now {}", appointment_id, status);
    Ok(success("Appointment status updated successfully"))
}

async fn doctor_profile(State(state): State<AppState>, ApiPath(doctor_id): ApiPath<String>) -> ApiResult<Json<DoctorProfile>> {
    let profile = state.db.doctor_profile(&doctor_id).await?;
    Ok(Json(found(profile, "Doctor not found")?))
}

async fn doctor_account(State(state): State<AppState>, ApiPath(user_id): ApiPath<i64>) -> ApiResult<Json<DoctorAccount>> {
    let account = state.db.doctor_account(user_id).await?;
    Ok(Json(found(account, "User not found")?))
}

async fn doctor_patients(
    State(state): State<AppState>,
    ApiPath(doctor_id): ApiPath<String>,
) -> ApiResult<Json<Vec<DoctorPatient>>> {
    Ok(Json(state.db.doctor_patients(&doctor_id).await?))
}

async fn appointment_rows(
    State(state): State<AppState>,
    ApiPath(doctor_id): ApiPath<String>,
) -> ApiResult<Json<Vec<Appointment>>> {
    Ok(Json(state.db.list_doctor_appointment_rows(&doctor_id).await?))
}

async fn diagnoses(State(state): State<AppState>, ApiPath(patient_id): ApiPath<String>) -> ApiResult<Json<Vec<Diagnosis>>> {
    Ok(Json(state.db.list_diagnoses(&patient_id).await?))
}

// A repeated cancel still matches the row, so it answers 200 again.
async fn cancel_appointment(State(state): State<AppState>, ApiPath(appointment_id): ApiPath<String>) -> ApiResult<Json<Value>> {
    affected(state.db.cancel_appointment(&appointment_id).await?, "Appointment not found")?;
    Ok(success("Appointment status updated to Cancelled successfully"))
}

async fn move_appointment(
    State(state): State<AppState>,
    ApiPath(appointment_id): ApiPath<String>,
    ApiJson(payload): ApiJson<ScheduleRequest>,
) -> ApiResult<Json<Value>> {
    let schedule = payload.validate()?;
    affected(state.db.move_appointment(&appointment_id, &schedule).await?, "Appointment not found")?;
    Ok(success("Appointment rescheduled successfully"))
}

async fn add_prescription(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PrescriptionRequest>,
) -> ApiResult<Json<Value>> {
    let prescription = payload.validate()?;
    let prescription_id = state.db.add_prescription(&prescription).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Prescription saved successfully",
        "prescription_id": prescription_id,
    })))
}

async fn prescription_history(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> ApiResult<Json<Vec<PrescriptionHistoryEntry>>> {
    Ok(Json(state.db.prescription_history(&patient_id).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProfileUpdateRequest>,
) -> ApiResult<Json<Value>> {
    let update = payload.validate()?;
    affected(state.db.update_profile(&update).await?, "User not found.")?;
    Ok(success("Profile updated successfully"))
}
