// rest_api/src/routes/mod.rs

//! Route groups of the three services. Handlers used by more than one service
//! live here so each rule has a single implementation.

pub mod admin;
pub mod doctor;
pub mod patient;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use models::medical::DoctorAppointment;
use security::doctor_login as authenticate_doctor;

use crate::errors::{ApiResult, RestApiError};
use crate::extract::{ApiJson, ApiPath};
use crate::payloads::DoctorLoginRequest;
use crate::state::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "service": state.service.name() }))
}

/// `POST /doctor/login`, mounted by the doctor and admin services.
pub async fn doctor_login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DoctorLoginRequest>,
) -> ApiResult<Json<Value>> {
    let doctor = authenticate_doctor(&state.db, payload.email, payload.password).await?;
    info!("Doctor {} logged in through the {} service", doctor.doctor_id, state.service);
    Ok(Json(json!({ "doctor": doctor })))
}

/// `GET /doctor/appointments/:id`, newest first, mounted by the doctor and admin services.
pub async fn doctor_appointments(
    State(state): State<AppState>,
    ApiPath(doctor_id): ApiPath<String>,
) -> ApiResult<Json<Vec<DoctorAppointment>>> {
    Ok(Json(state.db.list_doctor_appointments(&doctor_id).await?))
}

/// Maps an absent row to a 404 carrying `message`.
pub(crate) fn found<T>(row: Option<T>, message: &str) -> ApiResult<T> {
    row.ok_or_else(|| RestApiError::not_found(message))
}

/// Maps zero affected rows to a 404 carrying `message`.
pub(crate) fn affected(rows: u64, message: &str) -> ApiResult<()> {
    if rows == 0 {
        return Err(RestApiError::not_found(message));
    }
    Ok(())
}

pub(crate) fn success(message: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": message }))
}
