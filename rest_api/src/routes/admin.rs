// rest_api/src/routes/admin.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use models::medical::{AdminProfile, Medicine, UserSummary};

use crate::errors::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::payloads::{NewMedicineRequest, StockUpdateRequest, UserUpdateRequest};
use crate::routes::{affected, doctor_appointments, doctor_login, found, success};
use crate::state::AppState;

/// Admin routes: user management and medicine inventory, plus the shared doctor routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctor/login", post(doctor_login))
        .route("/doctor/appointments/:id", get(doctor_appointments))
        .route("/api/users", get(list_users))
        .route("/api/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/api/medicines", get(list_medicines))
        .route("/api/medicinesadd", post(add_medicine))
        .route("/api/medicines/:id/stock", put(update_stock))
        .route("/api/medicines/:id", delete(delete_medicine))
        .route("/api/admin-profile/:id", get(admin_profile))
}

async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(state.db.list_users().await?))
}

async fn get_user(State(state): State<AppState>, ApiPath(user_id): ApiPath<i64>) -> ApiResult<Json<UserSummary>> {
    let user = state.db.get_user(user_id).await?;
    Ok(Json(found(user, "User not found")?))
}

async fn update_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UserUpdateRequest>,
) -> ApiResult<Json<Value>> {
    let (full_name, email) = payload.validate()?;
    affected(state.db.update_user(user_id, &full_name, &email).await?, "User not found")?;
    Ok(success("User updated successfully"))
}

async fn delete_user(State(state): State<AppState>, ApiPath(user_id): ApiPath<i64>) -> ApiResult<Json<Value>> {
    affected(state.db.delete_user(user_id).await?, "User not found")?;
    warn!("Deleted user {}", user_id);
    Ok(success("User deleted successfully"))
}

async fn list_medicines(State(state): State<AppState>) -> ApiResult<Json<Vec<Medicine>>> {
    Ok(Json(state.db.list_medicines().await?))
}

async fn add_medicine(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewMedicineRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let medicine = payload.validate()?;
    let medicine_id = state.db.add_medicine(&medicine).await?;
    info!("Added medicine {} ({})", medicine_id, medicine.name);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Medicine added successfully", "medicine_id": medicine_id })),
    ))
}

async fn update_stock(
    State(state): State<AppState>,
    ApiPath(medicine_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<StockUpdateRequest>,
) -> ApiResult<Json<Value>> {
    let stock = payload.validate()?;
    affected(state.db.update_medicine_stock(medicine_id, stock).await?, "Medicine not found")?;
    Ok(success("Stock updated successfully"))
}

async fn delete_medicine(State(state): State<AppState>, ApiPath(medicine_id): ApiPath<i64>) -> ApiResult<Json<Value>> {
    affected(state.db.delete_medicine(medicine_id).await?, "Medicine not found")?;
    Ok(success("Medicine deleted successfully"))
}

async fn admin_profile(State(state): State<AppState>, ApiPath(user_id): ApiPath<i64>) -> ApiResult<Json<AdminProfile>> {
    let profile = state.db.admin_profile(user_id).await?;
    Ok(Json(found(profile, "User not found")?))
}
