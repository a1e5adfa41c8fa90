// rest_api/src/routes/patient.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, info};

use models::medical::{
    DoctorSummary, LabStaffProfile, Medicine, PatientAppointment, PatientProfile, PendingLabTest, StaffPendingReport,
    TestCategory, TestResult, WorkingHours,
};
use security::{login_user, register_user, UserLogin, UserRegistration};

use crate::errors::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::payloads::{
    AmbulanceRequest, BookAppointmentRequest, BookLabTestRequest, LabTestQuery, OrderRequest, RescheduleRequest,
    TestResultRequest,
};
use crate::routes::{affected, found, success};
use crate::state::AppState;

/// Public and patient routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/api/signup", post(signup))
        .route("/appointments/:id", get(patient_appointments).delete(delete_appointment))
        .route("/confirmApp", post(book_appointment))
        .route("/resheduleApp", post(reschedule_appointment))
        .route("/labs/:id", get(pending_lab_tests))
        .route("/confirmtest", post(book_lab_test))
        .route("/reshedulelab", post(reschedule_lab_test))
        .route("/lab/:id", delete(delete_lab_test))
        .route("/labreports/:id", get(lab_reports))
        .route("/labtests/:id", get(lab_test_result))
        .route("/addBloodTest", post(add_blood_test))
        .route("/addDiabeticTest", post(add_diabetic_test))
        .route("/addGeneticTest", post(add_genetic_test))
        .route("/labstaffreports/:id", get(staff_pending_reports))
        .route("/medicines", get(medicines))
        .route("/orders", post(place_order))
        .route("/ambulance", post(dispatch_ambulance))
        .route("/doctors", get(doctors))
        .route("/doctors/:id", get(doctor_hours))
        .route("/doctor/:id", get(appointment_doctor_hours))
        .route("/profiles/:id", get(patient_profile))
        .route("/lprofiles/:id", get(lab_staff_profile))
}

async fn login(State(state): State<AppState>, ApiJson(payload): ApiJson<UserLogin>) -> ApiResult<Json<Value>> {
    let user = login_user(&state.db, payload).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UserRegistration>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let registered = register_user(&state.db, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "user_id": registered.user_id,
            "patient_id": registered.patient_id,
        })),
    ))
}

async fn patient_appointments(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> ApiResult<Json<Vec<PatientAppointment>>> {
    Ok(Json(state.db.list_patient_appointments(&patient_id).await?))
}

async fn book_appointment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookAppointmentRequest>,
) -> ApiResult<Json<Value>> {
    let booking = payload.validate()?;
    let appointment_id = state.db.book_appointment(&booking).await?;
    Ok(Json(json!({ "success": true, "appointment_id": appointment_id.to_string() })))
}

async fn reschedule_appointment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RescheduleRequest>,
) -> ApiResult<Json<Value>> {
    let (appointment_id, schedule) = payload.validate()?;
    let rows = state.db.reschedule_appointment(&appointment_id, &schedule).await?;
    affected(rows, "Appointment not found")?;
    Ok(success("Appointment rescheduled successfully"))
}

async fn delete_appointment(
    State(state): State<AppState>,
    ApiPath(appointment_id): ApiPath<String>,
) -> ApiResult<Json<Value>> {
    affected(state.db.delete_appointment(&appointment_id).await?, "Appointment not found")?;
    Ok(success("Appointment deleted successfully"))
}

async fn pending_lab_tests(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> ApiResult<Json<Vec<PendingLabTest>>> {
    Ok(Json(state.db.pending_lab_tests(&patient_id).await?))
}

async fn book_lab_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<BookLabTestRequest>,
) -> ApiResult<Json<Value>> {
    let test = payload.validate()?;
    let booked = state.db.book_lab_test(&test, &state.lab.default_staff_id).await?;
    Ok(Json(json!({
        "success": true,
        "labtest_id": booked.labtest_id,
        "labreport_id": booked.labreport_id,
    })))
}

async fn reschedule_lab_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RescheduleRequest>,
) -> ApiResult<Json<Value>> {
    let (labtest_id, schedule) = payload.validate()?;
    let rows = state.db.reschedule_lab_test(&labtest_id, &schedule.date, &schedule.time).await?;
    affected(rows, "Lab test not found")?;
    Ok(success("Lab test rescheduled successfully"))
}

async fn delete_lab_test(State(state): State<AppState>, ApiPath(labtest_id): ApiPath<String>) -> ApiResult<Json<Value>> {
    affected(state.db.delete_lab_test(&labtest_id).await?, "Lab test not found")?;
    Ok(success("Lab test deleted successfully"))
}

async fn lab_reports(State(state): State<AppState>, ApiPath(patient_id): ApiPath<String>) -> ApiResult<Json<Value>> {
    let reports = state.db.patient_lab_reports(&patient_id).await?;
    Ok(Json(json!({
        "success": true,
        "readyReports": reports.ready_reports,
        "inProgressReports": reports.in_progress_reports,
    })))
}

async fn lab_test_result(
    State(state): State<AppState>,
    ApiPath(labreport_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<LabTestQuery>,
) -> ApiResult<Json<TestResult>> {
    let category = query.category()?;
    let result = state.db.test_result(&labreport_id, category).await?;
    Ok(Json(found(result, "Result not found")?))
}

async fn submit_result(state: &AppState, payload: TestResultRequest, category: TestCategory) -> ApiResult<Json<Value>> {
    let result = payload.validate(category)?;
    let result_id = state.db.submit_test_result(&result).await?;
    info!("Recorded {} result {} for report {}", category, result_id, result.labreport_id);
    Ok(Json(json!({ "success": true, "message": "Record added!", "resultId": result_id.to_string() })))
}

async fn add_blood_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TestResultRequest>,
) -> ApiResult<Json<Value>> {
    submit_result(&state, payload, TestCategory::Blood).await
}

async fn add_diabetic_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TestResultRequest>,
) -> ApiResult<Json<Value>> {
    submit_result(&state, payload, TestCategory::Diabetic).await
}

async fn add_genetic_test(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TestResultRequest>,
) -> ApiResult<Json<Value>> {
    submit_result(&state, payload, TestCategory::Genetic).await
}

async fn staff_pending_reports(
    State(state): State<AppState>,
    ApiPath(staff_id): ApiPath<String>,
) -> ApiResult<Json<Vec<StaffPendingReport>>> {
    Ok(Json(state.db.staff_pending_reports(&staff_id).await?))
}

async fn medicines(State(state): State<AppState>) -> ApiResult<Json<Vec<Medicine>>> {
    Ok(Json(state.db.list_medicines().await?))
}

async fn place_order(State(state): State<AppState>, ApiJson(payload): ApiJson<OrderRequest>) -> ApiResult<Json<Value>> {
    let order = payload.validate()?;
    let order_id = state.db.place_order(&order).await?;
    debug!("Order {} placed for patient {}", order_id, order.patient_id);
    Ok(success("Order placed successfully"))
}

async fn dispatch_ambulance(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AmbulanceRequest>,
) -> ApiResult<Json<Value>> {
    let call = state.db.dispatch_ambulance(&payload.validate()?).await?;
    Ok(Json(json!({
        "success": true,
        "call_id": call.call_id,
        "date": call.date,
        "time": call.time,
        "address": call.address,
    })))
}

async fn doctors(State(state): State<AppState>) -> ApiResult<Json<Vec<DoctorSummary>>> {
    Ok(Json(state.db.list_doctors().await?))
}

async fn doctor_hours(State(state): State<AppState>, ApiPath(doctor_id): ApiPath<String>) -> ApiResult<Json<WorkingHours>> {
    let hours = state.db.doctor_working_hours(&doctor_id).await?;
    Ok(Json(found(hours, "Doctor not found")?))
}

async fn appointment_doctor_hours(
    State(state): State<AppState>,
    ApiPath(appointment_id): ApiPath<String>,
) -> ApiResult<Json<WorkingHours>> {
    let hours = state.db.appointment_doctor_hours(&appointment_id).await?;
    Ok(Json(found(hours, "Appointment not found")?))
}

async fn patient_profile(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> ApiResult<Json<PatientProfile>> {
    let profile = state.db.patient_profile(&patient_id).await?;
    Ok(Json(found(profile, "Patient not found")?))
}

async fn lab_staff_profile(
    State(state): State<AppState>,
    ApiPath(staff_id): ApiPath<String>,
) -> ApiResult<Json<LabStaffProfile>> {
    let profile = state.db.lab_staff_profile(&staff_id).await?;
    Ok(Json(found(profile, "Lab staff not found")?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use lib::fixtures::{insert_admin, insert_doctor, insert_lab_staff, insert_medicine, insert_patient};

    use crate::config::ServiceKind;
    use crate::test_support::{send, test_app};

    #[tokio::test]
    async fn should_login_every_role_with_its_extension_id() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        insert_doctor(&db, 2, "D1", "Doc", "doc@example.com", "pw").await;
        insert_lab_staff(&db, 3, "L101", "Lab", "lab@example.com", "pw").await;
        insert_admin(&db, 4, "AD1", "Admin", "admin@example.com", "pw").await;

        for (email, key, id) in [
            ("pat@example.com", "patient_id", "P1"),
            ("doc@example.com", "doctor_id", "D1"),
            ("lab@example.com", "lab_staff_id", "L101"),
            ("admin@example.com", "admin_id", "AD1"),
        ] {
            let (status, body) = send(&app, Method::POST, "/login", Some(json!({ "username": email, "password": "pw" }))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], true);
            assert_eq!(body["user"][key], id);
            assert!(body["user"].get("password").is_none());
        }

        let (status, body) =
            send(&app, Method::POST, "/login", Some(json!({ "username": "pat@example.com", "password": "nope" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn should_sign_up_once_per_email() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        let signup = json!({
            "fullName": "Jane Roe", "email": "jane@example.com", "dob": "1990-04-01",
            "contactNumber": "555-0100", "password": "secret"
        });

        let (status, body) = send(&app, Method::POST, "/api/signup", Some(signup.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user_id"], 1);

        let (status, body) = send(&app, Method::POST, "/api/signup", Some(signup)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already exists");
        assert_eq!(db.list_users().await.unwrap().len(), 1);

        let (status, body) = send(&app, Method::POST, "/api/signup", Some(json!({ "email": "x@example.com" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required");
    }

    #[tokio::test]
    async fn should_give_next_signup_the_id_after_current_max_user() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            let signup = json!({
                "fullName": "Jane Roe", "email": email, "dob": "1990-04-01",
                "contactNumber": "555-0100", "password": "secret"
            });
            send(&app, Method::POST, "/api/signup", Some(signup)).await;
        }
        assert_eq!(db.delete_user(3).await.unwrap(), 1);

        let signup = json!({
            "fullName": "Dee", "email": "d@example.com", "dob": "1991-02-03",
            "contactNumber": "555-0104", "password": "secret"
        });
        let (status, body) = send(&app, Method::POST, "/api/signup", Some(signup)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user_id"], 3);
        assert_eq!(body["patient_id"], "P4");

        let (_, body) =
            send(&app, Method::POST, "/login", Some(json!({ "username": "d@example.com", "password": "secret" }))).await;
        assert_eq!(body["user"]["patient_id"], "P4");
    }

    #[tokio::test]
    async fn should_move_report_to_ready_after_result_submission() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/confirmtest",
            Some(json!({ "pid": "P1", "date": "2024-05-01", "time": "08:30", "test": "Blood Test" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["labtest_id"], "L1");
        assert_eq!(body["labreport_id"], "LR1");

        let (_, reports) = send(&app, Method::GET, "/labreports/P1", None).await;
        assert_eq!(reports["readyReports"].as_array().unwrap().len(), 0);
        assert_eq!(reports["inProgressReports"][0]["labreport_id"], "LR1");

        let (_, staff) = send(&app, Method::GET, "/labstaffreports/L101", None).await;
        assert_eq!(staff[0]["patient_id"], "P1");

        let (status, body) = send(
            &app,
            Method::POST,
            "/addBloodTest",
            Some(json!({
                "labReportId": "LR1", "gender": "F", "dob": "1990-04-01", "age": 34,
                "bloodType": "O+", "hemoglobin": 13.5, "plateletsCount": 250000
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Record added!");
        assert_eq!(body["resultId"], "B1");

        let (_, reports) = send(&app, Method::GET, "/labreports/P1", None).await;
        assert_eq!(reports["readyReports"][0]["labreport_id"], "LR1");
        assert_eq!(reports["inProgressReports"].as_array().unwrap().len(), 0);

        let (status, result) = send(&app, Method::GET, "/labtests/LR1?testType=Blood%20Test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["resultId"], "B1");
        assert_eq!(result["bloodType"], "O+");

        let (status, _) = send(&app, Method::GET, "/labtests/LR1?testType=Genetic%20Test", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, body) = send(&app, Method::GET, "/labtests/LR1?testType=X-Ray", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid test type");
    }

    #[tokio::test]
    async fn should_record_genetic_results() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        send(
            &app,
            Method::POST,
            "/confirmtest",
            Some(json!({ "pid": "P1", "date": "2024-05-01", "time": "08:30", "test": "Genetic Test" })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/addGeneticTest",
            Some(json!({
                "labReportId": "LR1", "gender": "M", "dob": "1980-01-01", "age": 44, "bloodType": "A-",
                "gene": "BRCA1", "DNADescription": "c.68_69delAG", "ProteinDescription": "p.Glu23fs"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resultId"], "G1");

        let (_, result) = send(&app, Method::GET, "/labtests/LR1?testType=Genetic%20Test", None).await;
        assert_eq!(result["gene"], "BRCA1");
    }

    #[tokio::test]
    async fn should_reject_results_for_unknown_reports() {
        let (app, _db, _dir) = test_app(ServiceKind::Patient).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/addDiabeticTest",
            Some(json!({
                "labReportId": "LR9", "gender": "F", "dob": "1990-04-01", "age": 34, "bloodType": "O+",
                "HbA1c": 5.6, "estimatedAvgGlucose": 114
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_book_reschedule_and_delete_appointments() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        insert_doctor(&db, 2, "D1", "Dr. Grey", "grey@example.com", "pw").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/confirmApp",
            Some(json!({ "pid": "P1", "did": "D1", "date": "2024-05-01", "time": "10:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointment_id"], "A1");

        let (_, rows) = send(&app, Method::GET, "/appointments/P1", None).await;
        assert_eq!(rows[0]["full_name"], "Dr. Grey");
        assert_eq!(rows[0]["status"], "pending");

        let (_, hours) = send(&app, Method::GET, "/doctor/A1", None).await;
        assert_eq!(hours["start_time"], "09:00:00");

        let reschedule = json!({ "id": "A1", "date": "2024-05-02", "time": "11:00" });
        let (status, _) = send(&app, Method::POST, "/resheduleApp", Some(reschedule)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) =
            send(&app, Method::POST, "/resheduleApp", Some(json!({ "id": "A7", "date": "2024-05-02", "time": "11:00" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Appointment not found");

        let (status, _) = send(&app, Method::DELETE, "/appointments/A1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, "/appointments/A1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_give_concurrent_bookings_distinct_ids() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        insert_doctor(&db, 2, "D1", "Dr. Grey", "grey@example.com", "pw").await;

        let booking = json!({ "pid": "P1", "did": "D1", "date": "2024-05-01", "time": "10:00" });
        let first = send(&app, Method::POST, "/confirmApp", Some(booking.clone()));
        let second = send(&app, Method::POST, "/confirmApp", Some(booking));
        let ((s1, b1), (s2, b2)) = tokio::join!(first, second);

        assert_eq!(s1, StatusCode::OK);
        assert_eq!(s2, StatusCode::OK);
        assert_ne!(b1["appointment_id"], b2["appointment_id"]);
        assert_eq!(db.list_patient_appointments("P1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_answer_malformed_input_with_the_error_envelope() {
        let (app, _db, _dir) = test_app(ServiceKind::Patient).await;
        let (status, body) = send(&app, Method::POST, "/confirmApp", Some(json!({ "pid": "P1" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "did is required");

        let (status, body) = send(
            &app,
            Method::POST,
            "/confirmApp",
            Some(json!({ "pid": "P1", "did": "D1", "date": "01/05/2024", "time": "10:00" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = crate::test_support::send_raw(&app, Method::POST, "/orders", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_serve_catalogue_orders_and_ambulance_calls() {
        let (app, db, _dir) = test_app(ServiceKind::Patient).await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        insert_doctor(&db, 2, "D1", "Dr. Grey", "grey@example.com", "pw").await;
        insert_medicine(&db, "Aspirin", 40, 3.5).await;

        let (_, medicines) = send(&app, Method::GET, "/medicines", None).await;
        assert_eq!(medicines[0]["name"], "Aspirin");

        let (status, body) = send(
            &app,
            Method::POST,
            "/orders",
            Some(json!({ "id": "P1", "order_date": "2024-05-01", "cost": 7.0, "address": "1 Main St" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Order placed successfully");

        let (status, call) =
            send(&app, Method::POST, "/ambulance", Some(json!({ "pid": "P1", "address": "1 Main St" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(call["call_id"], "C1");
        assert_eq!(call["address"], "1 Main St");

        let (_, doctors) = send(&app, Method::GET, "/doctors", None).await;
        assert_eq!(doctors[0]["doctor_id"], "D1");
        let (status, _) = send(&app, Method::GET, "/doctors/D9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, profile) = send(&app, Method::GET, "/profiles/P1", None).await;
        assert_eq!(profile["email"], "pat@example.com");
        let (status, _) = send(&app, Method::GET, "/lprofiles/L404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
