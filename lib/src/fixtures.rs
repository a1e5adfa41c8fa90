// lib/src/fixtures.rs

//! Seed helpers for tests. Each test gets its own database file inside a
//! temporary directory that is removed when the returned `TempDir` drops.

use tempfile::TempDir;

use crate::config::DatabaseConfig;
use crate::database::Database;

pub async fn test_database() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}", dir.path().join("healthify-test.db").display());
    let config = DatabaseConfig {
        url,
        max_connections: 8,
        busy_timeout_secs: 10,
    };
    let db = Database::connect(&config).await.expect("open test database");
    (db, dir)
}

async fn insert_user(db: &Database, user_id: i64, full_name: &str, email: &str, password: &str, role: &str) {
    sqlx::query(
        "INSERT INTO users (user_id, full_name, email, password, date_of_birth, contact_number, role) \
         VALUES (?1, ?2, ?3, ?4, '1985-06-15', '555-0101', ?5)",
    )
    .bind(user_id)
    .bind(full_name)
    .bind(email)
    .bind(password)
    .bind(role)
    .execute(db.pool())
    .await
    .expect("insert user");
}

pub async fn insert_patient(db: &Database, user_id: i64, patient_id: &str, full_name: &str, email: &str, password: &str) {
    insert_user(db, user_id, full_name, email, password, "patient").await;
    sqlx::query("INSERT INTO patients (patient_id, user_id, status) VALUES (?1, ?2, 'Outpatient')")
        .bind(patient_id)
        .bind(user_id)
        .execute(db.pool())
        .await
        .expect("insert patient");
}

/// A doctor working 09:00 to 17:00.
pub async fn insert_doctor(db: &Database, user_id: i64, doctor_id: &str, full_name: &str, email: &str, password: &str) {
    insert_user(db, user_id, full_name, email, password, "doctor").await;
    sqlx::query(
        "INSERT INTO doctors (doctor_id, user_id, specialization, start_time, end_time, phone_number) \
         VALUES (?1, ?2, 'Cardiology', '09:00:00', '17:00:00', '555-0199')",
    )
    .bind(doctor_id)
    .bind(user_id)
    .execute(db.pool())
    .await
    .expect("insert doctor");
}

pub async fn insert_lab_staff(db: &Database, user_id: i64, lab_staff_id: &str, full_name: &str, email: &str, password: &str) {
    insert_user(db, user_id, full_name, email, password, "labstaff").await;
    sqlx::query("INSERT INTO labstaff (lab_staff_id, user_id, hire_date) VALUES (?1, ?2, '2020-01-06')")
        .bind(lab_staff_id)
        .bind(user_id)
        .execute(db.pool())
        .await
        .expect("insert lab staff");
}

pub async fn insert_admin(db: &Database, user_id: i64, admin_id: &str, full_name: &str, email: &str, password: &str) {
    insert_user(db, user_id, full_name, email, password, "admin").await;
    sqlx::query("INSERT INTO admin (admin_id, user_id) VALUES (?1, ?2)")
        .bind(admin_id)
        .bind(user_id)
        .execute(db.pool())
        .await
        .expect("insert admin");
}

/// Returns the new `medicine_id`.
pub async fn insert_medicine(db: &Database, name: &str, stock: i64, price: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO medicines (name, stock, expiry_date, category, description, price) \
         VALUES (?1, ?2, '2030-12-31', 'General', 'Test medicine', ?3) RETURNING medicine_id",
    )
    .bind(name)
    .bind(stock)
    .bind(price)
    .fetch_one(db.pool())
    .await
    .expect("insert medicine")
}

pub async fn insert_diagnosis(db: &Database, patient_id: &str, diagnosis: &str) {
    sqlx::query("INSERT INTO diagnosis (patient_id, diagnosis, notes, date) VALUES (?1, ?2, 'Follow up in two weeks', '2024-02-01')")
        .bind(patient_id)
        .bind(diagnosis)
        .execute(db.pool())
        .await
        .expect("insert diagnosis");
}
