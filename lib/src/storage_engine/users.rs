// lib/src/storage_engine/users.rs

use models::medical::{
    AdminProfile, DoctorAccount, LabStaffProfile, NewUser, PatientProfile, ProfileUpdate, Role, User,
    UserSummary,
};
use models::PrefixedId;
use tracing::info;

use crate::database::Database;
use crate::errors::{Result, StorageError};
use crate::storage_engine::sequence::Sequence;

const USER_COLUMNS: &str = "user_id, full_name, email, password, date_of_birth, contact_number, role";

fn email_conflict(err: sqlx::Error) -> StorageError {
    let err = StorageError::from(err);
    if err.is_unique_violation() {
        StorageError::AlreadyExists("Email already exists".to_string())
    } else {
        err
    }
}

impl Database {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
        Ok(sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(self.pool()).await?)
    }

    /// Looks up a user by exact email and password match.
    pub async fn find_user_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 AND password = ?2");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password)
            .fetch_optional(self.pool())
            .await?)
    }

    /// The role-specific surrogate id of a user (`patient_id`, `doctor_id`,
    /// `lab_staff_id` or `admin_id`), if the extension row exists.
    pub async fn role_extension_id(&self, role: Role, user_id: i64) -> Result<Option<String>> {
        let (table, column) = match role {
            Role::Patient => ("patients", "patient_id"),
            Role::Doctor => ("doctors", "doctor_id"),
            Role::LabStaff => ("labstaff", "lab_staff_id"),
            Role::Admin => ("admin", "admin_id"),
        };
        let sql = format!("SELECT {column} FROM {table} WHERE user_id = ?1 LIMIT 1");
        Ok(sqlx::query_scalar::<_, String>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Registers a patient: the Users row and its Patients extension row are
    /// written together or not at all. The new `user_id` is always one past the
    /// current maximum, so ids freed by deleting the newest user are reused.
    /// Returns the new `user_id` and `patient_id`.
    pub async fn create_patient_account(&self, user: &NewUser) -> Result<(i64, PrefixedId)> {
        let mut tx = self.pool().begin().await?;

        // MAX(user_id) is read and written in one statement.
        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (user_id, full_name, email, date_of_birth, contact_number, password, role) \
             VALUES ((SELECT COALESCE(MAX(user_id), 0) + 1 FROM users), ?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING user_id",
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.date_of_birth)
        .bind(&user.contact_number)
        .bind(&user.password)
        .bind(Role::Patient)
        .fetch_one(&mut *tx)
        .await?;

        let patient_id = Sequence::PATIENTS.next_id(&mut *tx).await?;
        sqlx::query("INSERT INTO patients (patient_id, user_id) VALUES (?1, ?2)")
            .bind(patient_id.to_string())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Registered user {} as patient {}", user_id, patient_id);
        Ok((user_id, patient_id))
    }

    /// Every user except administrators.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        Ok(sqlx::query_as::<_, UserSummary>(
            "SELECT user_id, full_name, email FROM users WHERE role != 'admin' ORDER BY user_id",
        )
        .fetch_all(self.pool())
        .await?)
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserSummary>> {
        Ok(sqlx::query_as::<_, UserSummary>("SELECT user_id, full_name, email FROM users WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Returns the number of rows changed. Fails with `AlreadyExists` when
    /// `email` belongs to another user.
    pub async fn update_user(&self, user_id: i64, full_name: &str, email: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET full_name = ?1, email = ?2 WHERE user_id = ?3")
            .bind(full_name)
            .bind(email)
            .bind(user_id)
            .execute(self.pool())
            .await
            .map_err(email_conflict)?;
        Ok(result.rows_affected())
    }

    /// Removes a user with its role extension rows, so a reused `user_id`
    /// never inherits a former patient, doctor, lab staff or admin id.
    pub async fn delete_user(&self, user_id: i64) -> Result<u64> {
        let mut tx = self.pool().begin().await?;
        for table in ["patients", "doctors", "labstaff", "admin"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE user_id = ?1"))
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(deleted)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET full_name = ?1, email = ?2, password = ?3 WHERE user_id = ?4")
            .bind(&update.full_name)
            .bind(&update.email)
            .bind(&update.password)
            .bind(update.user_id)
            .execute(self.pool())
            .await
            .map_err(email_conflict)?;
        Ok(result.rows_affected())
    }

    pub async fn admin_profile(&self, user_id: i64) -> Result<Option<AdminProfile>> {
        Ok(sqlx::query_as::<_, AdminProfile>(
            "SELECT a.admin_id, u.user_id, u.full_name, u.email, u.date_of_birth, u.contact_number, u.role \
             FROM users u JOIN admin a ON a.user_id = u.user_id WHERE a.user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?)
    }

    pub async fn doctor_account(&self, user_id: i64) -> Result<Option<DoctorAccount>> {
        Ok(sqlx::query_as::<_, DoctorAccount>(
            "SELECT d.doctor_id, u.user_id, d.specialization, d.start_time, d.end_time, d.phone_number, \
                    u.full_name, u.email, u.date_of_birth, u.contact_number, u.role \
             FROM users u JOIN doctors d ON d.user_id = u.user_id WHERE d.user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?)
    }

    pub async fn patient_profile(&self, patient_id: &str) -> Result<Option<PatientProfile>> {
        Ok(sqlx::query_as::<_, PatientProfile>(
            "SELECT u.date_of_birth, u.full_name, u.email, u.contact_number, p.status \
             FROM users u JOIN patients p ON u.user_id = p.user_id WHERE p.patient_id = ?1",
        )
        .bind(patient_id)
        .fetch_optional(self.pool())
        .await?)
    }

    pub async fn lab_staff_profile(&self, lab_staff_id: &str) -> Result<Option<LabStaffProfile>> {
        Ok(sqlx::query_as::<_, LabStaffProfile>(
            "SELECT u.date_of_birth, u.full_name, u.email, u.contact_number, l.hire_date \
             FROM users u JOIN labstaff l ON u.user_id = l.user_id WHERE l.lab_staff_id = ?1",
        )
        .bind(lab_staff_id)
        .fetch_optional(self.pool())
        .await?)
    }
}
