// security/src/lib.rs
// Credential checks for every Healthify role. Passwords are compared as stored
// and no session token is issued; callers receive the resolved user instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use lib::{Database, StorageError};
use models::errors::ValidationError;
use models::medical::{DoctorIdentity, NewUser, Role, User};
use models::validation::{normalize_date, require};

/// Signup payload as sent by the patient portal.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserRegistration {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    #[serde(rename = "contactNumber")]
    pub contact_number: Option<String>,
    pub password: Option<String>,
}

/// Login payload; `username` carries the email address.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserLogin {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A logged-in user together with the id of its role extension row.
/// Only the key matching the user's role is ever present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
}

impl AuthenticatedUser {
    fn new(user: User, extension_id: Option<String>) -> Self {
        let mut authenticated = AuthenticatedUser {
            user,
            patient_id: None,
            doctor_id: None,
            lab_staff_id: None,
            admin_id: None,
        };
        let slot = match authenticated.user.role {
            Role::Patient => &mut authenticated.patient_id,
            Role::Doctor => &mut authenticated.doctor_id,
            Role::LabStaff => &mut authenticated.lab_staff_id,
            Role::Admin => &mut authenticated.admin_id,
        };
        *slot = extension_id;
        authenticated
    }
}

/// Identifiers of a freshly registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    pub user_id: i64,
    pub patient_id: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => AuthError::Validation(e),
            other => AuthError::Storage(other),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Registers a new user with the `patient` role and a matching Patients row.
pub async fn register_user(db: &Database, registration: UserRegistration) -> AuthResult<RegisteredUser> {
    let missing = || ValidationError::MissingFields(ALL_FIELDS_REQUIRED);
    let full_name = require(registration.full_name, "fullName").map_err(|_| missing())?;
    let email = require(registration.email, "email").map_err(|_| missing())?;
    let dob = require(registration.dob, "dob").map_err(|_| missing())?;
    let contact_number = require(registration.contact_number, "contactNumber").map_err(|_| missing())?;
    let password = registration
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(missing)?;
    let date_of_birth = normalize_date("dob", &dob)?;

    if db.find_user_by_email(&email).await?.is_some() {
        debug!("Signup rejected, {} is already registered", email);
        return Err(AuthError::EmailExists);
    }

    let new_user = NewUser { full_name, email, date_of_birth, contact_number, password };
    match db.create_patient_account(&new_user).await {
        Ok((user_id, patient_id)) => {
            info!("Registered {} as user {}", new_user.email, user_id);
            Ok(RegisteredUser { user_id, patient_id: patient_id.to_string() })
        }
        // Another signup for the same email committed between the check and the insert.
        Err(e) if e.is_unique_violation() => Err(AuthError::EmailExists),
        Err(e) => Err(e.into()),
    }
}

/// Logs in any user and resolves the id of its role extension row.
pub async fn login_user(db: &Database, login: UserLogin) -> AuthResult<AuthenticatedUser> {
    let email = login.username.filter(|u| !u.is_empty()).ok_or(AuthError::InvalidCredentials)?;
    let password = login.password.filter(|p| !p.is_empty()).ok_or(AuthError::InvalidCredentials)?;

    let user = db
        .find_user_by_credentials(&email, &password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    let extension_id = db.role_extension_id(user.role, user.user_id).await?;
    debug!("User {} logged in as {}", user.user_id, user.role.as_str());
    Ok(AuthenticatedUser::new(user, extension_id))
}

/// Logs in a doctor. Shared by the doctor and admin services.
pub async fn doctor_login(db: &Database, email: Option<String>, password: Option<String>) -> AuthResult<DoctorIdentity> {
    let email = email.filter(|e| !e.is_empty()).ok_or(AuthError::InvalidCredentials)?;
    let password = password.filter(|p| !p.is_empty()).ok_or(AuthError::InvalidCredentials)?;
    db.find_doctor_by_credentials(&email, &password)
        .await?
        .ok_or(AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::fixtures::{insert_admin, insert_doctor, insert_lab_staff, insert_patient, test_database};

    fn registration(email: &str) -> UserRegistration {
        UserRegistration {
            full_name: Some("Jane Roe".into()),
            email: Some(email.into()),
            dob: Some("1990-04-01".into()),
            contact_number: Some("555-0100".into()),
            password: Some("secret".into()),
        }
    }

    fn login(email: &str, password: &str) -> UserLogin {
        UserLogin { username: Some(email.into()), password: Some(password.into()) }
    }

    #[tokio::test]
    async fn should_register_then_login_with_patient_id() {
        let (db, _dir) = test_database().await;
        let registered = register_user(&db, registration("jane@example.com")).await.unwrap();
        assert_eq!(registered.user_id, 1);

        let user = login_user(&db, login("jane@example.com", "secret")).await.unwrap();
        assert_eq!(user.patient_id.as_deref(), Some(registered.patient_id.as_str()));
        assert_eq!(user.doctor_id, None);
    }

    #[tokio::test]
    async fn should_reject_duplicate_email() {
        let (db, _dir) = test_database().await;
        register_user(&db, registration("jane@example.com")).await.unwrap();
        let err = register_user(&db, registration("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailExists));
        assert_eq!(err.to_string(), "Email already exists");
        assert_eq!(db.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_require_every_signup_field() {
        let (db, _dir) = test_database().await;
        let mut incomplete = registration("jane@example.com");
        incomplete.contact_number = None;
        let err = register_user(&db, incomplete).await.unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");

        let mut bad_dob = registration("jane@example.com");
        bad_dob.dob = Some("April 1st".into());
        assert!(matches!(
            register_user(&db, bad_dob).await.unwrap_err(),
            AuthError::Validation(ValidationError::InvalidDateFormat { .. })
        ));
        assert!(db.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_attach_role_specific_ids() {
        let (db, _dir) = test_database().await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        insert_doctor(&db, 2, "D1", "Doc", "doc@example.com", "pw").await;
        insert_lab_staff(&db, 3, "L101", "Lab", "lab@example.com", "pw").await;
        insert_admin(&db, 4, "AD1", "Admin", "admin@example.com", "pw").await;

        let patient = login_user(&db, login("pat@example.com", "pw")).await.unwrap();
        assert_eq!(patient.patient_id.as_deref(), Some("P1"));
        let doctor = login_user(&db, login("doc@example.com", "pw")).await.unwrap();
        assert_eq!(doctor.doctor_id.as_deref(), Some("D1"));
        let lab = login_user(&db, login("lab@example.com", "pw")).await.unwrap();
        assert_eq!(lab.lab_staff_id.as_deref(), Some("L101"));
        let admin = login_user(&db, login("admin@example.com", "pw")).await.unwrap();
        assert_eq!(admin.admin_id.as_deref(), Some("AD1"));

        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["admin_id"], "AD1");
        assert_eq!(json["role"], "admin");
        assert!(json.get("password").is_none());
        assert!(json.get("patient_id").is_none());
    }

    #[tokio::test]
    async fn should_reject_wrong_or_missing_credentials() {
        let (db, _dir) = test_database().await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        assert!(matches!(
            login_user(&db, login("pat@example.com", "wrong")).await.unwrap_err(),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            login_user(&db, UserLogin::default()).await.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn should_log_in_doctors_only() {
        let (db, _dir) = test_database().await;
        insert_doctor(&db, 1, "D1", "Doc", "doc@example.com", "pw").await;
        insert_patient(&db, 2, "P1", "Pat", "pat@example.com", "pw").await;

        let doctor = doctor_login(&db, Some("doc@example.com".into()), Some("pw".into())).await.unwrap();
        assert_eq!(doctor.doctor_id, "D1");
        assert!(doctor_login(&db, Some("pat@example.com".into()), Some("pw".into())).await.is_err());
        assert!(doctor_login(&db, None, Some("pw".into())).await.is_err());
    }
}
