// lib/src/config/config_defaults.rs

pub const DEFAULT_CONFIG_FILE: &str = "healthify";
pub const ENV_PREFIX: &str = "HEALTHIFY";
pub const ENV_SEPARATOR: &str = "__";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://healthify.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PATIENT_PORT: u16 = 3001;
pub const DEFAULT_DOCTOR_PORT: u16 = 3002;
pub const DEFAULT_ADMIN_PORT: u16 = 3003;

/// Lab staff member every new lab test is assigned to.
pub const DEFAULT_LAB_STAFF_ID: &str = "L101";

pub fn default_database_url() -> String { DEFAULT_DATABASE_URL.to_string() }
pub fn default_max_connections() -> u32 { DEFAULT_MAX_CONNECTIONS }
pub fn default_busy_timeout_secs() -> u64 { DEFAULT_BUSY_TIMEOUT_SECS }
pub fn default_host() -> String { DEFAULT_HOST.to_string() }
pub fn default_patient_port() -> u16 { DEFAULT_PATIENT_PORT }
pub fn default_doctor_port() -> u16 { DEFAULT_DOCTOR_PORT }
pub fn default_admin_port() -> u16 { DEFAULT_ADMIN_PORT }
pub fn default_lab_staff_id() -> String { DEFAULT_LAB_STAFF_ID.to_string() }
