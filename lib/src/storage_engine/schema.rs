// lib/src/storage_engine/schema.rs

use tracing::debug;

use crate::database::Database;
use crate::errors::Result;

/// Every table the services read or write. Foreign keys are implied by joins
/// and are not declared.
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            date_of_birth TEXT,
            contact_number TEXT,
            role TEXT NOT NULL DEFAULT 'patient'
        )",
    ),
    (
        "doctors",
        "CREATE TABLE IF NOT EXISTS doctors (
            doctor_id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            specialization TEXT,
            start_time TEXT,
            end_time TEXT,
            phone_number TEXT
        )",
    ),
    (
        "patients",
        "CREATE TABLE IF NOT EXISTS patients (
            patient_id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            status TEXT
        )",
    ),
    (
        "labstaff",
        "CREATE TABLE IF NOT EXISTS labstaff (
            lab_staff_id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            hire_date TEXT
        )",
    ),
    (
        "admin",
        "CREATE TABLE IF NOT EXISTS admin (
            admin_id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL
        )",
    ),
    (
        "appointments",
        "CREATE TABLE IF NOT EXISTS appointments (
            appointment_id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL,
            doctor_id TEXT NOT NULL,
            appointment_date TEXT NOT NULL,
            appointment_time TEXT NOT NULL,
            room_id TEXT,
            status TEXT NOT NULL DEFAULT 'pending'
        )",
    ),
    (
        "labtests",
        "CREATE TABLE IF NOT EXISTS labtests (
            labtest_id TEXT PRIMARY KEY,
            test_date TEXT NOT NULL,
            test_time TEXT NOT NULL,
            test_type TEXT NOT NULL,
            patient_id TEXT NOT NULL,
            staff_id TEXT
        )",
    ),
    (
        "labreports",
        "CREATE TABLE IF NOT EXISTS labreports (
            labreport_id TEXT PRIMARY KEY,
            labtest_id TEXT NOT NULL,
            result TEXT NOT NULL DEFAULT 'N/A'
        )",
    ),
    (
        "bloodtestresults",
        "CREATE TABLE IF NOT EXISTS bloodtestresults (
            resultId TEXT PRIMARY KEY,
            labreport_id TEXT NOT NULL,
            gender TEXT,
            dob TEXT,
            age INTEGER,
            bloodType TEXT,
            hemoglobin REAL,
            plateletsCount REAL
        )",
    ),
    (
        "diabetictestresults",
        "CREATE TABLE IF NOT EXISTS diabetictestresults (
            resultId TEXT PRIMARY KEY,
            labreport_id TEXT NOT NULL,
            gender TEXT,
            dob TEXT,
            age INTEGER,
            bloodType TEXT,
            HbA1c REAL,
            estimatedAvgGlucose REAL
        )",
    ),
    (
        "genetictestresults",
        "CREATE TABLE IF NOT EXISTS genetictestresults (
            resultId TEXT PRIMARY KEY,
            labreport_id TEXT NOT NULL,
            gender TEXT,
            dob TEXT,
            age INTEGER,
            bloodType TEXT,
            gene TEXT,
            DNADescription TEXT,
            ProteinDescription TEXT
        )",
    ),
    (
        "medicines",
        "CREATE TABLE IF NOT EXISTS medicines (
            medicine_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            stock INTEGER NOT NULL DEFAULT 0,
            expiry_date TEXT,
            category TEXT,
            description TEXT,
            price REAL NOT NULL DEFAULT 0
        )",
    ),
    (
        "orders",
        "CREATE TABLE IF NOT EXISTS orders (
            order_id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_date TEXT NOT NULL,
            patient_id TEXT NOT NULL,
            cost REAL NOT NULL
        )",
    ),
    (
        "calls",
        "CREATE TABLE IF NOT EXISTS calls (
            call_id TEXT PRIMARY KEY,
            patient_id TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            address TEXT NOT NULL
        )",
    ),
    (
        "prescriptions",
        "CREATE TABLE IF NOT EXISTS prescriptions (
            prescription_id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_id TEXT NOT NULL,
            medicine TEXT NOT NULL,
            dosage TEXT NOT NULL,
            duration TEXT NOT NULL,
            diagnosis TEXT NOT NULL,
            date TEXT NOT NULL
        )",
    ),
    (
        "diagnosis",
        "CREATE TABLE IF NOT EXISTS diagnosis (
            diagnosis_id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_id TEXT NOT NULL,
            diagnosis TEXT NOT NULL,
            notes TEXT,
            date TEXT
        )",
    ),
    (
        "id_sequences",
        "CREATE TABLE IF NOT EXISTS id_sequences (
            name TEXT PRIMARY KEY,
            value INTEGER NOT NULL
        )",
    ),
];

impl Database {
    /// Creates any missing table. Existing tables and rows are left untouched.
    pub(crate) async fn bootstrap_schema(&self) -> Result<()> {
        for &(name, ddl) in TABLES {
            sqlx::query(ddl).execute(self.pool()).await?;
            debug!("Ensured table {}", name);
        }
        Ok(())
    }
}
