// models/src/medical/lab.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::ValidationError;

/// The `result` column of a lab report. A report is created `N/A` together
/// with its lab test and becomes `Available` once a result row is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum ReportStatus {
    #[serde(rename = "N/A")]
    #[sqlx(rename = "N/A")]
    Pending,
    Available,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "N/A",
            ReportStatus::Available => "Available",
        }
    }
}

/// Lab test categories that have a result table of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestCategory {
    #[serde(rename = "Blood Test")]
    Blood,
    #[serde(rename = "Diabetic Test")]
    Diabetic,
    #[serde(rename = "Genetic Test")]
    Genetic,
}

impl TestCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TestCategory::Blood => "Blood Test",
            TestCategory::Diabetic => "Diabetic Test",
            TestCategory::Genetic => "Genetic Test",
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Blood Test" => Ok(TestCategory::Blood),
            "Diabetic Test" => Ok(TestCategory::Diabetic),
            "Genetic Test" => Ok(TestCategory::Genetic),
            other => Err(ValidationError::InvalidTestType(other.to_string())),
        }
    }
}

/// A booked test whose report is still `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PendingLabTest {
    pub labtest_id: String,
    pub test_type: String,
    pub test_date: String,
    pub test_time: String,
}

/// A report waiting on a lab staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StaffPendingReport {
    pub labreport_id: String,
    pub test_date: String,
    pub test_time: String,
    pub test_type: String,
    pub patient_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReportSummary {
    pub labreport_id: String,
    pub result_date: String,
    pub test_type: String,
}

/// A patient's reports split by whether a result has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientLabReports {
    pub ready_reports: Vec<ReportSummary>,
    pub in_progress_reports: Vec<ReportSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLabTest {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub test_type: String,
}

/// Identifiers allocated for a test booking and its paired report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedLabTest {
    pub labtest_id: String,
    pub labreport_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BloodTestResult {
    #[serde(rename = "resultId")]
    #[sqlx(rename = "resultId")]
    pub result_id: String,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub age: Option<i64>,
    #[serde(rename = "bloodType")]
    #[sqlx(rename = "bloodType")]
    pub blood_type: Option<String>,
    pub hemoglobin: Option<f64>,
    #[serde(rename = "plateletsCount")]
    #[sqlx(rename = "plateletsCount")]
    pub platelets_count: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DiabeticTestResult {
    #[serde(rename = "resultId")]
    #[sqlx(rename = "resultId")]
    pub result_id: String,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub age: Option<i64>,
    #[serde(rename = "bloodType")]
    #[sqlx(rename = "bloodType")]
    pub blood_type: Option<String>,
    #[serde(rename = "HbA1c")]
    #[sqlx(rename = "HbA1c")]
    pub hba1c: Option<f64>,
    #[serde(rename = "estimatedAvgGlucose")]
    #[sqlx(rename = "estimatedAvgGlucose")]
    pub estimated_avg_glucose: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GeneticTestResult {
    #[serde(rename = "resultId")]
    #[sqlx(rename = "resultId")]
    pub result_id: String,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub age: Option<i64>,
    #[serde(rename = "bloodType")]
    #[sqlx(rename = "bloodType")]
    pub blood_type: Option<String>,
    pub gene: Option<String>,
    #[serde(rename = "DNADescription")]
    #[sqlx(rename = "DNADescription")]
    pub dna_description: Option<String>,
    #[serde(rename = "ProteinDescription")]
    #[sqlx(rename = "ProteinDescription")]
    pub protein_description: Option<String>,
}

/// A recorded result of any category, serialized as the bare row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestResult {
    Blood(BloodTestResult),
    Diabetic(DiabeticTestResult),
    Genetic(GeneticTestResult),
}

/// Fields shared by every result category.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSubject {
    pub gender: String,
    pub dob: String,
    pub age: i64,
    pub blood_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TestResultDetails {
    Blood {
        hemoglobin: f64,
        platelets_count: f64,
    },
    Diabetic {
        hba1c: f64,
        estimated_avg_glucose: f64,
    },
    Genetic {
        gene: String,
        dna_description: String,
        protein_description: String,
    },
}

impl TestResultDetails {
    pub fn category(&self) -> TestCategory {
        match self {
            TestResultDetails::Blood { .. } => TestCategory::Blood,
            TestResultDetails::Diabetic { .. } => TestCategory::Diabetic,
            TestResultDetails::Genetic { .. } => TestCategory::Genetic,
        }
    }
}

/// A result about to be recorded against an existing report.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTestResult {
    pub labreport_id: String,
    pub subject: ResultSubject,
    pub details: TestResultDetails,
}
