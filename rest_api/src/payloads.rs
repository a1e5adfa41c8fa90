// rest_api/src/payloads.rs

//! Request bodies as the Healthify frontend sends them. Every field is
//! optional at the wire level so a missing field surfaces as a validation
//! error with the envelope, not as a serde rejection. Numbers sent as strings
//! (form inputs) and ids sent as numbers are both accepted.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use models::errors::{ValidationError, ValidationResult};
use models::medical::{
    AppointmentStatus, NewAppointment, NewCall, NewLabTest, NewMedicine, NewOrder, NewPrescription,
    NewTestResult, ProfileUpdate, ResultSubject, Schedule, TestCategory, TestResultDetails,
};
use models::validation::{normalize_date, normalize_time, require, require_number};

fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn non_negative<T: PartialOrd + Default>(value: T, field: &'static str) -> ValidationResult<T> {
    if value < T::default() {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

fn schedule(date: Option<String>, time: Option<String>) -> ValidationResult<Schedule> {
    let date = require(date, "date")?;
    let time = require(time, "time")?;
    Ok(Schedule {
        date: normalize_date("date", &date)?,
        time: normalize_time("time", &time)?,
    })
}

/// `POST /confirmApp`
#[derive(Debug, Default, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub pid: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub did: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub time: Option<String>,
}

impl BookAppointmentRequest {
    pub fn validate(self) -> ValidationResult<NewAppointment> {
        let patient_id = require(self.pid, "pid")?;
        let doctor_id = require(self.did, "did")?;
        let Schedule { date, time } = schedule(self.date, self.time)?;
        Ok(NewAppointment { patient_id, doctor_id, date, time })
    }
}

/// `POST /resheduleApp` and `POST /reshedulelab`
#[derive(Debug, Default, Deserialize)]
pub struct RescheduleRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub time: Option<String>,
}

impl RescheduleRequest {
    pub fn validate(self) -> ValidationResult<(String, Schedule)> {
        let id = require(self.id, "id")?;
        Ok((id, schedule(self.date, self.time)?))
    }
}

/// `POST /confirmtest`
#[derive(Debug, Default, Deserialize)]
pub struct BookLabTestRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub pid: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub test: Option<String>,
}

impl BookLabTestRequest {
    pub fn validate(self) -> ValidationResult<NewLabTest> {
        let patient_id = require(self.pid, "pid")?;
        let Schedule { date, time } = schedule(self.date, self.time)?;
        let category: TestCategory = require(self.test, "test")?.parse()?;
        Ok(NewLabTest {
            patient_id,
            date,
            time,
            test_type: category.label().to_string(),
        })
    }
}

/// `POST /addBloodTest`, `/addDiabeticTest` and `/addGeneticTest` share one body;
/// only the fields of the submitted category are read.
#[derive(Debug, Default, Deserialize)]
pub struct TestResultRequest {
    #[serde(rename = "labReportId", default, deserialize_with = "opt_string")]
    pub lab_report_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub age: Option<i64>,
    #[serde(rename = "bloodType", default, deserialize_with = "opt_string")]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub hemoglobin: Option<f64>,
    #[serde(rename = "plateletsCount", default, deserialize_with = "opt_f64")]
    pub platelets_count: Option<f64>,
    #[serde(rename = "HbA1c", default, deserialize_with = "opt_f64")]
    pub hba1c: Option<f64>,
    #[serde(rename = "estimatedAvgGlucose", default, deserialize_with = "opt_f64")]
    pub estimated_avg_glucose: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub gene: Option<String>,
    #[serde(rename = "DNADescription", default, deserialize_with = "opt_string")]
    pub dna_description: Option<String>,
    #[serde(rename = "ProteinDescription", default, deserialize_with = "opt_string")]
    pub protein_description: Option<String>,
}

impl TestResultRequest {
    pub fn validate(self, category: TestCategory) -> ValidationResult<NewTestResult> {
        let labreport_id = require(self.lab_report_id, "labReportId")?;
        let dob = require(self.dob, "dob")?;
        let subject = ResultSubject {
            gender: require(self.gender, "gender")?,
            dob: normalize_date("dob", &dob)?,
            age: non_negative(require_number(self.age, "age")?, "age")?,
            blood_type: require(self.blood_type, "bloodType")?,
        };
        let details = match category {
            TestCategory::Blood => TestResultDetails::Blood {
                hemoglobin: require_number(self.hemoglobin, "hemoglobin")?,
                platelets_count: require_number(self.platelets_count, "plateletsCount")?,
            },
            TestCategory::Diabetic => TestResultDetails::Diabetic {
                hba1c: require_number(self.hba1c, "HbA1c")?,
                estimated_avg_glucose: require_number(self.estimated_avg_glucose, "estimatedAvgGlucose")?,
            },
            TestCategory::Genetic => TestResultDetails::Genetic {
                gene: require(self.gene, "gene")?,
                dna_description: require(self.dna_description, "DNADescription")?,
                protein_description: require(self.protein_description, "ProteinDescription")?,
            },
        };
        Ok(NewTestResult { labreport_id, subject, details })
    }
}

/// `GET /labtests/:reportId?testType=`
#[derive(Debug, Default, Deserialize)]
pub struct LabTestQuery {
    #[serde(rename = "testType")]
    pub test_type: Option<String>,
}

impl LabTestQuery {
    pub fn category(&self) -> ValidationResult<TestCategory> {
        self.test_type.as_deref().unwrap_or_default().parse()
    }
}

/// `POST /orders`. The delivery address is accepted but not stored.
#[derive(Debug, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub order_date: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub cost: Option<f64>,
}

impl OrderRequest {
    pub fn validate(self) -> ValidationResult<NewOrder> {
        let patient_id = require(self.id, "id")?;
        let order_date = require(self.order_date, "order_date")?;
        Ok(NewOrder {
            patient_id,
            order_date: normalize_date("order_date", &order_date)?,
            cost: non_negative(require_number(self.cost, "cost")?, "cost")?,
        })
    }
}

/// `POST /ambulance`
#[derive(Debug, Default, Deserialize)]
pub struct AmbulanceRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub pid: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub address: Option<String>,
}

impl AmbulanceRequest {
    pub fn validate(self) -> ValidationResult<NewCall> {
        Ok(NewCall {
            patient_id: require(self.pid, "pid")?,
            address: require(self.address, "address")?,
        })
    }
}

/// `POST /doctor/login`
#[derive(Debug, Default, Deserialize)]
pub struct DoctorLoginRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub password: Option<String>,
}

/// `PUT /doctor/appointments/:id`
#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    pub fn validate(self) -> ValidationResult<AppointmentStatus> {
        require(self.status, "status")?.parse()
    }
}

/// `PUT /api/reshedule/:id`
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub time: Option<String>,
}

impl ScheduleRequest {
    pub fn validate(self) -> ValidationResult<Schedule> {
        let missing = |_| ValidationError::MissingFields("Date and time are required");
        let date = require(self.date, "date").map_err(missing)?;
        let time = require(self.time, "time").map_err(missing)?;
        schedule(Some(date), Some(time))
    }
}

/// `POST /api/prescriptions`
#[derive(Debug, Default, Deserialize)]
pub struct PrescriptionRequest {
    #[serde(rename = "patientId", default, deserialize_with = "opt_string")]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub medicine: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub dosage: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub diagnosis: Option<String>,
}

impl PrescriptionRequest {
    pub fn validate(self) -> ValidationResult<NewPrescription> {
        Ok(NewPrescription {
            patient_id: require(self.patient_id, "patientId")?,
            medicine: require(self.medicine, "medicine")?,
            dosage: require(self.dosage, "dosage")?,
            duration: require(self.duration, "duration")?,
            diagnosis: require(self.diagnosis, "diagnosis")?,
        })
    }
}

/// `POST /api/update-profile`
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default, deserialize_with = "opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub password: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn validate(self) -> ValidationResult<ProfileUpdate> {
        let missing = || ValidationError::MissingFields("All fields are required.");
        Ok(ProfileUpdate {
            user_id: self.id.ok_or_else(missing)?,
            full_name: require(self.name, "name").map_err(|_| missing())?,
            email: require(self.email, "email").map_err(|_| missing())?,
            password: self.password.filter(|p| !p.is_empty()).ok_or_else(missing)?,
        })
    }
}

/// `PUT /api/users/:id`
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub email: Option<String>,
}

impl UserUpdateRequest {
    pub fn validate(self) -> ValidationResult<(String, String)> {
        Ok((require(self.full_name, "full_name")?, require(self.email, "email")?))
    }
}

/// `POST /api/medicinesadd`; `date` is the expiry date.
#[derive(Debug, Default, Deserialize)]
pub struct NewMedicineRequest {
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_i64")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "opt_string")]
    pub date: Option<String>,
}

impl NewMedicineRequest {
    pub fn validate(self) -> ValidationResult<NewMedicine> {
        let expiry_date = match self.date.filter(|d| !d.trim().is_empty()) {
            Some(date) => Some(normalize_date("date", &date)?),
            None => None,
        };
        Ok(NewMedicine {
            name: require(self.name, "name")?,
            category: self.category.filter(|c| !c.trim().is_empty()),
            description: self.description.filter(|d| !d.trim().is_empty()),
            stock: non_negative(require_number(self.stock, "stock")?, "stock")?,
            price: non_negative(require_number(self.price, "price")?, "price")?,
            expiry_date,
        })
    }
}

/// `PUT /api/medicines/:id/stock`
#[derive(Debug, Default, Deserialize)]
pub struct StockUpdateRequest {
    #[serde(default, deserialize_with = "opt_i64")]
    pub stock: Option<i64>,
}

impl StockUpdateRequest {
    pub fn validate(self) -> ValidationResult<i64> {
        non_negative(require_number(self.stock, "stock")?, "stock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: for<'de> Deserialize<'de>>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_accept_numbers_and_strings_interchangeably() {
        let order: OrderRequest = parse(json!({ "id": "P1", "order_date": "2024-05-01", "cost": "12.50" }));
        assert_eq!(order.validate().unwrap().cost, 12.5);

        let update: ProfileUpdateRequest =
            parse(json!({ "id": "7", "name": "Dr. Grey", "email": "g@example.com", "password": "pw" }));
        assert_eq!(update.validate().unwrap().user_id, 7);

        let booking: BookAppointmentRequest = parse(json!({ "pid": "P1", "did": 3, "date": "2024-05-01", "time": "09:30" }));
        let booking = booking.validate().unwrap();
        assert_eq!(booking.doctor_id, "3");
        assert_eq!(booking.time, "09:30:00");
    }

    #[test]
    fn should_name_the_first_missing_field() {
        let booking: BookAppointmentRequest = parse(json!({ "pid": "P1", "date": "2024-05-01", "time": "09:30" }));
        assert_eq!(booking.validate().unwrap_err(), ValidationError::MissingField("did"));

        let schedule: ScheduleRequest = parse(json!({ "date": "2024-05-01" }));
        assert_eq!(schedule.validate().unwrap_err().to_string(), "Date and time are required");

        let profile: ProfileUpdateRequest = parse(json!({ "id": 1, "name": "A" }));
        assert_eq!(profile.validate().unwrap_err().to_string(), "All fields are required.");
    }

    #[test]
    fn should_only_read_fields_of_the_submitted_category() {
        let body = json!({
            "labReportId": "LR1", "gender": "F", "dob": "1990-04-01", "age": 34, "bloodType": "O+",
            "HbA1c": 5.4, "estimatedAvgGlucose": "108"
        });
        let diabetic = parse::<TestResultRequest>(body.clone()).validate(TestCategory::Diabetic).unwrap();
        assert_eq!(
            diabetic.details,
            TestResultDetails::Diabetic { hba1c: 5.4, estimated_avg_glucose: 108.0 }
        );
        assert_eq!(
            parse::<TestResultRequest>(body).validate(TestCategory::Blood).unwrap_err(),
            ValidationError::MissingField("hemoglobin")
        );
    }

    #[test]
    fn should_reject_unknown_lab_test_types() {
        let booking: BookLabTestRequest =
            parse(json!({ "pid": "P1", "date": "2024-05-01", "time": "08:00", "test": "X-Ray" }));
        assert!(matches!(booking.validate(), Err(ValidationError::InvalidTestType(_))));
        assert!(LabTestQuery::default().category().is_err());
        let query = LabTestQuery { test_type: Some("Genetic Test".into()) };
        assert_eq!(query.category().unwrap(), TestCategory::Genetic);
    }

    #[test]
    fn should_reject_negative_quantities() {
        let stock: StockUpdateRequest = parse(json!({ "stock": -1 }));
        assert_eq!(stock.validate().unwrap_err(), ValidationError::Negative("stock"));
        let stock: StockUpdateRequest = parse(json!({ "stock": 0 }));
        assert_eq!(stock.validate().unwrap(), 0);

        let medicine: NewMedicineRequest = parse(json!({ "name": "Aspirin", "stock": 5, "price": -2.0 }));
        assert_eq!(medicine.validate().unwrap_err(), ValidationError::Negative("price"));
    }

    #[test]
    fn should_validate_status_values() {
        let update: StatusUpdateRequest = parse(json!({ "status": "Completed" }));
        assert_eq!(update.validate().unwrap(), AppointmentStatus::Completed);
        let update: StatusUpdateRequest = parse(json!({ "status": "done" }));
        assert!(matches!(update.validate(), Err(ValidationError::InvalidStatus(_))));
    }
}
