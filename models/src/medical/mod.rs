// models/src/medical/mod.rs

pub mod ambulance;
pub mod appointment;
pub mod doctor;
pub mod lab;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod user;

pub use ambulance::{Call, NewCall};
pub use appointment::{
    Appointment, AppointmentStatus, DoctorAppointment, NewAppointment, PatientAppointment, Schedule,
};
pub use doctor::{DoctorAccount, DoctorIdentity, DoctorProfile, DoctorSummary, WorkingHours};
pub use lab::{
    BloodTestResult, BookedLabTest, DiabeticTestResult, GeneticTestResult, NewLabTest, NewTestResult,
    PatientLabReports, PendingLabTest, ReportStatus, ReportSummary, ResultSubject, StaffPendingReport,
    TestCategory, TestResult, TestResultDetails,
};
pub use medication::{Medicine, NewMedicine, NewOrder};
pub use patient::{Diagnosis, DoctorPatient, PatientProfile};
pub use prescription::{NewPrescription, PrescriptionHistoryEntry};
pub use user::{AdminProfile, LabStaffProfile, NewUser, ProfileUpdate, Role, User, UserSummary};
