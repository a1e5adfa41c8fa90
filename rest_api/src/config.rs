// rest_api/src/config.rs

use std::fmt;
use std::str::FromStr;

use lib::ServerConfig;
use serde::{Deserialize, Serialize};

/// The three independently listening Healthify services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Public and patient routes (signup, bookings, lab reports, pharmacy, ambulance).
    Patient,
    /// Doctor routes (appointment book, prescriptions, profile).
    Doctor,
    /// Admin routes (users, medicine inventory).
    Admin,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Patient, ServiceKind::Doctor, ServiceKind::Admin];

    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Patient => "patient",
            ServiceKind::Doctor => "doctor",
            ServiceKind::Admin => "admin",
        }
    }

    /// The configured port of this service.
    pub fn port(&self, server: &ServerConfig) -> u16 {
        match self {
            ServiceKind::Patient => server.patient_port,
            ServiceKind::Doctor => server.doctor_port,
            ServiceKind::Admin => server.admin_port,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown service '{s}' (expected patient, doctor or admin)"))
    }
}
