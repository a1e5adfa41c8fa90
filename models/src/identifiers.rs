// models/src/identifiers.rs

use std::fmt;

/// Prefix of appointment identifiers (`A12`).
pub const APPOINTMENT_PREFIX: &str = "A";
/// Prefix of lab test identifiers (`L3`).
pub const LAB_TEST_PREFIX: &str = "L";
/// Prefix of lab report identifiers (`LR3`).
pub const LAB_REPORT_PREFIX: &str = "LR";
/// Prefix of ambulance call identifiers (`C7`).
pub const CALL_PREFIX: &str = "C";
/// Prefix of blood test result identifiers.
pub const BLOOD_RESULT_PREFIX: &str = "B";
/// Prefix of diabetic test result identifiers.
pub const DIABETIC_RESULT_PREFIX: &str = "D";
/// Prefix of genetic test result identifiers.
pub const GENETIC_RESULT_PREFIX: &str = "G";
/// Prefix of patient extension identifiers created at signup.
pub const PATIENT_PREFIX: &str = "P";

/// A prefixed-sequential identifier: a fixed letter prefix followed by a
/// positive decimal number, e.g. `A12` or `LR3`. Numbers are allocated by the
/// store, never by comparing rendered strings, which would put `A9` after `A10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrefixedId {
    prefix: &'static str,
    number: u64,
}

impl PrefixedId {
    /// Creates the identifier `<prefix><number>`.
    pub fn new(prefix: &'static str, number: u64) -> Self {
        Self { prefix, number }
    }
}

impl fmt::Display for PrefixedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}
