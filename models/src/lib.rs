// models/src/lib.rs
// Domain types shared by the storage layer, the credential checks and the HTTP services.

pub mod errors;
pub mod identifiers;
pub mod medical;
pub mod validation;

pub use errors::{ValidationError, ValidationResult};
pub use identifiers::PrefixedId;
pub use medical::*;
