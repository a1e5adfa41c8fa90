// lib/src/storage_engine/mod.rs
// One module per entity group; each adds its statements to `Database`.

pub mod ambulance;
pub mod appointments;
pub mod doctors;
pub mod lab;
pub mod pharmacy;
pub mod prescriptions;
pub mod schema;
pub mod sequence;
pub mod users;

pub use sequence::Sequence;
