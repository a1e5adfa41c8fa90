// rest_api/src/state.rs

use std::sync::Arc;

use lib::{Database, LabConfig};

use crate::config::ServiceKind;

/// Shared state handed to every handler of one service.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub lab: Arc<LabConfig>,
    pub service: ServiceKind,
}

impl AppState {
    pub fn new(db: Database, lab: LabConfig, service: ServiceKind) -> Self {
        AppState { db, lab: Arc::new(lab), service }
    }
}
