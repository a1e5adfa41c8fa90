// lib/src/storage_engine/ambulance.rs

use chrono::Local;
use models::medical::{Call, NewCall};
use models::validation::{DATE_FORMAT, TIME_FORMAT};
use tracing::info;

use crate::database::Database;
use crate::errors::Result;
use crate::storage_engine::sequence::Sequence;

impl Database {
    /// Dispatches an ambulance, stamping the call with the current local date and time.
    pub async fn dispatch_ambulance(&self, call: &NewCall) -> Result<Call> {
        let now = Local::now();
        let date = now.format(DATE_FORMAT).to_string();
        let time = now.format(TIME_FORMAT).to_string();

        let mut tx = self.pool().begin().await?;
        let call_id = Sequence::CALLS.next_id(&mut *tx).await?.to_string();
        sqlx::query("INSERT INTO calls (call_id, patient_id, date, time, address) VALUES (?1, ?2, ?3, ?4, ?5)")
            .bind(&call_id)
            .bind(&call.patient_id)
            .bind(&date)
            .bind(&time)
            .bind(&call.address)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Dispatched ambulance call {} for patient {}", call_id, call.patient_id);
        Ok(Call {
            call_id,
            patient_id: call.patient_id.clone(),
            date,
            time,
            address: call.address.clone(),
        })
    }
}
