// lib/src/storage_engine/sequence.rs

//! Store-side identifier sequences.
//!
//! Each sequence is a row of `id_sequences`. Allocation is a single upsert, so
//! it runs under the database write lock and two writers can never be handed
//! the same value. The first allocation seeds the row from the highest
//! numeric suffix already present in the target table.

use models::identifiers::{
    PrefixedId, APPOINTMENT_PREFIX, BLOOD_RESULT_PREFIX, CALL_PREFIX, DIABETIC_RESULT_PREFIX,
    GENETIC_RESULT_PREFIX, LAB_REPORT_PREFIX, LAB_TEST_PREFIX, PATIENT_PREFIX,
};
use sqlx::{Executor, Sqlite};
use tracing::debug;

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    name: &'static str,
    table: &'static str,
    column: &'static str,
    prefix: &'static str,
}

impl Sequence {
    pub const APPOINTMENTS: Sequence = Sequence::prefixed("appointments", "appointments", "appointment_id", APPOINTMENT_PREFIX);
    pub const LAB_TESTS: Sequence = Sequence::prefixed("labtests", "labtests", "labtest_id", LAB_TEST_PREFIX);
    pub const LAB_REPORTS: Sequence = Sequence::prefixed("labreports", "labreports", "labreport_id", LAB_REPORT_PREFIX);
    pub const CALLS: Sequence = Sequence::prefixed("calls", "calls", "call_id", CALL_PREFIX);
    pub const BLOOD_RESULTS: Sequence = Sequence::prefixed("bloodtestresults", "bloodtestresults", "resultId", BLOOD_RESULT_PREFIX);
    pub const DIABETIC_RESULTS: Sequence = Sequence::prefixed("diabetictestresults", "diabetictestresults", "resultId", DIABETIC_RESULT_PREFIX);
    pub const GENETIC_RESULTS: Sequence = Sequence::prefixed("genetictestresults", "genetictestresults", "resultId", GENETIC_RESULT_PREFIX);
    pub const PATIENTS: Sequence = Sequence::prefixed("patients", "patients", "patient_id", PATIENT_PREFIX);

    const fn prefixed(name: &'static str, table: &'static str, column: &'static str, prefix: &'static str) -> Self {
        Sequence { name, table, column, prefix }
    }

    /// Expression for the first value of an unseeded sequence: one past the
    /// largest numeric suffix in the target table, or 1 when it is empty.
    fn seed_expression(&self) -> String {
        format!(
            "SELECT COALESCE(MAX(CAST(SUBSTR({column}, {start}) AS INTEGER)), 0) + 1 FROM {table} \
             WHERE SUBSTR({column}, 1, {len}) = '{prefix}' AND SUBSTR({column}, {start}) GLOB '[0-9]*'",
            column = self.column,
            table = self.table,
            start = self.prefix.len() + 1,
            len = self.prefix.len(),
            prefix = self.prefix,
        )
    }

    /// Allocates the next raw value. Never returns the same value twice, and
    /// never a value at or below one already present in the target table.
    pub async fn next_value<'e, E>(&self, executor: E) -> Result<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "INSERT INTO id_sequences (name, value) VALUES (?1, ({seed})) \
             ON CONFLICT(name) DO UPDATE SET value = MAX(value + 1, excluded.value) \
             RETURNING value",
            seed = self.seed_expression()
        );
        let value: i64 = sqlx::query_scalar(&sql).bind(self.name).fetch_one(executor).await?;
        debug!("Allocated {} from sequence {}", value, self.name);
        Ok(value)
    }

    /// Allocates the next prefixed identifier, e.g. `A12`.
    pub async fn next_id<'e, E>(&self, executor: E) -> Result<PrefixedId>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let value = self.next_value(executor).await?;
        Ok(PrefixedId::new(self.prefix, value as u64))
    }
}
