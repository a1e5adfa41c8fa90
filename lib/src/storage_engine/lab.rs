// lib/src/storage_engine/lab.rs

use models::medical::{
    BloodTestResult, BookedLabTest, DiabeticTestResult, GeneticTestResult, NewLabTest, NewTestResult,
    PatientLabReports, PendingLabTest, ReportStatus, ReportSummary, StaffPendingReport, TestCategory,
    TestResult, TestResultDetails,
};
use models::PrefixedId;
use tracing::{info, warn};

use crate::database::Database;
use crate::errors::{Result, StorageError};
use crate::storage_engine::sequence::Sequence;

const REPORT_SUMMARY: &str = "SELECT r.labreport_id, l.test_date AS result_date, l.test_type \
     FROM labreports r JOIN labtests l ON l.labtest_id = r.labtest_id \
     WHERE l.patient_id = ?1";

impl Database {
    /// Tests booked by a patient whose report has no result yet.
    pub async fn pending_lab_tests(&self, patient_id: &str) -> Result<Vec<PendingLabTest>> {
        Ok(sqlx::query_as::<_, PendingLabTest>(
            "SELECT l.labtest_id, l.test_type, l.test_date, l.test_time \
             FROM labtests l JOIN labreports r ON l.labtest_id = r.labtest_id \
             WHERE l.patient_id = ?1 AND r.result = ?2 \
             ORDER BY l.test_date, l.test_time",
        )
        .bind(patient_id)
        .bind(ReportStatus::Pending)
        .fetch_all(self.pool())
        .await?)
    }

    /// Reports assigned to a lab staff member that still wait for a result.
    pub async fn staff_pending_reports(&self, staff_id: &str) -> Result<Vec<StaffPendingReport>> {
        Ok(sqlx::query_as::<_, StaffPendingReport>(
            "SELECT r.labreport_id, l.test_date, l.test_time, l.test_type, l.patient_id \
             FROM labtests l JOIN labreports r ON l.labtest_id = r.labtest_id \
             WHERE r.result = ?1 AND l.staff_id = ?2 \
             ORDER BY l.test_date, l.test_time",
        )
        .bind(ReportStatus::Pending)
        .bind(staff_id)
        .fetch_all(self.pool())
        .await?)
    }

    /// Books a lab test and its `N/A` report in one transaction.
    pub async fn book_lab_test(&self, test: &NewLabTest, staff_id: &str) -> Result<BookedLabTest> {
        let mut tx = self.pool().begin().await?;

        let labtest_id = Sequence::LAB_TESTS.next_id(&mut *tx).await?;
        sqlx::query(
            "INSERT INTO labtests (labtest_id, test_date, test_time, test_type, patient_id, staff_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(labtest_id.to_string())
        .bind(&test.date)
        .bind(&test.time)
        .bind(&test.test_type)
        .bind(&test.patient_id)
        .bind(staff_id)
        .execute(&mut *tx)
        .await?;

        let labreport_id = Sequence::LAB_REPORTS.next_id(&mut *tx).await?;
        sqlx::query("INSERT INTO labreports (labreport_id, labtest_id, result) VALUES (?1, ?2, ?3)")
            .bind(labreport_id.to_string())
            .bind(labtest_id.to_string())
            .bind(ReportStatus::Pending)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Booked lab test {} with report {} for patient {}", labtest_id, labreport_id, test.patient_id);
        Ok(BookedLabTest {
            labtest_id: labtest_id.to_string(),
            labreport_id: labreport_id.to_string(),
        })
    }

    pub async fn reschedule_lab_test(&self, labtest_id: &str, date: &str, time: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE labtests SET test_date = ?1, test_time = ?2 WHERE labtest_id = ?3")
            .bind(date)
            .bind(time)
            .bind(labtest_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Removes a lab test together with its report and any recorded result.
    /// Returns the number of tests removed.
    pub async fn delete_lab_test(&self, labtest_id: &str) -> Result<u64> {
        let mut tx = self.pool().begin().await?;
        for table in ["bloodtestresults", "diabetictestresults", "genetictestresults"] {
            sqlx::query(&format!(
                "DELETE FROM {table} WHERE labreport_id IN (SELECT labreport_id FROM labreports WHERE labtest_id = ?1)"
            ))
            .bind(labtest_id)
            .execute(&mut *tx)
            .await?;
        }
        sqlx::query("DELETE FROM labreports WHERE labtest_id = ?1")
            .bind(labtest_id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM labtests WHERE labtest_id = ?1")
            .bind(labtest_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(deleted)
    }

    /// A patient's reports split into those with a result and those without.
    pub async fn patient_lab_reports(&self, patient_id: &str) -> Result<PatientLabReports> {
        let ready_sql = format!("{REPORT_SUMMARY} AND r.result != ?2 ORDER BY l.test_date");
        let ready_reports = sqlx::query_as::<_, ReportSummary>(&ready_sql)
            .bind(patient_id)
            .bind(ReportStatus::Pending)
            .fetch_all(self.pool())
            .await?;

        let pending_sql = format!("{REPORT_SUMMARY} AND r.result = ?2 ORDER BY l.test_date");
        let in_progress_reports = sqlx::query_as::<_, ReportSummary>(&pending_sql)
            .bind(patient_id)
            .bind(ReportStatus::Pending)
            .fetch_all(self.pool())
            .await?;

        Ok(PatientLabReports { ready_reports, in_progress_reports })
    }

    /// The recorded result of a report in the given category, if any.
    pub async fn test_result(&self, labreport_id: &str, category: TestCategory) -> Result<Option<TestResult>> {
        let result = match category {
            TestCategory::Blood => sqlx::query_as::<_, BloodTestResult>(
                "SELECT resultId, gender, dob, age, bloodType, hemoglobin, plateletsCount \
                 FROM bloodtestresults WHERE labreport_id = ?1",
            )
            .bind(labreport_id)
            .fetch_optional(self.pool())
            .await?
            .map(TestResult::Blood),
            TestCategory::Diabetic => sqlx::query_as::<_, DiabeticTestResult>(
                "SELECT resultId, gender, dob, age, bloodType, HbA1c, estimatedAvgGlucose \
                 FROM diabetictestresults WHERE labreport_id = ?1",
            )
            .bind(labreport_id)
            .fetch_optional(self.pool())
            .await?
            .map(TestResult::Diabetic),
            TestCategory::Genetic => sqlx::query_as::<_, GeneticTestResult>(
                "SELECT resultId, gender, dob, age, bloodType, gene, DNADescription, ProteinDescription \
                 FROM genetictestresults WHERE labreport_id = ?1",
            )
            .bind(labreport_id)
            .fetch_optional(self.pool())
            .await?
            .map(TestResult::Genetic),
        };
        Ok(result)
    }

    /// Records a result and marks its report `Available`, atomically.
    ///
    /// # Errors
    /// `StorageError::NotFound` when the report does not exist; nothing is written.
    pub async fn submit_test_result(&self, result: &NewTestResult) -> Result<PrefixedId> {
        let mut tx = self.pool().begin().await?;
        let subject = &result.subject;

        let result_id = match &result.details {
            TestResultDetails::Blood { hemoglobin, platelets_count } => {
                let id = Sequence::BLOOD_RESULTS.next_id(&mut *tx).await?;
                sqlx::query(
                    "INSERT INTO bloodtestresults \
                     (resultId, labreport_id, gender, dob, age, bloodType, hemoglobin, plateletsCount) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .bind(id.to_string())
                .bind(&result.labreport_id)
                .bind(&subject.gender)
                .bind(&subject.dob)
                .bind(subject.age)
                .bind(&subject.blood_type)
                .bind(hemoglobin)
                .bind(platelets_count)
                .execute(&mut *tx)
                .await?;
                id
            }
            TestResultDetails::Diabetic { hba1c, estimated_avg_glucose } => {
                let id = Sequence::DIABETIC_RESULTS.next_id(&mut *tx).await?;
                sqlx::query(
                    "INSERT INTO diabetictestresults \
                     (resultId, labreport_id, gender, dob, age, bloodType, HbA1c, estimatedAvgGlucose) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .bind(id.to_string())
                .bind(&result.labreport_id)
                .bind(&subject.gender)
                .bind(&subject.dob)
                .bind(subject.age)
                .bind(&subject.blood_type)
                .bind(hba1c)
                .bind(estimated_avg_glucose)
                .execute(&mut *tx)
                .await?;
                id
            }
            TestResultDetails::Genetic { gene, dna_description, protein_description } => {
                let id = Sequence::GENETIC_RESULTS.next_id(&mut *tx).await?;
                sqlx::query(
                    "INSERT INTO genetictestresults \
                     (resultId, labreport_id, gender, dob, age, bloodType, gene, DNADescription, ProteinDescription) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .bind(id.to_string())
                .bind(&result.labreport_id)
                .bind(&subject.gender)
                .bind(&subject.dob)
                .bind(subject.age)
                .bind(&subject.blood_type)
                .bind(gene)
                .bind(dna_description)
                .bind(protein_description)
                .execute(&mut *tx)
                .await?;
                id
            }
        };

        let updated = sqlx::query("UPDATE labreports SET result = ?1 WHERE labreport_id = ?2")
            .bind(ReportStatus::Available)
            .bind(&result.labreport_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if updated == 0 {
            warn!("Discarding {} result for unknown report {}", result.details.category(), result.labreport_id);
            tx.rollback().await?;
            return Err(StorageError::NotFound(format!("lab report {}", result.labreport_id)));
        }

        tx.commit().await?;
        info!("Recorded result {} for report {}", result_id, result.labreport_id);
        Ok(result_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{insert_patient, test_database};
    use models::medical::ResultSubject;

    fn lab_test(test_type: &str) -> NewLabTest {
        NewLabTest {
            patient_id: "P1".into(),
            date: "2024-05-01".into(),
            time: "08:30:00".into(),
            test_type: test_type.into(),
        }
    }

    fn subject() -> ResultSubject {
        ResultSubject {
            gender: "Female".into(),
            dob: "1990-04-01".into(),
            age: 34,
            blood_type: "A+".into(),
        }
    }

    async fn count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_book_test_with_exactly_one_pending_report() {
        let (db, _dir) = test_database().await;
        let booked = db.book_lab_test(&lab_test("Blood Test"), "L101").await.unwrap();
        assert_eq!(booked.labtest_id, "L1");
        assert_eq!(booked.labreport_id, "LR1");
        assert_eq!(count(&db, "labtests").await, 1);
        assert_eq!(count(&db, "labreports").await, 1);

        let result: String = sqlx::query_scalar("SELECT result FROM labreports WHERE labtest_id = 'L1'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(result, "N/A");

        let pending = db.pending_lab_tests("P1").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].test_type, "Blood Test");
        let staff = db.staff_pending_reports("L101").await.unwrap();
        assert_eq!(staff[0].labreport_id, "LR1");
        assert!(db.staff_pending_reports("L202").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_move_report_to_ready_once_result_is_recorded() {
        let (db, _dir) = test_database().await;
        insert_patient(&db, 1, "P1", "Pat", "pat@example.com", "pw").await;
        let booked = db.book_lab_test(&lab_test("Diabetic Test"), "L101").await.unwrap();

        let before = db.patient_lab_reports("P1").await.unwrap();
        assert!(before.ready_reports.is_empty());
        assert_eq!(before.in_progress_reports.len(), 1);

        let result_id = db
            .submit_test_result(&NewTestResult {
                labreport_id: booked.labreport_id.clone(),
                subject: subject(),
                details: TestResultDetails::Diabetic { hba1c: 5.6, estimated_avg_glucose: 114.0 },
            })
            .await
            .unwrap();
        assert_eq!(result_id.to_string(), "D1");

        let after = db.patient_lab_reports("P1").await.unwrap();
        assert_eq!(after.ready_reports.len(), 1);
        assert!(after.in_progress_reports.is_empty());
        assert_eq!(after.ready_reports[0].labreport_id, "LR1");
        assert_eq!(after.ready_reports[0].result_date, "2024-05-01");
        assert!(db.pending_lab_tests("P1").await.unwrap().is_empty());

        match db.test_result("LR1", TestCategory::Diabetic).await.unwrap() {
            Some(TestResult::Diabetic(row)) => {
                assert_eq!(row.result_id, "D1");
                assert_eq!(row.hba1c, Some(5.6));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(db.test_result("LR1", TestCategory::Blood).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_store_genetic_results() {
        let (db, _dir) = test_database().await;
        let booked = db.book_lab_test(&lab_test("Genetic Test"), "L101").await.unwrap();
        db.submit_test_result(&NewTestResult {
            labreport_id: booked.labreport_id.clone(),
            subject: subject(),
            details: TestResultDetails::Genetic {
                gene: "BRCA1".into(),
                dna_description: "c.68_69delAG".into(),
                protein_description: "p.Glu23fs".into(),
            },
        })
        .await
        .unwrap();

        assert_eq!(count(&db, "genetictestresults").await, 1);
        match db.test_result(&booked.labreport_id, TestCategory::Genetic).await.unwrap() {
            Some(TestResult::Genetic(row)) => assert_eq!(row.gene.as_deref(), Some("BRCA1")),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_roll_back_result_for_unknown_report() {
        let (db, _dir) = test_database().await;
        let err = db
            .submit_test_result(&NewTestResult {
                labreport_id: "LR404".into(),
                subject: subject(),
                details: TestResultDetails::Blood { hemoglobin: 13.5, platelets_count: 250000.0 },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert_eq!(count(&db, "bloodtestresults").await, 0);
    }

    #[tokio::test]
    async fn should_reschedule_and_delete_test_with_its_report() {
        let (db, _dir) = test_database().await;
        let booked = db.book_lab_test(&lab_test("Blood Test"), "L101").await.unwrap();

        assert_eq!(db.reschedule_lab_test(&booked.labtest_id, "2024-06-01", "09:00:00").await.unwrap(), 1);
        assert_eq!(db.pending_lab_tests("P1").await.unwrap()[0].test_date, "2024-06-01");
        assert_eq!(db.reschedule_lab_test("L99", "2024-06-01", "09:00:00").await.unwrap(), 0);

        assert_eq!(db.delete_lab_test(&booked.labtest_id).await.unwrap(), 1);
        assert_eq!(count(&db, "labtests").await, 0);
        assert_eq!(count(&db, "labreports").await, 0);
        assert_eq!(db.delete_lab_test(&booked.labtest_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_drop_recorded_results_with_a_deleted_test() {
        let (db, _dir) = test_database().await;
        let blood = db.book_lab_test(&lab_test("Blood Test"), "L101").await.unwrap();
        let other = db.book_lab_test(&lab_test("Blood Test"), "L101").await.unwrap();
        for booked in [&blood, &other] {
            db.submit_test_result(&NewTestResult {
                labreport_id: booked.labreport_id.clone(),
                subject: subject(),
                details: TestResultDetails::Blood { hemoglobin: 13.5, platelets_count: 250000.0 },
            })
            .await
            .unwrap();
        }

        assert_eq!(db.delete_lab_test(&blood.labtest_id).await.unwrap(), 1);
        assert_eq!(count(&db, "bloodtestresults").await, 1);
        assert!(db.test_result(&blood.labreport_id, TestCategory::Blood).await.unwrap().is_none());
        assert!(db.test_result(&other.labreport_id, TestCategory::Blood).await.unwrap().is_some());
    }
}
