//! Transactional assessment intake.
//!
//! Records a self-assessment and its dependent referral as one unit of work:
//! the referral's foreign key is the assessment id generated by the first
//! insert, so either both rows become durable or neither does. This is the
//! only multi-statement write path in the application.

use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, warn};

use crate::db::model::{NewReferralRow, NewSelfAssessmentRow};
use crate::db::schema::{referrals, self_assessments};
use crate::db::{self, DbPool};
use crate::error::{IntakeError, Result, StoreError};

/// Status assigned to every referral created by the intake workflow.
pub const REFERRAL_STATUS_PENDING: &str = "Pending";

/// Inclusive score bounds for the three assessment scales.
pub const SCORE_RANGE: std::ops::RangeInclusive<i32> = 0..=10;

/// Validated input for one intake invocation.
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub student_id: i32,
    pub counselor_id: i32,
    /// Calendar date string, stored verbatim on both rows.
    pub assessed_on: String,
    pub anxiety: i32,
    pub depression: i32,
    pub stress: i32,
}

impl IntakeRequest {
    /// Check ids, date, and score ranges.
    ///
    /// The interactive prompts enforce the same rules, but this operation is
    /// callable without them, so it re-checks before touching the store.
    pub fn validate(&self) -> std::result::Result<(), IntakeError> {
        if self.student_id <= 0 {
            return Err(IntakeError::NonPositiveId {
                field: "student_id",
                value: self.student_id,
            });
        }
        if self.counselor_id <= 0 {
            return Err(IntakeError::NonPositiveId {
                field: "counselor_id",
                value: self.counselor_id,
            });
        }
        if self.assessed_on.trim().is_empty() {
            return Err(IntakeError::EmptyDate);
        }
        for (field, value) in [
            ("anxiety", self.anxiety),
            ("depression", self.depression),
            ("stress", self.stress),
        ] {
            if !SCORE_RANGE.contains(&value) {
                return Err(IntakeError::ScoreOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Coordinator for the two-insert intake transaction.
pub struct IntakeRecorder {
    /// Database connection pool.
    pool: DbPool,
    busy_timeout_ms: u32,
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

impl IntakeRecorder {
    /// Create a new intake recorder with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool, busy_timeout_ms: u32) -> Self {
        Self {
            pool,
            busy_timeout_ms,
        }
    }

    /// Record a self-assessment and its referral atomically.
    ///
    /// Returns the generated assessment id on success. On any failure the
    /// transaction is rolled back and no row of either kind persists; if the
    /// rollback itself fails, the returned error carries both the original
    /// cause and the rollback failure. The pooled connection is released on
    /// every path.
    ///
    /// # Errors
    /// - [`IntakeError`] when the input fails validation (no store access)
    /// - [`StoreError::Connection`] when no connection can be acquired
    /// - [`StoreError::Constraint`] when the store rejects a write
    /// - [`StoreError::WriteFailed`] when an insert silently writes no row
    ///   or yields no generated key
    /// - [`StoreError::Rollback`] when undoing the transaction fails
    pub fn record_assessment_and_referral(&self, request: &IntakeRequest) -> Result<i32> {
        request.validate()?;

        let mut pooled = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let conn = &mut *pooled;
        db::configure_connection(conn, self.busy_timeout_ms)?;

        AnsiTransactionManager::begin_transaction(conn).map_err(StoreError::from)?;

        match insert_pair(conn, request) {
            Ok(assessment_id) => {
                AnsiTransactionManager::commit_transaction(conn).map_err(StoreError::from)?;
                debug!(
                    assessment_id,
                    student_id = request.student_id,
                    counselor_id = request.counselor_id,
                    "Recorded self-assessment and referral"
                );
                Ok(assessment_id)
            }
            Err(cause) => {
                warn!(error = %cause, "Intake transaction failed, rolling back");
                match AnsiTransactionManager::rollback_transaction(conn) {
                    Ok(()) => Err(cause.into()),
                    Err(rollback_err) => Err(StoreError::Rollback {
                        cause: cause.to_string(),
                        rollback: rollback_err.to_string(),
                    }
                    .into()),
                }
            }
        }
    }
}

/// Execute both inserts inside the already-open transaction.
fn insert_pair(
    conn: &mut SqliteConnection,
    request: &IntakeRequest,
) -> std::result::Result<i32, StoreError> {
    let assessment = NewSelfAssessmentRow {
        student_id: request.student_id,
        assessed_on: request.assessed_on.clone(),
        anxiety_score: request.anxiety,
        depression_score: request.depression,
        stress_score: request.stress,
    };

    let rows = diesel::insert_into(self_assessments::table)
        .values(&assessment)
        .execute(conn)
        .map_err(StoreError::from)?;
    expect_one_row(rows, "self-assessment insert affected no row")?;

    let assessment_id = last_insert_id(conn)?;

    let referral = NewReferralRow {
        assessment_id,
        counselor_id: request.counselor_id,
        referred_on: request.assessed_on.clone(),
        status: REFERRAL_STATUS_PENDING.to_string(),
    };

    let rows = diesel::insert_into(referrals::table)
        .values(&referral)
        .execute(conn)
        .map_err(StoreError::from)?;
    expect_one_row(rows, "referral insert affected no row")?;

    Ok(assessment_id)
}

/// Guard against a statement that executed but wrote nothing.
fn expect_one_row(rows: usize, context: &'static str) -> std::result::Result<(), StoreError> {
    if rows == 1 {
        Ok(())
    } else {
        Err(StoreError::WriteFailed(context))
    }
}

/// Fetch the id generated by the preceding insert.
///
/// SQLite reports 0 when the connection has not inserted anything, which the
/// caller must treat as a missing key rather than a valid id.
fn last_insert_id(conn: &mut SqliteConnection) -> std::result::Result<i32, StoreError> {
    let id = diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
        .map_err(StoreError::from)?;
    if id <= 0 {
        return Err(StoreError::WriteFailed("no generated assessment id"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::Connection;

    fn request() -> IntakeRequest {
        IntakeRequest {
            student_id: 1,
            counselor_id: 2,
            assessed_on: "2024-03-01".into(),
            anxiety: 3,
            depression: 4,
            stress: 2,
        }
    }

    #[test]
    fn validate_accepts_boundary_scores() {
        let mut req = request();
        req.anxiety = 0;
        req.stress = 10;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_rejects_score_above_range() {
        let mut req = request();
        req.depression = 11;
        assert_eq!(
            req.validate(),
            Err(IntakeError::ScoreOutOfRange {
                field: "depression",
                value: 11
            })
        );
    }

    #[test]
    fn validate_rejects_negative_score() {
        let mut req = request();
        req.anxiety = -1;
        assert_eq!(
            req.validate(),
            Err(IntakeError::ScoreOutOfRange {
                field: "anxiety",
                value: -1
            })
        );
    }

    #[test]
    fn validate_rejects_non_positive_ids() {
        let mut req = request();
        req.student_id = 0;
        assert!(matches!(
            req.validate(),
            Err(IntakeError::NonPositiveId {
                field: "student_id",
                ..
            })
        ));

        let mut req = request();
        req.counselor_id = -5;
        assert!(matches!(
            req.validate(),
            Err(IntakeError::NonPositiveId {
                field: "counselor_id",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_blank_date() {
        let mut req = request();
        req.assessed_on = "   ".into();
        assert_eq!(req.validate(), Err(IntakeError::EmptyDate));
    }

    #[test]
    fn expect_one_row_rejects_zero_rows() {
        assert!(matches!(
            expect_one_row(0, "nothing written"),
            Err(StoreError::WriteFailed("nothing written"))
        ));
        assert!(expect_one_row(1, "ok").is_ok());
    }

    #[test]
    fn last_insert_id_without_insert_is_a_write_failure() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        assert!(matches!(
            last_insert_id(&mut conn),
            Err(StoreError::WriteFailed(_))
        ));
    }
}
