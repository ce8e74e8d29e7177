//! Read-only roster views and the appointment status update.
//!
//! The listing queries join across the person tables with raw SQL and
//! [`QueryableByName`] rows; the status change is a single-row update.

use diesel::prelude::*;
use tracing::debug;

use crate::db::schema::appointments;
use crate::db::DbPool;
use crate::error::{Result, StoreError};

/// One row of the student roster.
#[derive(QueryableByName, Debug)]
pub struct StudentListing {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub student_id: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub name: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub contact_info: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub major: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub year: String,
}

/// One row of the counselor roster.
#[derive(QueryableByName, Debug)]
pub struct CounselorListing {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub counselor_id: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub name: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub contact_info: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub credentials: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub specializations: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub availability: String,
}

/// One row of the appointment overview, with both names resolved.
#[derive(QueryableByName, Debug)]
pub struct AppointmentListing {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub appointment_id: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub scheduled_at: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub status: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub mode: String,
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub student_id: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub student_name: String,
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub counselor_id: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub counselor_name: String,
}

/// Appointment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Canonical string stored in the status column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "NoShow",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List all students with their person details, ordered by id.
pub fn list_students(pool: &DbPool) -> Result<Vec<StudentListing>> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let rows = diesel::sql_query(
        "SELECT s.id AS student_id, p.name AS name, p.contact_info AS contact_info, \
         s.major AS major, s.year AS year \
         FROM students s JOIN persons p ON p.id = s.person_id \
         ORDER BY s.id",
    )
    .load(&mut conn)
    .map_err(StoreError::from)?;

    Ok(rows)
}

/// List all counselors with their person details, ordered by id.
pub fn list_counselors(pool: &DbPool) -> Result<Vec<CounselorListing>> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let rows = diesel::sql_query(
        "SELECT c.id AS counselor_id, p.name AS name, p.contact_info AS contact_info, \
         c.credentials AS credentials, c.specializations AS specializations, \
         c.availability AS availability \
         FROM counselors c JOIN persons p ON p.id = c.person_id \
         ORDER BY c.id",
    )
    .load(&mut conn)
    .map_err(StoreError::from)?;

    Ok(rows)
}

/// List all appointments with student and counselor names, ordered by id.
pub fn list_appointments(pool: &DbPool) -> Result<Vec<AppointmentListing>> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let rows = diesel::sql_query(
        "SELECT a.id AS appointment_id, a.scheduled_at AS scheduled_at, \
         a.status AS status, a.mode AS mode, \
         s.id AS student_id, sp.name AS student_name, \
         c.id AS counselor_id, cp.name AS counselor_name \
         FROM appointments a \
         JOIN students s ON s.id = a.student_id \
         JOIN persons sp ON sp.id = s.person_id \
         JOIN counselors c ON c.id = a.counselor_id \
         JOIN persons cp ON cp.id = c.person_id \
         ORDER BY a.id",
    )
    .load(&mut conn)
    .map_err(StoreError::from)?;

    Ok(rows)
}

/// Set the status of a single appointment.
///
/// Returns `true` when exactly one row was updated, `false` when no
/// appointment has the given id.
pub fn update_appointment_status(
    pool: &DbPool,
    appointment_id: i32,
    status: AppointmentStatus,
) -> Result<bool> {
    let mut conn = pool
        .get()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let rows = diesel::update(appointments::table.filter(appointments::id.eq(appointment_id)))
        .set(appointments::status.eq(status.as_str()))
        .execute(&mut conn)
        .map_err(StoreError::from)?;

    debug!(appointment_id, status = %status, rows, "Updated appointment status");
    Ok(rows == 1)
}
