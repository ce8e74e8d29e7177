//! Roster views rendered as tables, plus the status update command.

use tabled::{Table, Tabled};

use crate::cli::output;
use crate::db::DbPool;
use crate::directory::{self, AppointmentStatus};
use crate::error::Result;

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "StudentID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Major")]
    major: String,
    #[tabled(rename = "Year")]
    year: String,
}

#[derive(Tabled)]
struct CounselorRow {
    #[tabled(rename = "CounselorID")]
    id: i32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Credentials")]
    credentials: String,
    #[tabled(rename = "Specializations")]
    specializations: String,
    #[tabled(rename = "Availability")]
    availability: String,
}

#[derive(Tabled)]
struct AppointmentRow {
    #[tabled(rename = "ApptID")]
    id: i32,
    #[tabled(rename = "Scheduled")]
    scheduled_at: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "StudentID")]
    student_id: i32,
    #[tabled(rename = "Student")]
    student_name: String,
    #[tabled(rename = "CounselorID")]
    counselor_id: i32,
    #[tabled(rename = "Counselor")]
    counselor_name: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {line}");
    }
}

/// Print the student roster.
pub fn students(pool: &DbPool) -> Result<()> {
    let listings = directory::list_students(pool)?;
    output::section("Students");
    if listings.is_empty() {
        output::note("No students on file.");
        return Ok(());
    }
    print_table(
        listings
            .into_iter()
            .map(|s| StudentRow {
                id: s.student_id,
                name: s.name,
                email: s.contact_info,
                major: s.major,
                year: s.year,
            })
            .collect(),
    );
    Ok(())
}

/// Print the counselor roster.
pub fn counselors(pool: &DbPool) -> Result<()> {
    let listings = directory::list_counselors(pool)?;
    output::section("Counselors");
    if listings.is_empty() {
        output::note("No counselors on file.");
        return Ok(());
    }
    print_table(
        listings
            .into_iter()
            .map(|c| CounselorRow {
                id: c.counselor_id,
                name: c.name,
                email: c.contact_info,
                credentials: c.credentials,
                specializations: c.specializations,
                availability: c.availability,
            })
            .collect(),
    );
    Ok(())
}

/// Print all appointments with resolved names.
pub fn appointments(pool: &DbPool) -> Result<()> {
    let listings = directory::list_appointments(pool)?;
    output::section("Appointments");
    if listings.is_empty() {
        output::note("No appointments on file.");
        return Ok(());
    }
    print_table(
        listings
            .into_iter()
            .map(|a| AppointmentRow {
                id: a.appointment_id,
                scheduled_at: a.scheduled_at,
                status: a.status,
                mode: a.mode,
                student_id: a.student_id,
                student_name: a.student_name,
                counselor_id: a.counselor_id,
                counselor_name: a.counselor_name,
            })
            .collect(),
    );
    Ok(())
}

/// Apply a status change to one appointment and report the outcome.
pub fn set_status(pool: &DbPool, appointment_id: i32, status: AppointmentStatus) -> Result<()> {
    if directory::update_appointment_status(pool, appointment_id, status)? {
        output::ok(&format!("Appointment {appointment_id} set to {status}"));
    } else {
        output::warn(&format!("No appointment found with id {appointment_id}"));
    }
    Ok(())
}
