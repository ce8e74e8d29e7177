//! Interactive menu loop over all console operations.

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::{assess, output, roster};
use crate::config::Config;
use crate::db::DbPool;
use crate::directory::AppointmentStatus;
use crate::error::Result;

const MENU_ITEMS: &[&str] = &[
    "View students",
    "View counselors",
    "View appointments",
    "Update appointment status",
    "New self-assessment + referral",
    "Exit",
];

const STATUS_ITEMS: &[AppointmentStatus] = &[
    AppointmentStatus::Scheduled,
    AppointmentStatus::Completed,
    AppointmentStatus::Cancelled,
    AppointmentStatus::NoShow,
];

/// Run the menu until the operator exits.
///
/// A failed action is reported and the loop continues; only prompt I/O
/// errors abort the session.
pub fn run(pool: &DbPool, config: &Config) -> Result<()> {
    let theme = ColorfulTheme::default();
    output::section("Wellness Center Console");

    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Main menu")
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;

        let outcome = match choice {
            0 => roster::students(pool),
            1 => roster::counselors(pool),
            2 => roster::appointments(pool),
            3 => update_status(pool, &theme),
            4 => new_assessment(pool, config, &theme),
            _ => {
                output::note("Goodbye!");
                return Ok(());
            }
        };

        if let Err(err) = outcome {
            output::error(&err.to_string());
        }
    }
}

fn update_status(pool: &DbPool, theme: &ColorfulTheme) -> Result<()> {
    let appointment_id: i32 = Input::with_theme(theme)
        .with_prompt("AppointmentID to update")
        .interact_text()?;

    let selected = Select::with_theme(theme)
        .with_prompt("New status")
        .items(STATUS_ITEMS)
        .default(0)
        .interact()?;

    roster::set_status(pool, appointment_id, STATUS_ITEMS[selected])
}

fn new_assessment(pool: &DbPool, config: &Config, theme: &ColorfulTheme) -> Result<()> {
    let request = assess::prompt_request(theme)?;
    assess::record(pool, config, &request)
}
