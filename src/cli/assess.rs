//! Assessment intake command.
//!
//! Fully flag-driven when every field is supplied; otherwise the missing
//! fields are collected interactively with the same validation the intake
//! coordinator enforces.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::{output, AssessArgs};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::Result;
use crate::intake::{IntakeRecorder, IntakeRequest, SCORE_RANGE};

/// Run the `assess` subcommand.
pub fn run(pool: &DbPool, config: &Config, args: &AssessArgs) -> Result<()> {
    let theme = ColorfulTheme::default();
    let request = resolve_request(args, &theme)?;
    record(pool, config, &request)
}

/// Execute the intake transaction and print the success outcome.
///
/// Failure reporting is left to the caller so the interactive menu can keep
/// running after a rolled-back attempt.
pub(crate) fn record(pool: &DbPool, config: &Config, request: &IntakeRequest) -> Result<()> {
    let recorder = IntakeRecorder::new(pool.clone(), config.database.busy_timeout_ms);
    let assessment_id = recorder.record_assessment_and_referral(request)?;

    output::ok("Transaction committed: self-assessment and referral created");
    output::key_value("AssessmentID", assessment_id);
    Ok(())
}

/// Fill in any fields not provided as flags by prompting for them.
fn resolve_request(args: &AssessArgs, theme: &ColorfulTheme) -> Result<IntakeRequest> {
    let student_id = match args.student {
        Some(id) => id,
        None => prompt_id(theme, "StudentID")?,
    };
    let counselor_id = match args.counselor {
        Some(id) => id,
        None => prompt_id(theme, "CounselorID")?,
    };
    let date = match args.date {
        Some(date) => date,
        None => prompt_date(theme)?,
    };
    let anxiety = match args.anxiety {
        Some(score) => score,
        None => prompt_score(theme, "Anxiety score (0-10)")?,
    };
    let depression = match args.depression {
        Some(score) => score,
        None => prompt_score(theme, "Depression score (0-10)")?,
    };
    let stress = match args.stress {
        Some(score) => score,
        None => prompt_score(theme, "Stress score (0-10)")?,
    };

    Ok(IntakeRequest {
        student_id,
        counselor_id,
        assessed_on: date.to_string(),
        anxiety,
        depression,
        stress,
    })
}

/// Prompt for the full request; used by the interactive menu.
pub(crate) fn prompt_request(theme: &ColorfulTheme) -> Result<IntakeRequest> {
    Ok(IntakeRequest {
        student_id: prompt_id(theme, "StudentID")?,
        counselor_id: prompt_id(theme, "CounselorID")?,
        assessed_on: prompt_date(theme)?.to_string(),
        anxiety: prompt_score(theme, "Anxiety score (0-10)")?,
        depression: prompt_score(theme, "Depression score (0-10)")?,
        stress: prompt_score(theme, "Stress score (0-10)")?,
    })
}

fn prompt_id(theme: &ColorfulTheme, label: &str) -> Result<i32> {
    let id = Input::with_theme(theme)
        .with_prompt(label)
        .validate_with(|value: &i32| {
            if *value > 0 {
                Ok(())
            } else {
                Err("id must be positive")
            }
        })
        .interact_text()?;
    Ok(id)
}

fn prompt_date(theme: &ColorfulTheme) -> Result<NaiveDate> {
    let date: NaiveDate = Input::with_theme(theme)
        .with_prompt("Assessment date (YYYY-MM-DD)")
        .interact_text()?;
    Ok(date)
}

fn prompt_score(theme: &ColorfulTheme, label: &str) -> Result<i32> {
    let score = Input::with_theme(theme)
        .with_prompt(label)
        .validate_with(|value: &i32| {
            if SCORE_RANGE.contains(value) {
                Ok(())
            } else {
                Err("score must be between 0 and 10")
            }
        })
        .interact_text()?;
    Ok(score)
}
