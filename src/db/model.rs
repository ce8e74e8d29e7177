//! Row models for insert and read paths.

use diesel::prelude::*;

use super::schema::{referrals, self_assessments};

/// Insertable self-assessment row; the id is assigned by the store.
#[derive(Insertable, Debug)]
#[diesel(table_name = self_assessments)]
pub struct NewSelfAssessmentRow {
    pub student_id: i32,
    pub assessed_on: String,
    pub anxiety_score: i32,
    pub depression_score: i32,
    pub stress_score: i32,
}

/// Insertable referral row; the id is assigned by the store.
#[derive(Insertable, Debug)]
#[diesel(table_name = referrals)]
pub struct NewReferralRow {
    pub assessment_id: i32,
    pub counselor_id: i32,
    pub referred_on: String,
    pub status: String,
}

/// Self-assessment row as read back from the store (column order matches
/// the table definition).
#[derive(Queryable, Debug)]
pub struct SelfAssessmentRow {
    pub id: i32,
    pub student_id: i32,
    pub assessed_on: String,
    pub anxiety_score: i32,
    pub depression_score: i32,
    pub stress_score: i32,
}

/// Referral row as read back from the store.
#[derive(Queryable, Debug)]
pub struct ReferralRow {
    pub id: i32,
    pub assessment_id: i32,
    pub counselor_id: i32,
    pub referred_on: String,
    pub status: String,
}
