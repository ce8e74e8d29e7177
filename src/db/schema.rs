//! Diesel table definitions for the wellness schema.

diesel::table! {
    persons (id) {
        id -> Integer,
        name -> Text,
        contact_info -> Text,
    }
}

diesel::table! {
    students (id) {
        id -> Integer,
        person_id -> Integer,
        major -> Text,
        year -> Text,
    }
}

diesel::table! {
    counselors (id) {
        id -> Integer,
        person_id -> Integer,
        credentials -> Text,
        specializations -> Text,
        availability -> Text,
    }
}

diesel::table! {
    appointments (id) {
        id -> Integer,
        student_id -> Integer,
        counselor_id -> Integer,
        scheduled_at -> Text,
        status -> Text,
        mode -> Text,
    }
}

diesel::table! {
    self_assessments (id) {
        id -> Integer,
        student_id -> Integer,
        assessed_on -> Text,
        anxiety_score -> Integer,
        depression_score -> Integer,
        stress_score -> Integer,
    }
}

diesel::table! {
    referrals (id) {
        id -> Integer,
        assessment_id -> Integer,
        counselor_id -> Integer,
        referred_on -> Text,
        status -> Text,
    }
}

diesel::joinable!(students -> persons (person_id));
diesel::joinable!(counselors -> persons (person_id));
diesel::joinable!(appointments -> students (student_id));
diesel::joinable!(appointments -> counselors (counselor_id));
diesel::joinable!(self_assessments -> students (student_id));
diesel::joinable!(referrals -> self_assessments (assessment_id));
diesel::joinable!(referrals -> counselors (counselor_id));

diesel::allow_tables_to_appear_in_same_query!(
    persons,
    students,
    counselors,
    appointments,
    self_assessments,
    referrals,
);
