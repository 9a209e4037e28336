//! Diesel table definitions for the catalogue schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Teacher records.
    teachers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed, non-empty display name.
        name -> Text,
        /// Optional biography.
        bio -> Nullable<Text>,
        /// Skill tags in input order.
        expertise -> Array<Text>,
        /// Optional portrait URL.
        image -> Nullable<Text>,
        /// Rating clamped to 0..=5.
        rating -> Float8,
        /// Non-negative student count.
        total_students -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course records; `teacher_id` references `teachers` with
    /// `ON DELETE RESTRICT`.
    courses (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        image -> Text,
        price -> Float8,
        rating -> Float8,
        teacher_id -> Uuid,
        lessons -> Array<Text>,
        is_top_course -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(courses -> teachers (teacher_id));
diesel::allow_tables_to_appear_in_same_query!(courses, teachers);
