//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Hunters and their progression state.
    hunters (id) {
        id -> Uuid,
        name -> Text,
        title -> Nullable<Text>,
        level -> Int4,
        exp -> Int8,
        streak -> Int4,
        last_checkin -> Nullable<Timestamptz>,
        /// Optimistic concurrency counter, bumped on every progress write.
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only workout log.
    workouts (id) {
        id -> Uuid,
        user_id -> Uuid,
        workout_type -> Text,
        minutes -> Int4,
        difficulty -> Text,
        exp_awarded -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Daily quests; unique on `(user_id, quest_date)`.
    quests (id) {
        id -> Uuid,
        user_id -> Uuid,
        quest_date -> Date,
        title -> Text,
        description -> Text,
        exp_reward -> Int8,
        completed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Check-in audit records.
    checkins (id) {
        id -> Uuid,
        user_id -> Uuid,
        checkin_date -> Date,
        streak_after -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(hunters, workouts, quests, checkins);
