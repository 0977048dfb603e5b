//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Geographic states. `name` and `abbreviation` carry unique indexes.
    states (id) {
        id -> Int8,
        name -> Varchar,
        abbreviation -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Cities, each optionally referencing its owning state. `name` carries
    /// a unique index that application validation deliberately ignores.
    cities (id) {
        id -> Int8,
        name -> Varchar,
        state_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(cities -> states (state_id));
diesel::allow_tables_to_appear_in_same_query!(cities, states);
