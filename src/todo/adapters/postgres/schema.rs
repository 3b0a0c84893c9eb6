//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records.
    todos (id) {
        /// Todo identifier.
        id -> Uuid,
        /// Trimmed title.
        #[max_length = 200]
        title -> Varchar,
        /// Free-text description, possibly empty.
        description -> Text,
        /// Canonical lowercase status.
        #[max_length = 20]
        status -> Varchar,
        /// Canonical lowercase priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp, set only while completed.
        completed_at -> Nullable<Timestamptz>,
    }
}
