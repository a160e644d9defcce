//! Database error classification.

/// Name of the unique constraint guarding `short_links.alias`.
pub const ALIAS_UNIQUE_CONSTRAINT: &str = "short_links_alias_key";

/// Returns true if `e` is a unique violation on the alias column.
///
/// Unique violations on other constraints are not alias collisions and must be
/// surfaced as backend failures.
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ALIAS_UNIQUE_CONSTRAINT))
}
