pub(crate) mod category_repository;
pub(crate) mod post_repository;

/// `SQLITE_CONSTRAINT_FOREIGNKEY`.
const CONSTRAINT_FOREIGNKEY: &str = "787";
/// `SQLITE_CONSTRAINT_TRIGGER`, reported when `ON DELETE RESTRICT` blocks a delete.
const CONSTRAINT_TRIGGER: &str = "1811";

/// Foreign key failures as SQLite reports them. A RESTRICT action surfaces as
/// the trigger constraint code, which sqlx does not classify as a foreign key
/// violation.
pub(crate) fn is_foreign_key_error(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db_err) = err else {
        return false;
    };

    db_err.is_foreign_key_violation()
        || matches!(
            db_err.code().as_deref(),
            Some(CONSTRAINT_FOREIGNKEY | CONSTRAINT_TRIGGER)
        )
}
