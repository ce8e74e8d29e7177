use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Storage-layer errors.
///
/// The variants mirror the distinct failure classes the intake transaction
/// must report: connectivity, store-enforced constraints, logical write
/// failures (the store accepted the statement but wrote nothing), and
/// secondary rollback failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The statement executed without a store error but did not write
    /// exactly one row, or produced no generated key.
    #[error("write failed: {0}")]
    WriteFailed(&'static str),

    /// Rollback itself failed; carries the original cause alongside the
    /// secondary failure so neither is masked.
    #[error("rollback failed: {rollback} (while undoing: {cause})")]
    Rollback { cause: String, rollback: String },

    #[error("database error: {0}")]
    Database(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation,
                info,
            ) => StoreError::Constraint(info.message().to_string()),
            DieselError::RollbackErrorOnCommit {
                rollback_error,
                commit_error,
            } => StoreError::Rollback {
                cause: commit_error.to_string(),
                rollback: rollback_error.to_string(),
            },
            DieselError::BrokenTransactionManager => {
                StoreError::Connection("transaction manager is broken".to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Intake input validation errors.
///
/// The coordinator re-checks its inputs even though the interactive prompts
/// already enforce them, since it is callable without the prompt loop.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntakeError {
    #[error("{field} score {value} is outside 0-10")]
    ScoreOutOfRange { field: &'static str, value: i32 },

    #[error("{field} must be a positive id, got {value}")]
    NonPositiveId { field: &'static str, value: i32 },

    #[error("assessment date must not be empty")]
    EmptyDate,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    #[test]
    fn foreign_key_violation_maps_to_constraint() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("FOREIGN KEY constraint failed".to_string()),
        );
        match StoreError::from(err) {
            StoreError::Constraint(msg) => {
                assert!(msg.contains("FOREIGN KEY"), "unexpected message: {msg}");
            }
            other => panic!("expected Constraint, got {other:?}"),
        }
    }

    #[test]
    fn check_violation_maps_to_constraint() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("CHECK constraint failed: anxiety_score".to_string()),
        );
        assert!(matches!(StoreError::from(err), StoreError::Constraint(_)));
    }

    #[test]
    fn rollback_on_commit_keeps_both_causes() {
        let err = DieselError::RollbackErrorOnCommit {
            rollback_error: Box::new(DieselError::AlreadyInTransaction),
            commit_error: Box::new(DieselError::NotFound),
        };
        match StoreError::from(err) {
            StoreError::Rollback { cause, rollback } => {
                assert!(!cause.is_empty());
                assert!(!rollback.is_empty());
                assert_ne!(cause, rollback);
            }
            other => panic!("expected Rollback, got {other:?}"),
        }
    }

    #[test]
    fn broken_transaction_manager_maps_to_connection() {
        assert!(matches!(
            StoreError::from(DieselError::BrokenTransactionManager),
            StoreError::Connection(_)
        ));
    }

    #[test]
    fn other_diesel_errors_map_to_database() {
        assert!(matches!(
            StoreError::from(DieselError::NotFound),
            StoreError::Database(_)
        ));
    }

    #[test]
    fn rollback_display_names_both_failures() {
        let err = StoreError::Rollback {
            cause: "FOREIGN KEY constraint failed".to_string(),
            rollback: "database is locked".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("FOREIGN KEY constraint failed"));
        assert!(msg.contains("database is locked"));
    }
}
