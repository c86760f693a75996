//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::RowNotFound => {
            ApplicationError::NotFound("Database record not found".to_string())
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Internal(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

/// Map a stored value that no longer parses to an application-layer error
pub fn map_corrupt_row(column: &str, e: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::Internal(format!("Corrupt lecture row ({column}): {e}"))
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            ApplicationError::NotFound(_)
        ));
    }

    #[test]
    fn other_errors_map_to_internal() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            ApplicationError::Internal(_)
        ));
    }

    #[test]
    fn corrupt_rows_name_the_column() {
        let err = map_corrupt_row("start_time", DomainError::InvalidTime("7pm".to_string()));
        assert_eq!(
            err.to_string(),
            "Internal error: Corrupt lecture row (start_time): Invalid time: 7pm"
        );
    }
}
