use std::sync::OnceLock;

use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use regex::Regex;

/// Utility for converting database errors to structured AppError variants.
///
/// PostgreSQL reports the offending key in the error detail
/// (`Key (name)=(Tacos) already exists.`), which is parsed here so API
/// clients get the field and value rather than a raw driver message.
pub struct DatabaseErrorConverter;

struct Patterns {
    key_value: Regex,
    column: Regex,
    table: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key/value pattern"),
        column: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
        table: Regex::new(r#"(?:relation|table) "([^"]+)""#).expect("valid table pattern"),
    })
}

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let text = match info.details() {
            Some(details) => format!("{}\n{}", info.message(), details),
            None => info.message().to_string(),
        };
        let entity = info
            .table_name()
            .map(str::to_string)
            .or_else(|| capture(&patterns().table, &text));

        match kind {
            DatabaseErrorKind::UniqueViolation => match key_value(&text) {
                Some((field, value)) => AppError::Duplicate {
                    entity: entity.unwrap_or_else(|| "resource".to_string()),
                    field,
                    value,
                },
                None => Self::opaque(operation, "Unique constraint violation", &text),
            },
            DatabaseErrorKind::ForeignKeyViolation => match key_value(&text) {
                Some((field, value)) => AppError::Validation {
                    field,
                    reason: format!("Invalid reference with value '{}'", value),
                },
                None => Self::opaque(operation, "Foreign key constraint violation", &text),
            },
            DatabaseErrorKind::NotNullViolation => {
                match info
                    .column_name()
                    .map(str::to_string)
                    .or_else(|| capture(&patterns().column, &text))
                {
                    Some(field) => AppError::Validation {
                        field,
                        reason: format!(
                            "Field is required for {}",
                            entity.unwrap_or_else(|| "resource".to_string())
                        ),
                    },
                    None => Self::opaque(operation, "Not null constraint violation", &text),
                }
            }
            DatabaseErrorKind::CheckViolation => AppError::Validation {
                field: info.constraint_name().unwrap_or("unknown").to_string(),
                reason: "Check constraint failed".to_string(),
            },
            _ => Self::opaque(operation, "Database error", &text),
        }
    }

    fn opaque(operation: &str, label: &str, text: &str) -> AppError {
        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{}: {}", label, text)),
        }
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn key_value(text: &str) -> Option<(String, String)> {
    let caps = patterns().key_value.captures(text)?;
    Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        table_name: Option<String>,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            self.table_name.as_deref()
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, info: MockDatabaseErrorInfo) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(info))
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_unique_violation_uses_details() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo {
                message: "duplicate key value violates unique constraint \"ingredients_name_key\""
                    .to_string(),
                details: Some("Key (name)=(Saffron) already exists.".to_string()),
                table_name: Some("ingredients".to_string()),
                constraint_name: Some("ingredients_name_key".to_string()),
            },
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert ingredient") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "ingredients");
                assert_eq!(field, "name");
                assert_eq!(value, "Saffron");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            MockDatabaseErrorInfo {
                message: "insert or update on table \"recipes\" violates foreign key constraint \"recipes_nation_id_fkey\"".to_string(),
                details: Some("Key (nation_id)=(999) is not present in table \"nations\".".to_string()),
                table_name: None,
                constraint_name: Some("recipes_nation_id_fkey".to_string()),
            },
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert recipe") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "nation_id");
                assert!(reason.contains("999"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_null_violation_from_message() {
        let error = db_error(
            DatabaseErrorKind::NotNullViolation,
            MockDatabaseErrorInfo {
                message: "null value in column \"name\" of relation \"regions\" violates not-null constraint".to_string(),
                details: None,
                table_name: None,
                constraint_name: None,
            },
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert region") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert!(reason.contains("regions"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_unique_violation_stays_database_error() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo {
                message: "duplicate key".to_string(),
                details: None,
                table_name: None,
                constraint_name: None,
            },
        );

        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "insert"),
            AppError::Database { .. }
        ));
    }
}
