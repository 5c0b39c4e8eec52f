use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// The source does not match the scored-product schema.
///
/// Row indices are 0-based and count data rows only (the header is not a row).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required column is absent from the header.
    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    /// A cell could not be turned into the field's type.
    #[error("row {row}, field '{field}': {reason} (value: '{value}')")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A row could not be parsed (wrong number of cells, not an object, ...).
    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    /// The source could not be parsed as a table at all.
    #[error("source is not a readable table: {message}")]
    Unreadable { message: String },
}

/// Errors returned by [`super::loader`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to read parquet data: {message}")]
    Parquet { message: String },
}

impl From<parquet::errors::ParquetError> for LoadError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        Self::Parquet {
            message: err.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(err: arrow::error::ArrowError) -> Self {
        Self::Parquet {
            message: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Query-time errors
// ---------------------------------------------------------------------------

/// Errors returned by [`super::query`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// No record matches the selection. Recoverable: the caller re-prompts.
    #[error("no product named '{product_name}'{}", category_suffix(.category))]
    NotFound {
        category: Option<String>,
        product_name: String,
    },

    /// An aggregate was requested over zero records.
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },
}

fn category_suffix(category: &Option<String>) -> String {
    match category {
        Some(c) => format!(" in category '{c}'"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_names_the_field() {
        let err = SchemaError::MissingColumn { column: "rating" };
        assert_eq!(err.to_string(), "required column 'rating' is missing");
    }

    #[test]
    fn invalid_field_names_row_and_field() {
        let err = SchemaError::InvalidField {
            row: 3,
            field: "discounted_price",
            value: "abc".into(),
            reason: "not a number",
        };
        assert_eq!(
            err.to_string(),
            "row 3, field 'discounted_price': not a number (value: 'abc')"
        );
    }

    #[test]
    fn schema_error_converts_into_load_error() {
        let err: LoadError = SchemaError::MissingColumn { column: "category" }.into();
        assert!(matches!(
            err,
            LoadError::Schema(SchemaError::MissingColumn { column: "category" })
        ));
    }

    #[test]
    fn not_found_mentions_category_only_when_given() {
        let scoped = QueryError::NotFound {
            category: Some("Home".into()),
            product_name: "Lamp".into(),
        };
        assert_eq!(
            scoped.to_string(),
            "no product named 'Lamp' in category 'Home'"
        );

        let unscoped = QueryError::NotFound {
            category: None,
            product_name: "Lamp".into(),
        };
        assert_eq!(unscoped.to_string(), "no product named 'Lamp'");
    }
}
