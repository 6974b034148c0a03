//! Csvmap Error
//!
//! error type for csv mapping

use std::fmt::Display;

use thiserror::Error;

use crate::ValueType;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("{0}")]
    Configuration(String),

    #[error("insufficient number of elements ('{actual}') - required '{required}'.")]
    InsufficientElements { actual: usize, required: usize },

    #[error("missing value of '{column}' with index '{index}'.")]
    MissingValue { column: String, index: usize },

    #[error("the format of field {field} is invalid.")]
    InvalidFormat { field: String },

    #[error("value '{text}' was either too large or too small for {value_type}.")]
    Overflow { text: String, value_type: ValueType },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: String,
    },

    #[error("field '{0}' is not mapped")]
    FieldNotFound(String),

    #[error("incorrect file header starting with: {0}.")]
    HeaderValidation(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl CsvError {
    pub fn new_configuration_error<T: Into<String>>(msg: T) -> Self {
        CsvError::Configuration(msg.into())
    }

    /// zero mapped fields
    pub fn new_missing_mapping_error(type_name: &str) -> Self {
        CsvError::new_configuration_error(format!(
            "Missing 'field-mapping' configuration in '{}' type.",
            type_name
        ))
    }

    /// `items` is the already `;`-joined list
    pub fn new_duplicated_index_error(items: &str, type_name: &str) -> Self {
        CsvError::new_configuration_error(format!(
            "Duplicated index/es '{}' in '{}' type.",
            items, type_name
        ))
    }

    pub fn new_duplicated_field_error(items: &str, type_name: &str) -> Self {
        CsvError::new_configuration_error(format!(
            "Duplicated field/s '{}' in '{}' type.",
            items, type_name
        ))
    }

    pub fn new_invalid_format_error<T: Into<String>>(field: T) -> Self {
        CsvError::InvalidFormat {
            field: field.into(),
        }
    }

    pub fn new_overflow_error<T: Into<String>>(text: T, value_type: ValueType) -> Self {
        CsvError::Overflow {
            text: text.into(),
            value_type,
        }
    }

    pub fn new_type_mismatch_error<T: Display>(expected: ValueType, found: T) -> Self {
        CsvError::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }

    /// Whether this error aborts a whole read/write call, as opposed to a single line.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CsvError::InvalidArgument(_) | CsvError::Configuration(_) | CsvError::IO(_)
        )
    }

    /// Message recorded for a line-level error, e.g. `Line 3 - ...`
    pub fn line_message(&self, line_number: usize) -> String {
        format!("Line {} - {}", line_number, self)
    }
}
