//! Csv config
//!
//! Reading/writing options shared by an executor's calls.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_DELIMITER;

/// Custom header check, receives the raw header cells.
pub type HeaderValidator = Arc<dyn Fn(&[&str]) -> bool + Send + Sync>;

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Default is ','
    pub delimiter: char,

    /// Default is true
    pub has_header_record: bool,

    /// Should the reader validate the header. Default is true
    pub validate_header: bool,

    /// Custom date-time format (chrono `strftime` syntax), e.g. `%Y%m%d %H:%M:%S`
    pub date_time_format: Option<String>,

    /// Replaces the default header rule: every mapped column name must be present
    #[serde(skip)]
    pub header_validator: Option<HeaderValidator>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            has_header_record: true,
            validate_header: true,
            date_time_format: None,
            header_validator: None,
        }
    }
}

impl Debug for CsvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvConfig")
            .field("delimiter", &self.delimiter)
            .field("has_header_record", &self.has_header_record)
            .field("validate_header", &self.validate_header)
            .field("date_time_format", &self.date_time_format)
            .field(
                "header_validator",
                &self.header_validator.as_ref().map(|_| "Fn(&[&str]) -> bool"),
            )
            .finish()
    }
}

impl CsvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header_record = has_header;
        self
    }

    pub fn validate_header(mut self, validate: bool) -> Self {
        self.validate_header = validate;
        self
    }

    pub fn with_date_time_format<T: Into<String>>(mut self, format: Option<T>) -> Self {
        self.date_time_format = format.map(Into::into);
        self
    }

    pub fn with_header_validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&[&str]) -> bool + Send + Sync + 'static,
    {
        self.header_validator = Some(Arc::new(f));
        self
    }

    /// configured date-time format, blank formats are ignored
    pub(crate) fn date_time_format(&self) -> Option<&str> {
        self.date_time_format
            .as_deref()
            .filter(|f| !f.trim().is_empty())
    }
}
