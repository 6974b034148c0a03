//! Serialize functions
//!
//! record -> csv line

use tracing::warn;

use crate::cv::to_text;
use crate::{CsvConfig, CsvError, CsvRecord, CsvResult, TypeSchema, LINE_TERMINATOR};

/// Append the header line: column names in ascending index order.
pub(crate) fn header_serialize(buf: &mut String, schema: &TypeSchema, config: &CsvConfig) {
    for (i, column) in schema.column_names().into_iter().enumerate() {
        if i > 0 {
            buf.push(config.delimiter);
        }
        buf.push_str(column);
    }
    buf.push_str(LINE_TERMINATOR);
}

/// Append one record as a line, fields in ascending index order.
pub(crate) fn record_serialize<T: CsvRecord>(
    buf: &mut String,
    record: &T,
    schema: &TypeSchema,
    config: &CsvConfig,
) -> CsvResult<()> {
    for (i, field) in schema.iter().enumerate() {
        let value = record
            .get_field(field.field_name())
            .ok_or_else(|| CsvError::FieldNotFound(field.field_name().to_owned()))?;
        let text = to_text(&value, field, config)?;

        // no quoting, such a value splits or breaks the line when read back
        if text.contains(config.delimiter) || text.contains(&['\n', '\r'][..]) {
            warn!(
                field = field.field_name(),
                row_number = record.row_number(),
                "csv value contains a delimiter or line break"
            );
        }

        if i > 0 {
            buf.push(config.delimiter);
        }
        buf.push_str(&text);
    }
    buf.push_str(LINE_TERMINATOR);

    Ok(())
}
