//! Deserialize functions
//!
//! csv line -> record

use crate::cv::{from_text, Converted};
use crate::util::is_blank;
use crate::{CsvConfig, CsvError, CsvRecord, CsvResult, TypeSchema};

/// A decoded record, together with the fields whose text could not be parsed.
///
/// Those fields are left at their default, the record itself is kept.
#[derive(Debug)]
pub(crate) struct DecodedRecord<T> {
    pub record: T,
    pub field_errors: Vec<CsvError>,
}

/// Without a custom validator: every mapped column name must appear among the cells.
pub(crate) fn header_validate(cells: &[&str], schema: &TypeSchema, config: &CsvConfig) -> bool {
    match config.header_validator.as_ref() {
        Some(f) => f(cells),
        None => schema
            .column_names()
            .into_iter()
            .all(|c| cells.contains(&c)),
    }
}

/// Build a record from the cells of one line.
///
/// Fails when the line cannot hold every mapped index, or on an unrecoverable
/// conversion fault.
pub(crate) fn record_deserialize<T: CsvRecord>(
    row_number: usize,
    cells: &[&str],
    schema: &TypeSchema,
    config: &CsvConfig,
) -> CsvResult<DecodedRecord<T>> {
    let mut record = T::default();
    record.set_row_number(row_number);

    if schema.len() > cells.len() {
        return Err(CsvError::InsufficientElements {
            actual: cells.len(),
            required: schema.len(),
        });
    }

    if let Some(max) = schema.max_index() {
        if max.index() >= cells.len() {
            return Err(CsvError::MissingValue {
                column: max.column_name().to_owned(),
                index: max.index(),
            });
        }
    }

    let mut field_errors = Vec::new();
    for field in schema.iter() {
        let text = cells[field.index()];
        if is_blank(text) {
            continue;
        }

        match from_text(text, field, config)? {
            Converted::Value(v) => record.set_field(field.field_name(), v)?,
            Converted::Absent => {}
            Converted::InvalidFormat => {
                field_errors.push(CsvError::new_invalid_format_error(field.field_name()))
            }
        }
    }

    Ok(DecodedRecord {
        record,
        field_errors,
    })
}
