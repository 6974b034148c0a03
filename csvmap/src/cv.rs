//! Value converter
//!
//! Single cell conversion between text and `Value`, driven by a field descriptor.

use std::fmt::Write;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::util::is_blank;
use crate::{
    CsvConfig, CsvError, CsvResult, FieldDescriptor, Value, ValueType, DEFAULT_DATETIME_FMT,
    DEFAULT_DATE_FMT, DEFAULT_TIME_FMT,
};

/// Outcome of converting one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    Value(Value),
    /// blank cell
    Absent,
    /// recoverable, the field is left unset
    InvalidFormat,
}

/// Value -> text
///
/// A date-time format chrono cannot render is a configuration error.
pub fn to_text(value: &Value, field: &FieldDescriptor, config: &CsvConfig) -> CsvResult<String> {
    match (config.date_time_format(), value) {
        (Some(fmt), Value::DateTime(dt)) if field.value_type.is_temporal() => {
            let mut text = String::new();
            write!(text, "{}", dt.format(fmt)).map_err(|_| {
                CsvError::new_configuration_error(format!("invalid date-time format '{}'", fmt))
            })?;
            Ok(text)
        }
        // `Null` displays as empty text
        _ => Ok(value.to_string()),
    }
}

/// text -> Value
///
/// Unparsable text yields `Converted::InvalidFormat`; an overflowing number is an error.
pub fn from_text(text: &str, field: &FieldDescriptor, config: &CsvConfig) -> CsvResult<Converted> {
    if is_blank(text) {
        return Ok(Converted::Absent);
    }

    let vt = field.value_type;
    let text = if vt.is_textual() { text } else { text.trim() };

    if let (Some(fmt), true) = (config.date_time_format(), vt.is_temporal()) {
        return Ok(parse_date_time(text, fmt)
            .map(|dt| Converted::Value(Value::DateTime(dt)))
            .unwrap_or(Converted::InvalidFormat));
    }

    let parsed = match vt {
        ValueType::Bool => parse_bool(text).map(Value::Bool),
        ValueType::Char => parse_char(text).map(Value::Char),
        ValueType::U8 => parse_int::<u8>(text, vt)?.map(Value::U8),
        ValueType::U16 => parse_int::<u16>(text, vt)?.map(Value::U16),
        ValueType::U32 => parse_int::<u32>(text, vt)?.map(Value::U32),
        ValueType::U64 => parse_int::<u64>(text, vt)?.map(Value::U64),
        ValueType::I8 => parse_int::<i8>(text, vt)?.map(Value::I8),
        ValueType::I16 => parse_int::<i16>(text, vt)?.map(Value::I16),
        ValueType::I32 => parse_int::<i32>(text, vt)?.map(Value::I32),
        ValueType::I64 => parse_int::<i64>(text, vt)?.map(Value::I64),
        ValueType::F32 => text.parse::<f32>().ok().map(Value::F32),
        ValueType::F64 => text.parse::<f64>().ok().map(Value::F64),
        ValueType::Decimal => parse_decimal(text)?.map(Value::Decimal),
        ValueType::Uuid => Uuid::parse_str(text).ok().map(Value::Uuid),
        ValueType::String => Some(Value::String(text.to_owned())),
        ValueType::Date => NaiveDate::parse_from_str(text, DEFAULT_DATE_FMT)
            .ok()
            .map(Value::Date),
        ValueType::Time => NaiveTime::parse_from_str(text, DEFAULT_TIME_FMT)
            .ok()
            .map(Value::Time),
        ValueType::DateTime => NaiveDateTime::parse_from_str(text, DEFAULT_DATETIME_FMT)
            .ok()
            .map(Value::DateTime),
    };

    Ok(parsed.map_or(Converted::InvalidFormat, Converted::Value))
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// `Ok(None)` on bad digits, `Err` on overflow
fn parse_int<T>(text: &str, vt: ValueType) -> CsvResult<Option<T>>
where
    T: FromStr<Err = ParseIntError>,
{
    match text.parse::<T>() {
        Ok(v) => Ok(Some(v)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(CsvError::new_overflow_error(text, vt))
            }
            _ => Ok(None),
        },
    }
}

/// A format without time fields reads as midnight of that date.
fn parse_date_time(text: &str, fmt: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(text, fmt) {
        Ok(dt) => Some(dt),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => NaiveDate::parse_from_str(text, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
        Err(_) => None,
    }
}

/// `Ok(None)` on bad digits, `Err` on overflow
///
/// rust_decimal reports too many digits as a plain message, so a well-formed
/// number it still rejects is taken as out of range.
fn parse_decimal(text: &str) -> CsvResult<Option<Decimal>> {
    match Decimal::from_str(text) {
        Ok(v) => Ok(Some(v)),
        Err(_) if is_plain_number(text) => {
            Err(CsvError::new_overflow_error(text, ValueType::Decimal))
        }
        Err(_) => Ok(None),
    }
}

/// optional sign, digits, at most one decimal point
fn is_plain_number(text: &str) -> bool {
    let digits = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));

    !(int.is_empty() && frac.is_empty())
        && int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit())
}
