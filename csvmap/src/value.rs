//! csvmap value
//!
//! This module contains the value type, which is the atomic unit moved between a record
//! field and a csv cell.
//!
//! Custom types:
//! 1. Uuid
//! 1. Decimal

use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    impl_csv_value, impl_value_from, CsvResult, DEFAULT_DATE_FMT, DEFAULT_DATETIME_FMT,
    DEFAULT_TIME_FMT,
};

// ================================================================================================
// Value & ValueType
// ================================================================================================

/// Value carried by a mapped field. `Null` stands for an absent value.
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Bool(bool),
    Char(char),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Uuid(Uuid),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `None` for `Value::Null`
    pub fn value_type(&self) -> Option<ValueType> {
        let vt = match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Char(_) => ValueType::Char,
            Value::U8(_) => ValueType::U8,
            Value::U16(_) => ValueType::U16,
            Value::U32(_) => ValueType::U32,
            Value::U64(_) => ValueType::U64,
            Value::I8(_) => ValueType::I8,
            Value::I16(_) => ValueType::I16,
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Uuid(_) => ValueType::Uuid,
            Value::String(_) => ValueType::String,
            Value::Date(_) => ValueType::Date,
            Value::Time(_) => ValueType::Time,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Null => return None,
        };
        Some(vt)
    }

    pub(crate) fn type_hint(&self) -> String {
        match self.value_type() {
            Some(vt) => vt.to_string(),
            None => "null".to_owned(),
        }
    }
}

/// natural textual representation, used when no custom format applies
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Uuid(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v.format(DEFAULT_DATE_FMT)),
            Value::Time(v) => write!(f, "{}", v.format(DEFAULT_TIME_FMT)),
            Value::DateTime(v) => write!(f, "{}", v.format(DEFAULT_DATETIME_FMT)),
            Value::Null => Ok(()),
        }
    }
}

/// Semantic type tag of a mapped field.
#[derive(PartialEq, Clone, Copy, Debug, Deserialize, Serialize, Eq, Hash)]
pub enum ValueType {
    Bool,
    Char,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Uuid,
    String,
    Date,
    Time,
    DateTime,
}

impl ValueType {
    /// whether a configured date/time format applies to this type
    pub fn is_temporal(&self) -> bool {
        matches!(self, ValueType::DateTime)
    }

    /// string values are kept verbatim; every other type is trimmed before parsing
    pub fn is_textual(&self) -> bool {
        matches!(self, ValueType::String)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl_value_from!(bool, Bool);
impl_value_from!(char, Char);
impl_value_from!(u8, U8);
impl_value_from!(u16, U16);
impl_value_from!(u32, U32);
impl_value_from!(u64, U64);
impl_value_from!(i8, I8);
impl_value_from!(i16, I16);
impl_value_from!(i32, I32);
impl_value_from!(i64, I64);
impl_value_from!(f32, F32);
impl_value_from!(f64, F64);
impl_value_from!(Decimal, Decimal);
impl_value_from!(Uuid, Uuid);
impl_value_from!(String, String);
impl_value_from!(NaiveDate, Date);
impl_value_from!(NaiveTime, Time);
impl_value_from!(NaiveDateTime, DateTime);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

// ================================================================================================
// CsvValue
// - bridge between a record's field type and `Value`
// ================================================================================================

/// A Rust type that can be stored in a mapped field.
///
/// `Option<T>` is the nullable form of `T`: it shares `T`'s value type and maps
/// `Value::Null` to `None`.
pub trait CsvValue: Sized {
    const VALUE_TYPE: ValueType;
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> CsvResult<Self>;
}

impl_csv_value!(bool, Bool);
impl_csv_value!(char, Char);
impl_csv_value!(u8, U8);
impl_csv_value!(u16, U16);
impl_csv_value!(u32, U32);
impl_csv_value!(u64, U64);
impl_csv_value!(i8, I8);
impl_csv_value!(i16, I16);
impl_csv_value!(i32, I32);
impl_csv_value!(i64, I64);
impl_csv_value!(f32, F32);
impl_csv_value!(f64, F64);
impl_csv_value!(Decimal, Decimal);
impl_csv_value!(Uuid, Uuid);
impl_csv_value!(String, String);
impl_csv_value!(NaiveDate, Date);
impl_csv_value!(NaiveTime, Time);
impl_csv_value!(NaiveDateTime, DateTime);

impl<T: CsvValue> CsvValue for Option<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> CsvResult<Self> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}

#[cfg(test)]
mod tests_value {
    use super::*;
    use crate::CsvError;

    #[test]
    fn option_round_trip() {
        let v: Option<i32> = Some(7);
        assert_eq!(v.to_value(), Value::I32(7));
        assert_eq!(Option::<i32>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::from_value(Value::I32(7)).unwrap(), Some(7));

        assert!(<Option<NaiveDateTime> as CsvValue>::NULLABLE);
        assert_eq!(
            <Option<NaiveDateTime> as CsvValue>::VALUE_TYPE,
            ValueType::DateTime
        );
    }

    #[test]
    fn type_mismatch() {
        let res = i32::from_value(Value::String("7".to_owned()));
        assert!(matches!(
            res,
            Err(CsvError::TypeMismatch {
                expected: ValueType::I32,
                ..
            })
        ));

        // plain types never accept an absent value
        assert!(String::from_value(Value::Null).is_err());
    }

    #[test]
    fn natural_text() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(8, 15, 30)
            .unwrap();

        assert_eq!(Value::from(dt).to_string(), "2024-03-05T08:15:30");
        assert_eq!(Value::from(Some('A')).to_string(), "A");
        assert_eq!(Value::from(None::<i64>).to_string(), "");
        assert_eq!(Value::from(Decimal::new(10150, 2)).to_string(), "101.50");
    }
}
