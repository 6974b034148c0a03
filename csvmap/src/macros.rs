//! Csvmap macros
//!
//! This module contains macros used by the value model:
//! 1. impl_value_from
//! 1. impl_csv_value

/// impl `From<T>` & `From<Option<T>>` for `Value`. Used in `value.rs`.
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl From<i32> for Value {
///     fn from(v: i32) -> Self {
///         Value::I32(v)
///     }
/// }
/// ```
macro_rules! impl_value_from {
    ($ftype:ty, $val_var:ident) => {
        impl From<$ftype> for $crate::Value {
            fn from(v: $ftype) -> Self {
                $crate::Value::$val_var(v)
            }
        }

        impl From<Option<$ftype>> for $crate::Value {
            fn from(ov: Option<$ftype>) -> Self {
                match ov {
                    Some(v) => $crate::Value::$val_var(v),
                    None => $crate::Value::Null,
                }
            }
        }
    };
}

pub(crate) use impl_value_from;

/// impl `CsvValue` for a plain field type. `Option<T>` is covered by a blanket impl.
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl CsvValue for i32 {
///     const VALUE_TYPE: ValueType = ValueType::I32;
///
///     fn to_value(&self) -> Value {
///         Value::I32(self.clone())
///     }
///
///     fn from_value(value: Value) -> CsvResult<Self> {
///         match value {
///             Value::I32(v) => Ok(v),
///             v => Err(CsvError::new_type_mismatch_error(ValueType::I32, v.value_type())),
///         }
///     }
/// }
/// ```
macro_rules! impl_csv_value {
    ($ftype:ty, $val_var:ident) => {
        impl $crate::CsvValue for $ftype {
            const VALUE_TYPE: $crate::ValueType = $crate::ValueType::$val_var;

            fn to_value(&self) -> $crate::Value {
                $crate::Value::$val_var(self.clone())
            }

            fn from_value(value: $crate::Value) -> $crate::CsvResult<Self> {
                match value {
                    $crate::Value::$val_var(v) => Ok(v),
                    v => Err($crate::CsvError::new_type_mismatch_error(
                        $crate::ValueType::$val_var,
                        v.type_hint(),
                    )),
                }
            }
        }
    };
}

pub(crate) use impl_csv_value;
