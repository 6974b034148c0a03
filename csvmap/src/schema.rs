//! Schema
//!
//! Field descriptors of a record type, and the validated schema built from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::util::duplicates_joined;
use crate::{CsvError, CsvResult, CsvValue, Value, ValueType};

/// field info: csv index, column name, record field name & value type
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub index: usize,
    pub column_name: String,
    pub field_name: String,
    pub value_type: ValueType,
    pub nullable: bool,
}

impl FieldDescriptor {
    pub fn new<T>(
        index: usize,
        column_name: Option<&str>,
        field_name: T,
        value_type: ValueType,
        nullable: bool,
    ) -> Self
    where
        T: Into<String>,
    {
        let field_name = field_name.into();
        // column name falls back to the field's own name
        let column_name = column_name
            .map(str::to_owned)
            .unwrap_or_else(|| field_name.clone());

        FieldDescriptor {
            index,
            column_name,
            field_name,
            value_type,
            nullable,
        }
    }

    /// value type & nullability taken from the field's Rust type
    pub fn of<V: CsvValue>(index: usize, column_name: Option<&str>, field_name: &str) -> Self {
        Self::new(index, column_name, field_name, V::VALUE_TYPE, V::NULLABLE)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }
}

/// A record type that can be mapped to and from a csv row.
///
/// Normally implemented by `#[derive(CsvRecord)]`:
///
/// ```rust,ignore
/// #[derive(CsvRecord, Default)]
/// struct User {
///     row_number: usize,
///     #[csv(index = 0, name = "identifier")]
///     id: Option<Decimal>,
///     #[csv(index = 1)]
///     surname: String,
///     // unmapped
///     note: String,
/// }
/// ```
pub trait CsvRecord: Default {
    /// name used in configuration error messages
    fn type_name() -> &'static str;

    /// one descriptor per mapped field, any order
    fn field_descriptors() -> Vec<FieldDescriptor>;

    fn row_number(&self) -> usize;

    fn set_row_number(&mut self, row_number: usize);

    /// `None` if `field_name` is not a mapped field
    fn get_field(&self, field_name: &str) -> Option<Value>;

    fn set_field(&mut self, field_name: &str, value: Value) -> CsvResult<()>;
}

/// Schema
///
/// Validated, immutable set of mapped-field descriptors of one record type, kept in
/// ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    lookup: HashMap<String, usize>,
}

impl TypeSchema {
    pub fn build<T: CsvRecord>() -> CsvResult<Self> {
        Self::from_descriptors(T::type_name(), T::field_descriptors())
    }

    pub fn from_descriptors(
        type_name: &'static str,
        descriptors: Vec<FieldDescriptor>,
    ) -> CsvResult<Self> {
        if descriptors.is_empty() {
            return Err(CsvError::new_missing_mapping_error(type_name));
        }

        if let Some(dup) = duplicates_joined(descriptors.iter().map(|d| d.index)) {
            return Err(CsvError::new_duplicated_index_error(&dup, type_name));
        }

        if let Some(dup) = duplicates_joined(descriptors.iter().map(|d| d.field_name.as_str())) {
            return Err(CsvError::new_duplicated_field_error(&dup, type_name));
        }

        let mut fields = descriptors;
        fields.sort_by_key(|d| d.index);

        let lookup = fields
            .iter()
            .enumerate()
            .map(|(i, d)| (d.field_name.clone(), i))
            .collect();

        debug!(
            type_name,
            fields = fields.len(),
            "csv schema built"
        );

        Ok(TypeSchema {
            type_name,
            fields,
            lookup,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// always false for a built schema
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldDescriptor> {
        self.lookup.get(field_name).map(|&i| &self.fields[i])
    }

    /// descriptors in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields.iter()
    }

    /// descriptor with the highest index
    pub fn max_index(&self) -> Option<&FieldDescriptor> {
        self.fields.last()
    }

    /// column names in ascending index order
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|d| d.column_name()).collect()
    }
}
