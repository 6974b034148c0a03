//! CsvRecord derive macro
//!
//! This macro implements `csvmap::CsvRecord` for a given struct.
//!
//! Featured functions catalogue:
//! - `get_field_row_number`
//! - `get_attr_row_number`
//! - `mapped_fields`
//!
//! These functions are used to find out tagged fields or attributes in the compiling time,
//! and the results of these functions are used in proc-macro's token streams (see function
//! `impl_csv_record`).
//!
//! Mapping problems such as a missing `index` on every field or a duplicated `index` are
//! left to `csvmap::TypeSchema`, which reports them at runtime.

mod mapping;

use quote::quote;
use syn::{
    parse_macro_input, punctuated::Punctuated, token::Comma, Attribute, Data, DeriveInput, Field,
    Fields, Lit, Meta, NestedMeta,
};

use mapping::*;

const TAG: &str = "csv";
const ROW_NUMBER: &str = "row_number";
const INDEX: &str = "index";
const NAME: &str = "name";

/// macro for CsvRecord derive
#[proc_macro_derive(CsvRecord, attributes(csv))]
pub fn derive_csv_record(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    let stream = impl_csv_record(&input);

    // Debug use:
    // println!("{}", &stream);

    proc_macro::TokenStream::from(stream)
}

type NamedFields = Punctuated<Field, Comma>;

/// turn ast into `Punctuated<Field, Comma>`, and filter out any type that is not a Rust struct
fn named_fields(ast: &DeriveInput) -> NamedFields {
    match &ast.data {
        Data::Struct(s) => {
            if let Fields::Named(ref named_fields) = s.fields {
                named_fields.named.clone()
            } else {
                unimplemented!("derive(CsvRecord) only supports named fields")
            }
        }
        _ => unimplemented!("CsvRecord only supports Struct"),
    }
}

/// `csv(...)` nested metas of an attribute, empty for any other attribute
fn csv_nested_metas(attr: &Attribute) -> Vec<NestedMeta> {
    match attr.parse_meta() {
        Ok(Meta::List(meta_list)) if meta_list.path.is_ident(TAG) => {
            meta_list.nested.into_iter().collect()
        }
        _ => vec![],
    }
}

/// find out whether a field name is `row_number`
///
/// ```rust,ignore
/// struct User {
///     row_number: usize,
///     ...
/// }
/// ```
fn get_field_row_number(named_fields: &NamedFields) -> Option<&Field> {
    named_fields
        .iter()
        .find(|field| matches!(&field.ident, Some(ident) if ident == ROW_NUMBER))
}

/// find out a field whose attribute is `row_number`
///
/// ```rust,ignore
/// struct User {
///     #[csv(row_number)]
///     line: u32,
///     ...
/// }
/// ```
fn get_attr_row_number(named_fields: &NamedFields) -> Option<&Field> {
    let is_row_number = |nested_meta: &NestedMeta| {
        matches!(nested_meta, NestedMeta::Meta(Meta::Path(path)) if path.is_ident(ROW_NUMBER))
    };

    named_fields.iter().find(|field| {
        field
            .attrs
            .iter()
            .any(|attr| csv_nested_metas(attr).iter().any(is_row_number))
    })
}

/// find out fields whose attribute carries an `index`
///
/// ```rust,ignore
/// struct User {
///     #[csv(index = 0, name = "identifier")]
///     id: Option<u32>,
///     #[csv(index = 1)]
///     surname: String,
///     ...
/// }
/// ```
fn mapped_fields(named_fields: &NamedFields) -> Vec<MappedField> {
    let field_fmap = |field: &Field| {
        let mut index = None;
        let mut column = None;

        for nested_meta in field.attrs.iter().flat_map(csv_nested_metas) {
            match nested_meta {
                NestedMeta::Meta(Meta::NameValue(mnv)) if mnv.path.is_ident(INDEX) => {
                    match mnv.lit {
                        Lit::Int(ref i) => {
                            index = Some(i.base10_parse::<usize>().unwrap_or_else(|_| {
                                panic!("`{}` must be a non-negative integer", INDEX)
                            }))
                        }
                        _ => panic!("`{}` must be an integer literal", INDEX),
                    }
                }
                NestedMeta::Meta(Meta::NameValue(mnv)) if mnv.path.is_ident(NAME) => {
                    match mnv.lit {
                        Lit::Str(ref s) => column = Some(s.value()),
                        _ => panic!("`{}` must be a string literal", NAME),
                    }
                }
                _ => {}
            }
        }

        match (index, column) {
            (Some(index), column) => Some(MappedField {
                ident: field.ident.clone().unwrap(),
                ty: field.ty.clone(),
                index,
                column,
            }),
            (None, Some(_)) => panic!("`{}` requires an `{}`", NAME, INDEX),
            (None, None) => None,
        }
    };

    named_fields.iter().filter_map(field_fmap).collect()
}

/// main process of handling derive stream
fn impl_csv_record(input: &DeriveInput) -> proc_macro2::TokenStream {
    // name of the struct
    let name = input.ident.clone();
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let named_fields = named_fields(input);

    let fields = mapped_fields(&named_fields);
    let getters = fields.iter().map(GetterArm);
    let setters = fields.iter().map(SetterArm);

    // get row number either from field `row_number` or field whose attribute is `row_number`
    let row_number_field = match (
        get_field_row_number(&named_fields),
        get_attr_row_number(&named_fields),
    ) {
        (Some(rn), _) => rn,
        (None, Some(rn)) => rn,
        _ => panic!("No `row_number` field nor `row_number` attribute were found!"),
    };
    let row_number = row_number_field.ident.clone().unwrap();
    let row_number_ty = &row_number_field.ty;

    let expanded = quote! {
        impl #impl_generics ::csvmap::CsvRecord for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            fn field_descriptors() -> ::std::vec::Vec<::csvmap::FieldDescriptor> {
                ::std::vec![#(#fields),*]
            }

            fn row_number(&self) -> usize {
                ::std::convert::TryFrom::try_from(self.#row_number).unwrap_or(usize::MAX)
            }

            // saturates when the field is narrower than `usize`
            fn set_row_number(&mut self, row_number: usize) {
                self.#row_number =
                    <#row_number_ty as ::std::convert::TryFrom<usize>>::try_from(row_number)
                        .unwrap_or(<#row_number_ty>::MAX);
            }

            fn get_field(&self, field_name: &str) -> ::std::option::Option<::csvmap::Value> {
                match field_name {
                    #(#getters)*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                field_name: &str,
                value: ::csvmap::Value,
            ) -> ::csvmap::CsvResult<()> {
                match field_name {
                    #(#setters)*
                    _ => ::std::result::Result::Err(
                        ::csvmap::CsvError::FieldNotFound(field_name.to_owned())
                    ),
                }
            }
        }
    };

    expanded
}
