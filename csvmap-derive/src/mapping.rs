//! Mapping
//!
//! Mapped fields collected from `#[csv(...)]` attributes

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{Ident, Type};

/// One `#[csv(index = N, name = "...")]` field
#[derive(Clone)]
pub struct MappedField {
    pub ident: Ident,
    pub ty: Type,
    pub index: usize,
    pub column: Option<String>,
}

impl MappedField {
    pub fn field_name(&self) -> String {
        self.ident.to_string()
    }
}

/// `csvmap_derive::MappedField` -> `csvmap::FieldDescriptor`
impl ToTokens for MappedField {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ty = &self.ty;
        let index = self.index;
        let field_name = self.field_name();
        let column = match &self.column {
            Some(c) => quote! { ::std::option::Option::Some(#c) },
            None => quote! { ::std::option::Option::None },
        };

        tokens.extend(quote! {
            ::csvmap::FieldDescriptor::of::<#ty>(#index, #column, #field_name)
        })
    }
}

/// getter arm: `"id" => Some(CsvValue::to_value(&self.id))`
pub struct GetterArm<'a>(pub &'a MappedField);

impl ToTokens for GetterArm<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.0.ident;
        let ty = &self.0.ty;
        let field_name = self.0.field_name();

        tokens.extend(quote! {
            #field_name => ::std::option::Option::Some(
                <#ty as ::csvmap::CsvValue>::to_value(&self.#ident)
            ),
        })
    }
}

/// setter arm: `"id" => { self.id = CsvValue::from_value(value)?; Ok(()) }`
pub struct SetterArm<'a>(pub &'a MappedField);

impl ToTokens for SetterArm<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.0.ident;
        let ty = &self.0.ty;
        let field_name = self.0.field_name();

        tokens.extend(quote! {
            #field_name => {
                self.#ident = <#ty as ::csvmap::CsvValue>::from_value(value)?;
                ::std::result::Result::Ok(())
            }
        })
    }
}
