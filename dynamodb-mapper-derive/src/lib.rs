extern crate proc_macro2;
extern crate quote;
extern crate syn;

mod record;
mod settings;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive `dynamodb_mapper::Record` for a struct with named fields.
///
/// Container attributes:
///
/// - `#[dynamo(rename_all = "camelCase")]` renames every field. Supported cases are
///   `camelCase`, `PascalCase`, `snake_case`, `kebab-case` and `SCREAMING_SNAKE_CASE`.
/// - `#[dynamo(type_name = "...")]` overrides the type name reported in errors.
///
/// Field attributes:
///
/// - `#[partition_key]` and `#[sort_key]` designate the primary key.
/// - `#[dynamo(rename = "...")]` sets the attribute name of one field.
/// - `#[dynamo(skip)]` leaves the field out of the document, it is rebuilt with
///   `Default::default()` when decoding.
#[proc_macro_derive(Record, attributes(dynamo, partition_key, sort_key))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(parse_macro_input!(input as DeriveInput))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
