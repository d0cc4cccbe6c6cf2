use crate::settings::{FieldMode, Settings};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub(crate) fn derive_record(input: DeriveInput) -> Result<TokenStream, syn::Error> {
    let settings = Settings::builder(&input)
        .container_attributes(&input)?
        .field_attributes(&input)?
        .build()?;

    let ident = settings.ident();
    let type_name = &settings.type_name;

    let field_impl = settings.stored_fields().into_iter().map(|field| {
        let name = &field.name;
        let field_ident = &field.ident;
        let kind = match field.mode {
            FieldMode::PartitionKey => quote! { PartitionKey },
            FieldMode::SortKey => quote! { SortKey },
            _ => quote! { Attribute },
        };

        quote! {
            .field(
                #name,
                ::dynamodb_mapper::schema::FieldKind::#kind,
                |record: &Self| &record.#field_ident,
            )
        }
    });

    let take_impl = settings
        .stored_fields()
        .into_iter()
        .map(|field| {
            let name = &field.name;
            let field_ident = &field.ident;

            quote! { #field_ident: fields.take(#name)? }
        })
        .chain(settings.skipped_fields().into_iter().map(|field| {
            let field_ident = &field.ident;

            quote! { #field_ident: ::core::default::Default::default() }
        }));

    let expanded = quote! {
        #[automatically_derived]
        impl ::dynamodb_mapper::traits::Record for #ident {
            fn describe() -> ::core::result::Result<
                ::dynamodb_mapper::schema::SchemaDescriptor<Self>,
                ::dynamodb_mapper::errors::SchemaError,
            > {
                ::dynamodb_mapper::schema::SchemaDescriptor::builder(#type_name)
                    #(#field_impl)*
                    .build(|fields| {
                        ::core::result::Result::Ok(Self {
                            #(#take_impl,)*
                        })
                    })
            }
        }

        #[automatically_derived]
        impl ::dynamodb_mapper::traits::Attribute for #ident {
            fn shape() -> ::dynamodb_mapper::schema::Shape {
                ::dynamodb_mapper::schema::Shape::Record(#type_name)
            }

            fn to_attribute(
                &self,
            ) -> ::core::result::Result<
                ::dynamodb_mapper::AttributeValue,
                ::dynamodb_mapper::errors::EncodeError,
            > {
                ::dynamodb_mapper::codec::encode_nested(self)
            }

            fn try_from_attribute(
                value: ::dynamodb_mapper::AttributeValue,
            ) -> ::core::result::Result<Self, ::dynamodb_mapper::errors::DecodeError> {
                ::dynamodb_mapper::codec::decode_nested(value)
            }
        }
    };

    Ok(expanded)
}
