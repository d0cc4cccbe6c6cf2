use super::{FieldMode, FieldSettings, RenameRule, Settings};
use itertools::Itertools;
use proc_macro2::{Ident, Span};
use syn::{ext::IdentExt, Data, DeriveInput, Field, Fields, LitStr};

pub(crate) struct SettingsBuilder {
    ident: Ident,
    type_name: String,
    rename_all: Option<RenameRule>,
    fields: Vec<FieldSettings>,
}

impl SettingsBuilder {
    pub(crate) fn new(input: &DeriveInput) -> Self {
        Self {
            ident: input.ident.clone(),
            type_name: input.ident.unraw().to_string(),
            rename_all: None,
            fields: Vec::new(),
        }
    }

    pub(crate) fn container_attributes(
        mut self,
        DeriveInput {
            attrs, generics, ..
        }: &DeriveInput,
    ) -> Result<Self, syn::Error> {
        if !generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                generics,
                "#[derive(Record)] does not support generic types",
            ));
        }

        for attr in attrs {
            if attr.path().is_ident("dynamo") {
                attr.parse_nested_meta(|meta| {
                    let ident = meta.path.get_ident().map(|i| i.to_string());
                    match ident.as_deref() {
                        Some("rename_all") => {
                            let value = meta.value()?.parse::<LitStr>()?;

                            self.rename_all =
                                Some(RenameRule::parse(&value.value()).ok_or_else(|| {
                                    syn::Error::new_spanned(
                                        &value,
                                        format!("unsupported rename rule '{}'", value.value()),
                                    )
                                })?);

                            Ok(())
                        }
                        Some("type_name") => {
                            let value = meta.value()?.parse::<LitStr>()?.value();

                            if value.is_empty() {
                                return Err(meta.error("type name must not be empty"));
                            }

                            self.type_name = value;
                            Ok(())
                        }
                        _ => Err(meta.error("unsupported attribute")),
                    }
                })?;
            }
        }

        Ok(self)
    }

    pub(crate) fn field_attributes(
        mut self,
        DeriveInput { data, ident, .. }: &DeriveInput,
    ) -> Result<Self, syn::Error> {
        // Only structs with named fields map to documents
        let fields_named = match data {
            Data::Struct(data_struct) => match &data_struct.fields {
                Fields::Named(fields_named) => fields_named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        "#[derive(Record)] requires a struct with named fields",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[derive(Record)] is only supported on structs",
                ))
            }
        };

        for field in &fields_named.named {
            let settings = self.field_settings(field)?;
            self.fields.push(settings);
        }

        Ok(self)
    }

    fn field_settings(&self, field: &Field) -> Result<FieldSettings, syn::Error> {
        let ident = field.ident.clone().ok_or_else(|| {
            syn::Error::new_spanned(field, "internal error: identifier was not Some")
        })?;

        let field_name = ident.unraw().to_string();
        let mut mode = FieldMode::Attribute;
        let mut rename: Option<String> = None;
        let mut skip = false;

        for attr in &field.attrs {
            if attr.path().is_ident("partition_key") || attr.path().is_ident("sort_key") {
                let key_mode = if attr.path().is_ident("partition_key") {
                    FieldMode::PartitionKey
                } else {
                    FieldMode::SortKey
                };

                if mode != FieldMode::Attribute {
                    return Err(syn::Error::new_spanned(
                        attr,
                        format!("field '{field_name}' cannot be both partition key and sort key"),
                    ));
                }

                if let Some(existing) = self.fields.iter().find(|f| f.mode == key_mode) {
                    let key = match key_mode {
                        FieldMode::PartitionKey => "partition key",
                        _ => "sort key",
                    };

                    return Err(syn::Error::new_spanned(
                        field,
                        format!("{key} was already specified to be '{}'", existing.ident),
                    ));
                }

                mode = key_mode;
            }

            if attr.path().is_ident("dynamo") {
                attr.parse_nested_meta(|meta| {
                    let directive = meta.path.get_ident().map(|i| i.to_string());
                    match directive.as_deref() {
                        Some("rename") => {
                            let value = meta.value()?.parse::<LitStr>()?.value();

                            if value.is_empty() {
                                return Err(meta.error("attribute name must not be empty"));
                            }

                            rename = Some(value);
                            Ok(())
                        }
                        Some("skip") => {
                            skip = true;
                            Ok(())
                        }
                        _ => Err(meta.error("unsupported field attribute")),
                    }
                })?;
            }
        }

        if skip {
            if mode != FieldMode::Attribute {
                return Err(syn::Error::new_spanned(
                    field,
                    format!("key field '{field_name}' cannot be skipped"),
                ));
            }

            mode = FieldMode::Skipped;
        }

        let name = match (rename, self.rename_all) {
            (Some(name), _) => name,
            (None, Some(rule)) => rule.apply(&field_name),
            (None, None) => field_name,
        };

        Ok(FieldSettings { ident, name, mode })
    }

    pub(crate) fn build(self) -> Result<Settings, syn::Error> {
        let SettingsBuilder {
            ident,
            type_name,
            rename_all: _,
            fields,
        } = self;

        let settings = Settings {
            ident,
            type_name,
            fields,
        };

        if settings.stored_fields().is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("record '{}' must store at least one field", settings.type_name),
            ));
        }

        if let Some(name) = settings.attribute_names().into_iter().duplicates().next() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("attribute name '{name}' is used by more than one field"),
            ));
        }

        let modes = settings
            .stored_fields()
            .iter()
            .map(|field| field.mode)
            .collect::<Vec<_>>();

        if modes.contains(&FieldMode::SortKey) && !modes.contains(&FieldMode::PartitionKey) {
            return Err(syn::Error::new(
                Span::call_site(),
                "a #[sort_key] requires a #[partition_key] field",
            ));
        }

        Ok(settings)
    }
}
