mod builder;
mod case;

use self::builder::SettingsBuilder;
pub(crate) use self::case::RenameRule;
use itertools::Itertools;
use proc_macro2::Ident;
use syn::DeriveInput;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldMode {
    PartitionKey,
    SortKey,
    Attribute,
    /// Not stored, rebuilt with `Default` (like serde)
    Skipped,
}

pub(crate) struct FieldSettings {
    pub(crate) ident: Ident,
    /// The attribute name in the document
    pub(crate) name: String,
    pub(crate) mode: FieldMode,
}

pub(crate) struct Settings {
    ident: Ident,
    pub(crate) type_name: String,
    fields: Vec<FieldSettings>,
}

impl Settings {
    pub(crate) fn builder(input: &DeriveInput) -> SettingsBuilder {
        SettingsBuilder::new(input)
    }

    pub(crate) fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Fields that are stored, in declaration order.
    pub(crate) fn stored_fields(&self) -> Vec<&FieldSettings> {
        self.fields
            .iter()
            .filter(|field| field.mode != FieldMode::Skipped)
            .collect()
    }

    pub(crate) fn skipped_fields(&self) -> Vec<&FieldSettings> {
        self.fields
            .iter()
            .filter(|field| field.mode == FieldMode::Skipped)
            .collect()
    }

    /// Attribute names of the stored fields, sorted. Used to report clashes.
    pub(crate) fn attribute_names(&self) -> Vec<&str> {
        self.stored_fields()
            .into_iter()
            .map(|field| field.name.as_str())
            .sorted()
            .collect()
    }
}
