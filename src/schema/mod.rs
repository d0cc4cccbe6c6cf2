//! Descriptions of record types: which fields they have, how each field is encoded and
//! how a record is assembled again from decoded field values.

mod key;
mod registry;
mod shape;

pub(crate) use key::same_key_value;
pub use key::{Key, KeyAttribute, KeySchema};
pub use registry::SchemaRegistry;
pub use shape::Shape;

use crate::{
    errors::{DecodeError, DecodeReason, EncodeError, EncodeReason, SchemaError},
    traits::Attribute,
    AttributeValue, Document,
};
use itertools::Itertools;
use log::trace;
use std::{borrow::Cow, collections::HashSet, fmt};

/// The role a field plays in the table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    PartitionKey,
    SortKey,
    Attribute,
}

type EncodeFn<T> = Box<dyn Fn(&T) -> Result<Option<AttributeValue>, EncodeError> + Send + Sync>;

/// Assembles a record from its decoded fields.
pub type RecordFactory<T> = fn(&mut FieldValues) -> Result<T, DecodeError>;

pub struct FieldDescriptor<T> {
    name: Cow<'static, str>,
    kind: FieldKind,
    shape: Shape,
    nullable: bool,
    encode: EncodeFn<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Read this field from `record` and encode it, `None` if the value is absent.
    pub fn encode(&self, record: &T) -> Result<Option<AttributeValue>, EncodeError> {
        (self.encode)(record).map_err(|e| e.in_field(&self.name))
    }
}

impl<T> PartialEq for FieldDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.shape == other.shape
            && self.nullable == other.nullable
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("shape", &self.shape)
            .field("nullable", &self.nullable)
            .finish()
    }
}

/// The schema of a record type `T`.
///
/// Descriptors are produced by [`Record::describe`](crate::traits::Record::describe),
/// either generated by `#[derive(Record)]` or written by hand with
/// [`SchemaDescriptor::builder`], and cached by the [`SchemaRegistry`].
pub struct SchemaDescriptor<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
    factory: RecordFactory<T>,
}

impl<T> SchemaDescriptor<T> {
    pub fn builder(type_name: &'static str) -> SchemaDescriptorBuilder<T> {
        SchemaDescriptorBuilder {
            type_name,
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn partition_key(&self) -> Option<&FieldDescriptor<T>> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::PartitionKey)
    }

    pub fn sort_key(&self) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.kind == FieldKind::SortKey)
    }

    /// The key schema of a table storing this record type.
    ///
    /// Fails if the record has no partition key or a key field is not a non-nullable
    /// String, Number or Binary.
    pub fn key_schema(&self) -> Result<KeySchema, SchemaError> {
        KeySchema::of(self)
    }

    /// The primary key of `record`.
    pub fn key_of(&self, record: &T) -> Result<Key, EncodeError> {
        let schema = self.key_schema()?;

        let encode_key = |field: Option<&FieldDescriptor<T>>| -> Result<_, EncodeError> {
            match field {
                Some(field) => field.encode(record)?.map(Some).ok_or_else(|| {
                    EncodeError::new(EncodeReason::UnsupportedShape(
                        "key attribute is absent".to_string(),
                    ))
                    .in_field(&field.name)
                }),
                None => Ok(None),
            }
        };

        let pk = encode_key(self.partition_key())?;
        let sk = encode_key(self.sort_key())?;

        // Both are present whenever the key schema is valid
        let pk = pk.ok_or_else(|| SchemaError::MissingPartitionKey(self.type_name.to_string()))?;

        Ok(schema.key(pk, sk))
    }

    /// Encode `record` to a document. Absent fields are omitted.
    pub fn encode(&self, record: &T) -> Result<Document, EncodeError> {
        let mut document = Document::new();

        for field in self.fields.iter() {
            if let Some(value) = field.encode(record)? {
                document.insert(field.name.to_string(), value);
            }
        }

        trace!(
            "Encoded {} with attributes {}",
            self.type_name,
            document.keys().join(",")
        );

        Ok(document)
    }

    /// Decode a record from `document`.
    ///
    /// Absent and `Null` entries both decode as absent, which is only accepted for
    /// nullable fields. Entries that name no field are ignored.
    pub fn decode(&self, mut document: Document) -> Result<T, DecodeError> {
        let mut values = Vec::with_capacity(self.fields.len());

        for field in self.fields.iter() {
            let value = match document.remove(field.name()) {
                Some(value) if value.is_null() && !field.shape.admits(&value) => None,
                Some(value) if !field.shape.admits(&value) => {
                    return Err(
                        DecodeError::type_mismatch(&field.shape, value.type_name())
                            .in_field(&field.name),
                    );
                }
                value => value,
            };

            if value.is_none() && !field.nullable {
                return Err(
                    DecodeError::new(DecodeReason::MissingRequiredField).in_field(&field.name)
                );
            }

            values.push((field.name.clone(), value));
        }

        (self.factory)(&mut FieldValues {
            type_name: self.type_name,
            values,
        })
    }
}

impl<T> PartialEq for SchemaDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.fields == other.fields
    }
}

impl<T> fmt::Debug for SchemaDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Registers the fields of a record type one by one.
///
/// ```
/// use dynamodb_mapper::{errors::SchemaError, schema::SchemaDescriptor, Record};
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     email: String,
///     name: Option<String>,
/// }
///
/// impl Record for User {
///     fn describe() -> Result<SchemaDescriptor<Self>, SchemaError> {
///         SchemaDescriptor::builder("User")
///             .partition_key("email", |user: &Self| &user.email)
///             .attribute("name", |user: &Self| &user.name)
///             .build(|fields| {
///                 Ok(User {
///                     email: fields.take("email")?,
///                     name: fields.take("name")?,
///                 })
///             })
///     }
/// }
/// ```
pub struct SchemaDescriptorBuilder<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: 'static> SchemaDescriptorBuilder<T> {
    pub fn partition_key<V, F>(self, name: impl Into<Cow<'static, str>>, get: F) -> Self
    where
        V: Attribute,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.field(name, FieldKind::PartitionKey, get)
    }

    pub fn sort_key<V, F>(self, name: impl Into<Cow<'static, str>>, get: F) -> Self
    where
        V: Attribute,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.field(name, FieldKind::SortKey, get)
    }

    pub fn attribute<V, F>(self, name: impl Into<Cow<'static, str>>, get: F) -> Self
    where
        V: Attribute,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.field(name, FieldKind::Attribute, get)
    }

    /// Add a field read through `get`. Its shape and nullability follow from `V`.
    pub fn field<V, F>(mut self, name: impl Into<Cow<'static, str>>, kind: FieldKind, get: F) -> Self
    where
        V: Attribute,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
            shape: V::shape(),
            nullable: V::NULLABLE,
            encode: Box::new(move |record| get(record).to_optional_attribute()),
        });

        self
    }

    /// Validate the registered fields and finish the descriptor.
    pub fn build(self, factory: RecordFactory<T>) -> Result<SchemaDescriptor<T>, SchemaError> {
        let type_name = self.type_name;

        if self.fields.is_empty() {
            return Err(SchemaError::ZeroFields(type_name.to_string()));
        }

        let mut seen = HashSet::new();
        let mut partition_key: Option<&str> = None;
        let mut sort_key: Option<&str> = None;

        for field in self.fields.iter() {
            let name = field.name();

            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName(type_name.to_string()));
            }

            if !seen.insert(name) {
                return Err(SchemaError::DuplicateField {
                    type_name: type_name.to_string(),
                    field: name.to_string(),
                });
            }

            let duplicate = match field.kind {
                FieldKind::PartitionKey => partition_key.replace(name).map(|existing| {
                    SchemaError::DuplicatePartitionKey {
                        type_name: type_name.to_string(),
                        existing: existing.to_string(),
                        field: name.to_string(),
                    }
                }),
                FieldKind::SortKey => sort_key.replace(name).map(|existing| {
                    SchemaError::DuplicateSortKey {
                        type_name: type_name.to_string(),
                        existing: existing.to_string(),
                        field: name.to_string(),
                    }
                }),
                FieldKind::Attribute => None,
            };

            if let Some(error) = duplicate {
                return Err(error);
            }
        }

        if let (None, Some(sort_key)) = (partition_key, sort_key) {
            return Err(SchemaError::SortKeyWithoutPartitionKey {
                type_name: type_name.to_string(),
                field: sort_key.to_string(),
            });
        }

        Ok(SchemaDescriptor {
            type_name,
            fields: self.fields,
            factory,
        })
    }
}

/// The decoded fields of a document, handed to a [`RecordFactory`] in declaration order.
///
/// Each field is taken exactly once and converted to its native type.
pub struct FieldValues {
    type_name: &'static str,
    values: Vec<(Cow<'static, str>, Option<AttributeValue>)>,
}

impl FieldValues {
    /// Take the value of field `name` and convert it to `V`.
    pub fn take<V: Attribute>(&mut self, name: &str) -> Result<V, DecodeError> {
        let slot = self
            .values
            .iter_mut()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
            .ok_or_else(|| {
                DecodeError::new(DecodeReason::UnsupportedShape(format!(
                    "field '{name}' is not declared by {}",
                    self.type_name
                )))
            })?;

        V::try_from_optional_attribute(slot.take()).map_err(|e| e.in_field(name))
    }

    /// Names of the fields in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_ref())
    }
}
