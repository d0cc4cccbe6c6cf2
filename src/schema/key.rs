use super::{FieldDescriptor, SchemaDescriptor, Shape};
use crate::{
    attribute::number::same_number,
    errors::{KeyError, SchemaError},
    traits::PrimaryKeyParts,
    AttributeValue, Document,
};

/// A key attribute of a table: its name and the scalar shape its values must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub shape: Shape,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Check that `value` can be stored in this key attribute.
    pub fn check(&self, value: &AttributeValue) -> Result<(), KeyError> {
        if self.shape.admits(value) {
            Ok(())
        } else {
            Err(KeyError::ShapeMismatch {
                name: self.name.clone(),
                expected: self.shape.to_string(),
                found: value.type_name(),
            })
        }
    }
}

/// The primary key layout of a table: a partition key and an optional sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    partition: KeyAttribute,
    sort: Option<KeyAttribute>,
}

impl KeySchema {
    pub fn new(partition: KeyAttribute) -> Self {
        Self {
            partition,
            sort: None,
        }
    }

    pub fn with_sort_key(mut self, sort: KeyAttribute) -> Self {
        self.sort = Some(sort);
        self
    }

    /// The key schema of the table storing records described by `descriptor`.
    pub fn of<T>(descriptor: &SchemaDescriptor<T>) -> Result<Self, SchemaError> {
        let type_name = descriptor.type_name();

        let partition = descriptor
            .partition_key()
            .ok_or_else(|| SchemaError::MissingPartitionKey(type_name.to_string()))
            .and_then(|field| key_attribute(type_name, field))?;

        let sort = descriptor
            .sort_key()
            .map(|field| key_attribute(type_name, field))
            .transpose()?;

        Ok(Self { partition, sort })
    }

    pub fn partition_key(&self) -> &KeyAttribute {
        &self.partition
    }

    pub fn sort_key(&self) -> Option<&KeyAttribute> {
        self.sort.as_ref()
    }

    /// Name the values of a key supplied independently of a record.
    pub fn bind(&self, parts: PrimaryKeyParts) -> Result<Key, KeyError> {
        self.partition.check(&parts.pk)?;

        let sort = match (&self.sort, parts.sk) {
            (Some(sort), Some(sk)) => {
                sort.check(&sk)?;
                Some((sort.name.clone(), sk))
            }
            (Some(sort), None) => return Err(KeyError::MissingSortKey(sort.name.clone())),
            (None, Some(_)) => return Err(KeyError::UnexpectedSortKey),
            (None, None) => None,
        };

        Ok(Key {
            partition: (self.partition.name.clone(), parts.pk),
            sort,
        })
    }

    /// Extract the key of a stored document.
    pub fn key_of(&self, document: &Document) -> Result<Key, KeyError> {
        let pk = lookup(&self.partition, document)?;
        let sk = self
            .sort
            .as_ref()
            .map(|sort| lookup(sort, document))
            .transpose()?;

        self.bind(PrimaryKeyParts { pk, sk })
    }

    /// Build a key from values already known to fit this schema.
    pub(crate) fn key(&self, pk: AttributeValue, sk: Option<AttributeValue>) -> Key {
        Key {
            partition: (self.partition.name.clone(), pk),
            sort: self.sort.as_ref().zip(sk).map(|(s, sk)| (s.name.clone(), sk)),
        }
    }
}

fn key_attribute<T>(
    type_name: &str,
    field: &FieldDescriptor<T>,
) -> Result<KeyAttribute, SchemaError> {
    if field.is_nullable() || !field.shape().is_key_scalar() {
        let shape = if field.is_nullable() {
            format!("nullable {}", field.shape())
        } else {
            field.shape().to_string()
        };

        return Err(SchemaError::InvalidKey {
            type_name: type_name.to_string(),
            field: field.name().to_string(),
            shape,
        });
    }

    Ok(KeyAttribute::new(field.name(), field.shape().clone()))
}

fn lookup(attribute: &KeyAttribute, document: &Document) -> Result<AttributeValue, KeyError> {
    document
        .get(&attribute.name)
        .cloned()
        .ok_or_else(|| KeyError::MissingAttribute(attribute.name.clone()))
}

/// The primary key of a stored document, with the attribute names it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    partition: (String, AttributeValue),
    sort: Option<(String, AttributeValue)>,
}

impl Key {
    pub fn partition_name(&self) -> &str {
        &self.partition.0
    }

    pub fn partition_value(&self) -> &AttributeValue {
        &self.partition.1
    }

    pub fn sort_name(&self) -> Option<&str> {
        self.sort.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn sort_value(&self) -> Option<&AttributeValue> {
        self.sort.as_ref().map(|(_, value)| value)
    }

    /// Returns true if `document` is stored under this key.
    pub fn matches(&self, document: &Document) -> bool {
        let (pk_name, pk) = &self.partition;

        same_key_value(document.get(pk_name), pk)
            && self
                .sort
                .as_ref()
                .map(|(sk_name, sk)| same_key_value(document.get(sk_name), sk))
                .unwrap_or(true)
    }

    /// The key values without their attribute names.
    pub fn into_parts(self) -> PrimaryKeyParts {
        PrimaryKeyParts {
            pk: self.partition.1,
            sk: self.sort.map(|(_, sk)| sk),
        }
    }

    /// The key attributes as a document, as sent to a store to address an item.
    pub fn to_document(&self) -> Document {
        std::iter::once(&self.partition)
            .chain(self.sort.as_ref())
            .cloned()
            .collect()
    }
}

/// Key values are equal when they hold the same scalar; numbers compare by value, so
/// `1` and `1.0` address the same item.
pub(crate) fn same_key_value(found: Option<&AttributeValue>, key: &AttributeValue) -> bool {
    match (found, key) {
        (Some(AttributeValue::Number(a)), AttributeValue::Number(b)) => same_number(a, b),
        (found, key) => found == Some(key),
    }
}
