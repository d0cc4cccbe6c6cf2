use crate::{
    errors::{DecodeError, DecodeReason, EncodeError, EncodeReason, SchemaError},
    schema::{SchemaDescriptor, Shape},
    AttributeValue,
};

mod primary_key;
pub use primary_key::*;

/// Conversion between a native value and an [`AttributeValue`].
///
/// These are analogous to serde's `Serialize` and `Deserialize`, with the shape of the
/// value known statically so that schemas can be described without a value at hand.
pub trait Attribute: Sized {
    /// Whether an absent attribute decodes to a value (`None`) rather than an error.
    const NULLABLE: bool = false;

    /// The document encoding of this type.
    fn shape() -> Shape;

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError>;

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError>;

    /// Encode the value, or `None` if the value is absent and should be omitted from
    /// its parent map.
    fn to_optional_attribute(&self) -> Result<Option<AttributeValue>, EncodeError> {
        self.to_attribute().map(Some)
    }

    /// Decode from an attribute that may be missing from its parent map.
    fn try_from_optional_attribute(value: Option<AttributeValue>) -> Result<Self, DecodeError> {
        match value {
            Some(value) => Self::try_from_attribute(value),
            None => Err(DecodeError::new(DecodeReason::MissingRequiredField)),
        }
    }
}

/// The variant a set is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    String,
    Number,
    Binary,
}

impl SetKind {
    pub fn shape(self) -> Shape {
        match self {
            Self::String => Shape::StringSet,
            Self::Number => Shape::NumberSet,
            Self::Binary => Shape::BinarySet,
        }
    }

    /// Build a set attribute from the encoded members, which must all be scalars of
    /// this kind. Fails with `EmptySet` if there are no members.
    pub(crate) fn collect(
        self,
        members: Vec<AttributeValue>,
    ) -> Result<AttributeValue, EncodeError> {
        fn unexpected(kind: SetKind, member: &AttributeValue) -> EncodeError {
            EncodeError::new(EncodeReason::UnsupportedShape(format!(
                "{} member in {}",
                member.type_name(),
                kind.shape()
            )))
        }

        let members = members.into_iter();

        match self {
            Self::String => AttributeValue::string_set(
                members
                    .map(|member| match member {
                        AttributeValue::String(s) => Ok(s),
                        other => Err(unexpected(self, &other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Number => AttributeValue::number_set(
                members
                    .map(|member| match member {
                        AttributeValue::Number(n) => Ok(n),
                        other => Err(unexpected(self, &other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Binary => AttributeValue::binary_set(
                members
                    .map(|member| match member {
                        AttributeValue::Binary(b) => Ok(b),
                        other => Err(unexpected(self, &other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        }
    }

    /// Split a set attribute back into scalar members.
    pub(crate) fn members(self, value: AttributeValue) -> Result<Vec<AttributeValue>, DecodeError> {
        match (self, value) {
            (Self::String, AttributeValue::StringSet(set)) => {
                Ok(set.into_iter().map(AttributeValue::String).collect())
            }
            (Self::Number, AttributeValue::NumberSet(set)) => {
                Ok(set.into_iter().map(AttributeValue::Number).collect())
            }
            (Self::Binary, AttributeValue::BinarySet(set)) => {
                Ok(set.into_iter().map(AttributeValue::Binary).collect())
            }
            (kind, other) => Err(DecodeError::type_mismatch(kind.shape(), other.type_name())),
        }
    }
}

/// Types that can be members of a `BTreeSet` or `HashSet` field, stored as a typed set.
pub trait SetElement: Attribute {
    const SET_KIND: SetKind;
}

/// A structured type with a fixed set of named fields that maps to a document.
///
/// Implement this with `#[derive(Record)]`, or by hand with
/// [`SchemaDescriptor::builder`] for types that are assembled through builders or setters.
pub trait Record: Sized + 'static {
    /// Describe the fields of this type. Called once per type, the result is cached by
    /// the [`SchemaRegistry`](crate::schema::SchemaRegistry).
    fn describe() -> Result<SchemaDescriptor<Self>, SchemaError>;
}
