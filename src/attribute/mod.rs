mod aws;
mod convert;
mod json;
pub mod number;

pub use aws::{from_item, to_item, DynamoItem};
pub use json::document_to_json;

use crate::errors::{EncodeError, EncodeReason};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// A document as stored in a table: attribute names mapped to values.
pub type Document = BTreeMap<String, AttributeValue>;

/// A single value of the attribute document model.
///
/// Equality is structural and sensitive to the variant, so `Number("1")` never equals
/// `String("1")`. Sets are never empty once validated, see [`AttributeValue::validate`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AttributeValue {
    String(String),
    Number(String),
    Bool(bool),
    Binary(Vec<u8>),
    Null,

    List(Vec<AttributeValue>),
    Map(Document),

    StringSet(BTreeSet<String>),
    NumberSet(BTreeSet<String>),
    BinarySet(BTreeSet<Vec<u8>>),
}

impl AttributeValue {
    /// Create a `Number` from a float, rejecting NaN and infinities.
    /// `-0.0` is stored as `0`.
    pub fn from_f64(value: f64) -> Result<Self, EncodeError> {
        number::format_f64(value).map(Self::Number)
    }

    pub fn from_f32(value: f32) -> Result<Self, EncodeError> {
        number::format_f32(value).map(Self::Number)
    }

    pub fn string_set<I, S>(values: I) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        non_empty(set).map(Self::StringSet)
    }

    pub fn number_set<I, S>(values: I) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        non_empty(set).map(Self::NumberSet)
    }

    pub fn binary_set<I, B>(values: I) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let set: BTreeSet<Vec<u8>> = values.into_iter().map(Into::into).collect();
        non_empty(set).map(Self::BinarySet)
    }

    pub fn new_map() -> Self {
        AttributeValue::Map(Document::new())
    }

    /// Name of the variant, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
            Self::Bool(_) => "Bool",
            Self::Binary(_) => "Binary",
            Self::Null => "Null",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::StringSet(_) => "StringSet",
            Self::NumberSet(_) => "NumberSet",
            Self::BinarySet(_) => "BinarySet",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&str> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Document> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Try to insert a new key-value pair if this is a map.
    /// Returns `Ok(())` if the key-value pair was inserted, otherwise an `UnsupportedShape` error.
    pub fn try_insert_map(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<(), EncodeError> {
        if let Self::Map(map) = self {
            map.insert(key.into(), value.into());
            Ok(())
        } else {
            Err(EncodeError::new(EncodeReason::UnsupportedShape(format!(
                "expected Map, found {}",
                self.type_name()
            ))))
        }
    }

    /// Check the invariants of this value and everything nested in it:
    /// sets are non-empty, map keys are non-empty and numbers are well formed decimals.
    pub fn validate(&self) -> Result<(), EncodeError> {
        match self {
            Self::Number(n) => validate_number(n),
            Self::StringSet(set) | Self::NumberSet(set) if set.is_empty() => {
                Err(EncodeError::new(EncodeReason::EmptySet))
            }
            Self::BinarySet(set) if set.is_empty() => Err(EncodeError::new(EncodeReason::EmptySet)),
            Self::NumberSet(set) => set.iter().try_for_each(|n| validate_number(n)),
            Self::List(list) => list
                .iter()
                .enumerate()
                .try_for_each(|(i, value)| value.validate().map_err(|e| e.in_index(i))),
            Self::Map(map) => validate_document(map),
            _ => Ok(()),
        }
    }
}

/// Validate every attribute of a top level document, see [`AttributeValue::validate`].
pub fn validate_document(document: &Document) -> Result<(), EncodeError> {
    document.iter().try_for_each(|(key, value)| {
        if key.is_empty() {
            return Err(EncodeError::new(EncodeReason::EmptyKey));
        }
        value.validate().map_err(|e| e.in_key(key))
    })
}

fn validate_number(value: &str) -> Result<(), EncodeError> {
    if number::is_valid_number(value) {
        Ok(())
    } else {
        Err(EncodeError::new(EncodeReason::UnsupportedShape(format!(
            "malformed number '{value}'"
        ))))
    }
}

fn non_empty<T>(set: BTreeSet<T>) -> Result<BTreeSet<T>, EncodeError> {
    if set.is_empty() {
        Err(EncodeError::new(EncodeReason::EmptySet))
    } else {
        Ok(set)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => f.write_str(n),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Binary(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Null => f.write_str("null"),
            Self::List(list) => {
                f.write_str("[")?;
                for (i, value) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::StringSet(set) => write_set(f, set.iter().map(|s| format!("{s:?}"))),
            Self::NumberSet(set) => write_set(f, set.iter().cloned()),
            Self::BinarySet(set) => {
                write_set(f, set.iter().map(|b| format!("0x{}", hex::encode(b))))
            }
        }
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = String>) -> fmt::Result {
    f.write_str("<<")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&item)?;
    }
    f.write_str(">>")
}
