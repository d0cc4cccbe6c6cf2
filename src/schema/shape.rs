use crate::AttributeValue;
use std::fmt;

/// The declared document encoding of a field, derived from its native type.
///
/// Shapes are what [`SchemaDescriptor`](super::SchemaDescriptor) exposes for
/// introspection, and what the codec checks an incoming attribute against before the
/// value is converted back to its native type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    String,
    Number,
    Bool,
    Binary,
    List(Box<Shape>),
    Map(Box<Shape>),
    StringSet,
    NumberSet,
    BinarySet,
    /// A nested record, encoded as a `Map` by its own schema.
    Record(&'static str),
    /// A raw [`AttributeValue`] passed through unchanged.
    Document,
}

impl Shape {
    pub fn list_of(element: Shape) -> Self {
        Shape::List(Box::new(element))
    }

    pub fn map_of(value: Shape) -> Self {
        Shape::Map(Box::new(value))
    }

    /// Returns true if `value` has the variant this shape is encoded as.
    ///
    /// Only the outermost variant is checked, elements of lists and maps are checked
    /// as they are converted.
    pub fn admits(&self, value: &AttributeValue) -> bool {
        matches!(
            (self, value),
            (Shape::Document, _)
                | (Shape::String, AttributeValue::String(_))
                | (Shape::Number, AttributeValue::Number(_))
                | (Shape::Bool, AttributeValue::Bool(_))
                | (Shape::Binary, AttributeValue::Binary(_))
                | (Shape::List(_), AttributeValue::List(_))
                | (Shape::Map(_), AttributeValue::Map(_))
                | (Shape::Record(_), AttributeValue::Map(_))
                | (Shape::StringSet, AttributeValue::StringSet(_))
                | (Shape::NumberSet, AttributeValue::NumberSet(_))
                | (Shape::BinarySet, AttributeValue::BinarySet(_))
        )
    }

    /// Key attributes of a table must be scalar strings, numbers or binaries.
    pub fn is_key_scalar(&self) -> bool {
        matches!(self, Shape::String | Shape::Number | Shape::Binary)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::String => f.write_str("String"),
            Shape::Number => f.write_str("Number"),
            Shape::Bool => f.write_str("Bool"),
            Shape::Binary => f.write_str("Binary"),
            Shape::List(element) => write!(f, "List<{element}>"),
            Shape::Map(value) => write!(f, "Map<{value}>"),
            Shape::StringSet => f.write_str("StringSet"),
            Shape::NumberSet => f.write_str("NumberSet"),
            Shape::BinarySet => f.write_str("BinarySet"),
            Shape::Record(name) => write!(f, "Record({name})"),
            Shape::Document => f.write_str("AttributeValue"),
        }
    }
}
