//! Conversion of whole records to and from documents.
//!
//! The codec is stateless: every call resolves the record's descriptor from the
//! [`SchemaRegistry::global`] registry and walks it. Nested records recurse through the
//! same registry, there is no depth limit.

use crate::{
    errors::{DecodeError, EncodeError, SchemaError},
    schema::{SchemaDescriptor, SchemaRegistry, Shape},
    traits::Record,
    AttributeValue, Document,
};
use std::sync::Arc;

/// The cached descriptor of `T`, computing it on first use.
pub fn describe<T: Record>() -> Result<Arc<SchemaDescriptor<T>>, SchemaError> {
    SchemaRegistry::global().get::<T>()
}

/// Encode `record` as a document.
pub fn encode<T: Record>(record: &T) -> Result<Document, EncodeError> {
    describe::<T>()?.encode(record)
}

/// Decode a record of type `T` from `document`.
pub fn decode<T: Record>(document: Document) -> Result<T, DecodeError> {
    describe::<T>()?.decode(document)
}

/// Encode a record nested inside another record as a `Map` attribute.
///
/// Used by the [`Attribute`](crate::traits::Attribute) implementation that
/// `#[derive(Record)]` generates.
pub fn encode_nested<T: Record>(record: &T) -> Result<AttributeValue, EncodeError> {
    encode(record).map(AttributeValue::Map)
}

/// Decode a record nested inside another record from a `Map` attribute.
pub fn decode_nested<T: Record>(value: AttributeValue) -> Result<T, DecodeError> {
    match value {
        AttributeValue::Map(document) => decode(document),
        other => {
            let expected = describe::<T>()
                .map(|descriptor| Shape::Record(descriptor.type_name()))
                .unwrap_or(Shape::Record("record"));

            Err(DecodeError::type_mismatch(expected, other.type_name()))
        }
    }
}
