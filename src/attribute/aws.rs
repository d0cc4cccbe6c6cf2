//! Conversion between documents and the item model of `aws-sdk-dynamodb`.

use super::{AttributeValue, Document};
use crate::errors::{DecodeError, DecodeReason};
use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue as DynamoValue};
use std::collections::{BTreeSet, HashMap};

/// An item as read from or written to DynamoDB.
pub type DynamoItem = HashMap<String, DynamoValue>;

impl From<AttributeValue> for DynamoValue {
    fn from(attribute: AttributeValue) -> Self {
        match attribute {
            AttributeValue::String(s) => DynamoValue::S(s),
            AttributeValue::StringSet(s) => DynamoValue::Ss(s.into_iter().collect()),

            AttributeValue::Number(n) => DynamoValue::N(n),
            AttributeValue::NumberSet(x) => DynamoValue::Ns(x.into_iter().collect()),

            AttributeValue::Binary(x) => DynamoValue::B(Blob::new(x)),
            AttributeValue::BinarySet(x) => {
                DynamoValue::Bs(x.into_iter().map(Blob::new).collect())
            }

            AttributeValue::Bool(x) => DynamoValue::Bool(x),
            AttributeValue::List(x) => DynamoValue::L(x.into_iter().map(|x| x.into()).collect()),
            AttributeValue::Map(x) => DynamoValue::M(to_item(x)),
            AttributeValue::Null => DynamoValue::Null(true),
        }
    }
}

impl TryFrom<DynamoValue> for AttributeValue {
    type Error = DecodeError;

    fn try_from(attribute: DynamoValue) -> Result<Self, Self::Error> {
        let value = match attribute {
            DynamoValue::S(s) => AttributeValue::String(s),
            DynamoValue::N(n) => AttributeValue::Number(n),
            DynamoValue::Bool(b) => AttributeValue::Bool(b),
            DynamoValue::B(b) => AttributeValue::Binary(b.into_inner()),
            DynamoValue::Null(_) => AttributeValue::Null,
            DynamoValue::L(l) => AttributeValue::List(
                l.into_iter()
                    .enumerate()
                    .map(|(i, x)| AttributeValue::try_from(x).map_err(|e| e.in_index(i)))
                    .collect::<Result<_, _>>()?,
            ),
            DynamoValue::M(m) => AttributeValue::Map(from_item(m)?),
            DynamoValue::Ss(x) => AttributeValue::StringSet(non_empty(x)?),
            DynamoValue::Ns(x) => AttributeValue::NumberSet(non_empty(x)?),
            DynamoValue::Bs(x) => {
                AttributeValue::BinarySet(non_empty(x.into_iter().map(Blob::into_inner))?)
            }

            x => {
                return Err(DecodeError::new(DecodeReason::UnsupportedShape(format!(
                    "unsupported DynamoDB attribute value: {x:?}"
                ))))
            }
        };

        Ok(value)
    }
}

fn non_empty<T: Ord>(items: impl IntoIterator<Item = T>) -> Result<BTreeSet<T>, DecodeError> {
    let set: BTreeSet<T> = items.into_iter().collect();

    if set.is_empty() {
        Err(DecodeError::new(DecodeReason::UnsupportedShape(
            "empty set".to_string(),
        )))
    } else {
        Ok(set)
    }
}

/// Convert a document to a DynamoDB item.
pub fn to_item(document: Document) -> DynamoItem {
    document
        .into_iter()
        .map(|(k, v)| (k, v.into()))
        .collect()
}

/// Convert a DynamoDB item to a document.
pub fn from_item(item: DynamoItem) -> Result<Document, DecodeError> {
    item.into_iter()
        .map(|(k, v)| {
            let value = AttributeValue::try_from(v).map_err(|e| e.in_key(&k))?;
            Ok((k, value))
        })
        .collect()
}
