//! Map strongly typed Rust records to DynamoDB attribute documents and back.
//!
//! A record is any struct implementing [`Record`], usually through `#[derive(Record)]`:
//!
//! ```
//! use dynamodb_mapper::{decode, encode, AttributeValue, Record};
//!
//! #[derive(Debug, PartialEq, Record)]
//! #[dynamo(rename_all = "camelCase")]
//! struct Item {
//!     #[partition_key]
//!     partition_key: String,
//!     #[sort_key]
//!     sort_key: i32,
//!     string_attribute: Option<String>,
//! }
//!
//! let item = Item {
//!     partition_key: "abc".into(),
//!     sort_key: 12345,
//!     string_attribute: Some("hello".into()),
//! };
//!
//! let document = encode(&item).unwrap();
//! assert_eq!(document["sortKey"], AttributeValue::Number("12345".into()));
//!
//! assert_eq!(decode::<Item>(document).unwrap(), item);
//! ```
//!
//! Records can also be registered by hand with [`schema::SchemaDescriptor::builder`],
//! which suits types built through builders or setters. Encoded documents are stored with
//! a [`Table`] on any [`store::DocumentStore`], including `aws_sdk_dynamodb::Client`.

// Lets the derive macro refer to this crate by name from inside it
extern crate self as dynamodb_mapper;

pub mod attribute;
pub mod codec;
pub mod errors;
pub mod schema;
pub mod store;
mod table;
pub mod traits;

#[cfg(feature = "conformance")]
pub mod conformance;

pub use attribute::{AttributeValue, Document};
pub use codec::{decode, describe, encode};
pub use errors::Error;
pub use table::Table;
pub use traits::{Attribute, Pk, PkSk, PrimaryKey, Record};

pub use dynamodb_mapper_derive::Record;
