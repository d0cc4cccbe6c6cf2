//! Stores documents are written to and read from.
//!
//! The mapper itself never talks to a database. A [`DocumentStore`] takes encoded
//! documents and addresses them by [`Key`]; [`Table`](crate::Table) puts the two
//! together for a record type.

mod dynamo;
mod limits;
mod memory;

pub use limits::NumberLimits;
pub use memory::InMemoryStore;

use crate::{
    errors::StoreError,
    schema::{same_key_value, Key},
    AttributeValue, Document,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Selects the documents of a single partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    name: String,
    value: AttributeValue,
}

impl KeyCondition {
    pub fn partition_eq(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn matches(&self, document: &Document) -> bool {
        same_key_value(document.get(&self.name), &self.value)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write `document`, replacing any document stored under the same key.
    async fn put(&self, table: &str, document: Document) -> Result<(), StoreError>;

    async fn get(&self, table: &str, key: &Key) -> Result<Option<Document>, StoreError>;

    /// Remove the document stored under `key`. Removing a missing document is not an error.
    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError>;

    /// All documents of the partition selected by `condition`.
    async fn query(
        &self,
        table: &str,
        condition: &KeyCondition,
    ) -> Result<Vec<Document>, StoreError>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn put(&self, table: &str, document: Document) -> Result<(), StoreError> {
        self.as_ref().put(table, document).await
    }

    async fn get(&self, table: &str, key: &Key) -> Result<Option<Document>, StoreError> {
        self.as_ref().get(table, key).await
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        self.as_ref().delete(table, key).await
    }

    async fn query(
        &self,
        table: &str,
        condition: &KeyCondition,
    ) -> Result<Vec<Document>, StoreError> {
        self.as_ref().query(table, condition).await
    }
}
