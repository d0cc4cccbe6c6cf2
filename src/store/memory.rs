use super::{DocumentStore, KeyCondition};
use crate::{
    attribute::number::Decimal,
    errors::{SchemaError, StoreError},
    schema::{Key, KeySchema},
    traits::Record,
    AttributeValue, Document,
};
use async_trait::async_trait;
use log::debug;
use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

struct MemoryTable {
    key_schema: KeySchema,
    documents: Vec<Document>,
}

/// A [`DocumentStore`] holding documents in process memory.
///
/// Tables have to be defined with their key schema before they are used, like tables
/// created ahead of time in DynamoDB.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, MemoryTable>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine and empty) table `name`.
    pub fn define_table(&self, name: impl Into<String>, key_schema: KeySchema) {
        let name = name.into();
        debug!("Defining in-memory table {name}");

        self.lock().insert(
            name,
            MemoryTable {
                key_schema,
                documents: Vec::new(),
            },
        );
    }

    /// Define table `name` with the key schema of record type `R`.
    pub fn define_table_for<R: Record>(&self, name: impl Into<String>) -> Result<(), SchemaError> {
        let key_schema = crate::describe::<R>()?.key_schema()?;
        self.define_table(name, key_schema);
        Ok(())
    }

    /// Number of documents in table `name`.
    pub fn len(&self, table: &str) -> Result<usize, StoreError> {
        self.with_table(table, |t| t.documents.len())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, MemoryTable>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_table<F, T>(&self, table: &str, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut MemoryTable) -> T,
    {
        self.lock()
            .get_mut(table)
            .map(f)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn put(&self, table: &str, document: Document) -> Result<(), StoreError> {
        self.with_table(table, |t| -> Result<(), StoreError> {
            let key = t.key_schema.key_of(&document)?;

            match t.documents.iter_mut().find(|existing| key.matches(existing)) {
                Some(existing) => *existing = document,
                None => t.documents.push(document),
            }

            Ok(())
        })?
    }

    async fn get(&self, table: &str, key: &Key) -> Result<Option<Document>, StoreError> {
        self.with_table(table, |t| {
            t.documents
                .iter()
                .find(|document| key.matches(document))
                .cloned()
        })
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        self.with_table(table, |t| t.documents.retain(|document| !key.matches(document)))
    }

    async fn query(
        &self,
        table: &str,
        condition: &KeyCondition,
    ) -> Result<Vec<Document>, StoreError> {
        self.with_table(table, |t| {
            let mut documents = t
                .documents
                .iter()
                .filter(|document| condition.matches(document))
                .cloned()
                .collect::<Vec<_>>();

            if let Some(sort) = t.key_schema.sort_key() {
                documents.sort_by(|a, b| compare_keys(a.get(&sort.name), b.get(&sort.name)));
            }

            documents
        })
    }
}

/// Orders sort key values the way DynamoDB does: numbers by exact decimal value, strings
/// and binaries by their bytes.
fn compare_keys(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> Ordering {
    match (a, b) {
        (Some(AttributeValue::Number(a)), Some(AttributeValue::Number(b))) => {
            match (Decimal::parse(a), Decimal::parse(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => Ordering::Equal,
            }
        }
        (Some(AttributeValue::String(a)), Some(AttributeValue::String(b))) => a.cmp(b),
        (Some(AttributeValue::Binary(a)), Some(AttributeValue::Binary(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
