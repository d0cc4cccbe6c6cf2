use crate::{
    errors::{DeleteError, EncodeError, GetError, InitError, PutError, QueryError},
    schema::{Key, KeySchema, SchemaDescriptor},
    store::{DocumentStore, KeyCondition, NumberLimits},
    traits::{PrimaryKey, Record},
    AttributeValue,
};
use aws_sdk_dynamodb::Client;
use log::{debug, info};
use std::sync::Arc;

/// A table of records of type `R`, stored as documents in `S`.
///
/// ```no_run
/// # use dynamodb_mapper::{Pk, Record, Table};
/// #[derive(Debug, Record)]
/// struct User {
///     #[partition_key]
///     email: String,
///     name: String,
/// }
///
/// # async fn run() -> Result<(), dynamodb_mapper::Error> {
/// let config = aws_config::from_env().load().await;
/// let client = aws_sdk_dynamodb::Client::new(&config);
///
/// let table = Table::<User>::init(client, "users")?;
///
/// table
///     .put(&User {
///         email: "dan@coderdan.co".into(),
///         name: "Dan Draper".into(),
///     })
///     .await?;
///
/// let _user: Option<User> = table.get(Pk::new("dan@coderdan.co")).await?;
/// # Ok(())
/// # }
/// ```
pub struct Table<R, S = Client> {
    store: S,
    table_name: String,
    descriptor: Arc<SchemaDescriptor<R>>,
    key_schema: KeySchema,
    number_limits: NumberLimits,
}

impl<R, S> Table<R, S>
where
    R: Record,
    S: DocumentStore,
{
    /// Open table `table_name` for records of type `R`.
    ///
    /// Fails if `R` has no valid schema, or its key fields cannot key a table.
    pub fn init(store: S, table_name: impl Into<String>) -> Result<Self, InitError> {
        let table_name = table_name.into();
        let descriptor = crate::describe::<R>()?;
        let key_schema = descriptor.key_schema()?;

        info!(
            "Opened table {table_name} for {} (partition key {})",
            descriptor.type_name(),
            key_schema.partition_key().name
        );

        Ok(Self {
            store,
            table_name,
            descriptor,
            key_schema,
            number_limits: NumberLimits::default(),
        })
    }

    /// Replace the limits numbers are checked against before they are written.
    pub fn with_number_limits(mut self, number_limits: NumberLimits) -> Self {
        self.number_limits = number_limits;
        self
    }

    pub fn name(&self) -> &str {
        &self.table_name
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn descriptor(&self) -> &SchemaDescriptor<R> {
        &self.descriptor
    }

    pub fn key_schema(&self) -> &KeySchema {
        &self.key_schema
    }

    /// The key `record` is stored under.
    pub fn key_of(&self, record: &R) -> Result<Key, EncodeError> {
        self.descriptor.key_of(record)
    }

    pub async fn put(&self, record: &R) -> Result<(), PutError> {
        let document = self.descriptor.encode(record)?;
        let key = self.key_schema.key_of(&document)?;
        self.number_limits.check(&document)?;

        debug!(
            "PUT {} {}={}",
            self.table_name,
            key.partition_name(),
            key.partition_value()
        );

        self.store.put(&self.table_name, document).await?;

        Ok(())
    }

    pub async fn get(&self, key: impl PrimaryKey) -> Result<Option<R>, GetError> {
        let key = self.key_schema.bind(key.into_parts())?;

        debug!(
            "GET {} {}={}",
            self.table_name,
            key.partition_name(),
            key.partition_value()
        );

        let document = self.store.get(&self.table_name, &key).await?;

        Ok(document
            .map(|document| self.descriptor.decode(document))
            .transpose()?)
    }

    pub async fn delete(&self, key: impl PrimaryKey) -> Result<(), DeleteError> {
        let key = self.key_schema.bind(key.into_parts())?;

        debug!(
            "DELETE {} {}={}",
            self.table_name,
            key.partition_name(),
            key.partition_value()
        );

        self.store.delete(&self.table_name, &key).await?;

        Ok(())
    }

    /// All records of a partition, ordered by sort key.
    pub async fn query(
        &self,
        partition: impl Into<AttributeValue>,
    ) -> Result<Vec<R>, QueryError> {
        let partition_key = self.key_schema.partition_key();
        let value = partition.into();
        partition_key.check(&value)?;

        debug!("QUERY {} {}={}", self.table_name, partition_key.name, value);

        let condition = KeyCondition::partition_eq(&partition_key.name, value);

        self.store
            .query(&self.table_name, &condition)
            .await?
            .into_iter()
            .map(|document| self.descriptor.decode(document).map_err(QueryError::from))
            .collect()
    }
}
