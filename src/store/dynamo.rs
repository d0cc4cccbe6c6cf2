use super::{DocumentStore, KeyCondition};
use crate::{
    attribute::{from_item, to_item},
    errors::StoreError,
    schema::Key,
    Document,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use log::debug;

#[async_trait]
impl DocumentStore for Client {
    async fn put(&self, table: &str, document: Document) -> Result<(), StoreError> {
        self.put_item()
            .table_name(table)
            .set_item(Some(to_item(document)))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, table: &str, key: &Key) -> Result<Option<Document>, StoreError> {
        let result = self
            .get_item()
            .table_name(table)
            .set_key(Some(to_item(key.to_document())))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(result.item.map(from_item).transpose()?)
    }

    async fn delete(&self, table: &str, key: &Key) -> Result<(), StoreError> {
        self.delete_item()
            .table_name(table)
            .set_key(Some(to_item(key.to_document())))
            .send()
            .await
            .map_err(|e| StoreError::Aws(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        table: &str,
        condition: &KeyCondition,
    ) -> Result<Vec<Document>, StoreError> {
        let value: AttributeValue = condition.value().clone().into();
        let mut documents = Vec::new();
        let mut start_key = None;

        // Results are paginated once a page reaches 1MB
        loop {
            let result = self
                .query()
                .table_name(table)
                .key_condition_expression("#pk = :pk")
                .expression_attribute_names("#pk", condition.name())
                .expression_attribute_values(":pk", value.clone())
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| StoreError::Aws(e.to_string()))?;

            for item in result.items.unwrap_or_default() {
                documents.push(from_item(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => {
                    debug!("Fetching next page of {table}");
                    start_key = Some(key);
                }
                _ => break,
            }
        }

        Ok(documents)
    }
}
