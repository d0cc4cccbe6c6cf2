//! Round trips through a real DynamoDB, e.g. `docker run -p 8000:8000 amazon/dynamodb-local`.
//! Run with `cargo test -- --ignored`.

use dynamodb_mapper::{
    conformance::{Harness, HarnessConfig},
    PkSk, Record, Table,
};
use serial_test::serial;
use std::future::Future;

mod common;
use common::{
    complex_item, immutable_item, item, mutable_item, ComplexItem, ImmutableItem, Item,
    MutableItem,
};

async fn run_test<R, F, Fut>(table_name: &str, f: F)
where
    R: Record,
    F: FnOnce(Table<R>) -> Fut,
    Fut: Future<Output = ()>,
{
    let _ = env_logger::builder().is_test(true).try_init();

    let config = aws_config::from_env()
        .endpoint_url("http://localhost:8000")
        .load()
        .await;

    let client = aws_sdk_dynamodb::Client::new(&config);

    common::create_table(&client, table_name).await;
    let table = Table::init(client, table_name).expect("Failed to init table");

    f(table).await;
}

fn harness() -> Harness {
    Harness::new(HarnessConfig::from_env().expect("Invalid harness config"))
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_put_get_query() {
    run_test("sample-table", |table: Table<Item>| async move {
        let item = Item {
            partition_key: "my partition key".into(),
            sort_key: 12345,
            string_attribute: Some("my string value".into()),
        };

        table.put(&item).await.expect("Failed to put");

        let found = table
            .get(PkSk::new("my partition key", 12345))
            .await
            .expect("Failed to get");
        assert_eq!(found, Some(item.clone()));

        let items = table
            .query("my partition key")
            .await
            .expect("Failed to query");
        assert_eq!(items, vec![item]);
    })
    .await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_derived_item() {
    run_test("item-table", |table: Table<Item>| async move {
        harness().check_table(&table, item()).await.unwrap();
    })
    .await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_mutable_item() {
    run_test("mutable-item-table", |table: Table<MutableItem>| async move {
        harness().check_table(&table, mutable_item()).await.unwrap();
    })
    .await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_immutable_item() {
    run_test("immutable-item-table", |table: Table<ImmutableItem>| async move {
        let harness = harness();
        harness
            .check_table(&table, immutable_item(harness.config()))
            .await
            .unwrap();
    })
    .await;
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_complex_item() {
    run_test("complex-item-table", |table: Table<ComplexItem>| async move {
        let harness = harness();
        harness
            .check_table(&table, complex_item(harness.config()))
            .await
            .unwrap();
    })
    .await;
}
