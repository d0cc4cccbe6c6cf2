use dynamodb_mapper::{
    conformance::{Harness, HarnessConfig},
    errors::{GetError, KeyError, PutError},
    store::InMemoryStore,
    PkSk, Table,
};

mod common;
use common::{
    complex_item, immutable_item, item, memory_table, mutable_item, ComplexItem, ImmutableItem,
    Item, MutableItem,
};

fn harness() -> Harness {
    Harness::new(HarnessConfig::from_env().expect("Invalid harness config"))
}

#[tokio::test]
async fn test_derived_item() {
    let table = memory_table::<Item>("item-table");
    harness().check_table(&table, item()).await.unwrap();

    assert_eq!(table.store().len("item-table").unwrap(), 0);
}

#[tokio::test]
async fn test_mutable_item() {
    let table = memory_table::<MutableItem>("mutable-item-table");
    harness().check_table(&table, mutable_item()).await.unwrap();
}

#[tokio::test]
async fn test_immutable_item() {
    let table = memory_table::<ImmutableItem>("immutable-item-table");
    let harness = harness();
    harness
        .check_table(&table, immutable_item(harness.config()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_complex_item() {
    let table = memory_table::<ComplexItem>("complex-item-table");
    let harness = harness();
    harness
        .check_table(&table, complex_item(harness.config()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_put_replaces() {
    let table = memory_table::<Item>("replace-table");

    for value in ["first", "second"] {
        table
            .put(&Item {
                partition_key: "abc".into(),
                sort_key: 1,
                string_attribute: Some(value.into()),
            })
            .await
            .expect("Failed to put");
    }

    assert_eq!(table.store().len("replace-table").unwrap(), 1);

    let found = table
        .get(PkSk::new("abc", 1))
        .await
        .expect("Failed to get")
        .expect("Item not found");
    assert_eq!(found.string_attribute.as_deref(), Some("second"));
}

#[tokio::test]
async fn test_query_orders_by_sort_key() {
    let table = memory_table::<Item>("query-table");

    for sort_key in [10, -3, 7] {
        table
            .put(&Item {
                partition_key: "abc".into(),
                sort_key,
                string_attribute: None,
            })
            .await
            .expect("Failed to put");
    }

    table
        .put(&Item {
            partition_key: "other".into(),
            sort_key: 0,
            string_attribute: None,
        })
        .await
        .expect("Failed to put");

    let items = table.query("abc").await.expect("Failed to query");
    assert_eq!(
        items.iter().map(|item| item.sort_key).collect::<Vec<_>>(),
        vec![-3, 7, 10]
    );
}

#[tokio::test]
async fn test_key_errors() {
    let table = memory_table::<Item>("key-table");

    let err = assert_err!(table.get(("abc", "not a number")).await);
    assert!(matches!(err, GetError::Key(KeyError::ShapeMismatch { .. })));

    let item = Item {
        partition_key: "abc".into(),
        sort_key: 1,
        string_attribute: None,
    };
    let other = Table::<Item, _>::init(InMemoryStore::new(), "undefined").unwrap();
    let err = assert_err!(other.put(&item).await);
    assert!(matches!(err, PutError::Store(_)));
}
