#![allow(dead_code)]

use aws_sdk_dynamodb::{
    types::{
        AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput,
        ScalarAttributeType,
    },
    Client,
};
use dynamodb_mapper::{
    codec,
    conformance::{
        strategies::{
            bytes, depth_limited, finite_f32, finite_f64, partition_key, short_string, sort_key,
        },
        HarnessConfig,
    },
    errors::{DecodeError, EncodeError, SchemaError},
    schema::{SchemaDescriptor, Shape},
    store::InMemoryStore,
    Attribute, AttributeValue, Record, Table,
};
use proptest::{option, prelude::*};
use std::collections::{HashMap, HashSet};

/// The three attribute record used by the basic mapping scenarios.
#[derive(Debug, Clone, PartialEq, Record)]
#[dynamo(rename_all = "camelCase")]
pub struct Item {
    #[partition_key]
    pub partition_key: String,
    #[sort_key]
    pub sort_key: i32,
    pub string_attribute: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Record)]
#[dynamo(rename_all = "camelCase")]
pub struct Nested {
    pub string_attribute: String,
    pub nested_list: Vec<Nested>,
}

/// Every kind of attribute a record can hold.
#[derive(Debug, Clone, PartialEq, Record)]
#[dynamo(rename_all = "camelCase")]
pub struct ComplexItem {
    #[partition_key]
    pub partition_key: String,
    #[sort_key]
    pub sort_key: i32,

    pub string_attribute: Option<String>,
    pub boolean_attribute: Option<bool>,
    pub boolean_primitive_attribute: bool,
    pub int_attribute: Option<i32>,
    pub long_attribute: Option<i64>,
    pub float_attribute: Option<f32>,
    pub double_attribute: Option<f64>,
    pub short_attribute: Option<i16>,
    pub byte_attribute: Vec<u8>,

    pub string_list: Vec<String>,
    pub string_string_map: HashMap<String, String>,
    pub nested_list: Vec<Nested>,
    pub nested_map: HashMap<String, Nested>,
    pub nested_immutable_list: Vec<NestedImmutable>,
    pub string_set: HashSet<String>,

    #[dynamo(skip)]
    pub field_using_with: Option<String>,
}

impl ComplexItem {
    pub fn with_field_using_with(self, value: impl Into<String>) -> Self {
        Self {
            field_using_with: Some(value.into()),
            ..self
        }
    }
}

/// A record with private fields that is read through getters and assembled by a builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableItem {
    partition_key: String,
    sort_key: i32,
    string_attribute: Option<String>,
    tags: Vec<String>,
}

impl ImmutableItem {
    pub fn builder() -> ImmutableItemBuilder {
        ImmutableItemBuilder::default()
    }

    pub fn partition_key(&self) -> &String {
        &self.partition_key
    }

    pub fn sort_key(&self) -> &i32 {
        &self.sort_key
    }

    pub fn string_attribute(&self) -> &Option<String> {
        &self.string_attribute
    }

    pub fn tags(&self) -> &Vec<String> {
        &self.tags
    }
}

#[derive(Default)]
pub struct ImmutableItemBuilder {
    partition_key: Option<String>,
    sort_key: Option<i32>,
    string_attribute: Option<String>,
    tags: Vec<String>,
}

impl ImmutableItemBuilder {
    pub fn partition_key(mut self, value: String) -> Self {
        self.partition_key = Some(value);
        self
    }

    pub fn sort_key(mut self, value: i32) -> Self {
        self.sort_key = Some(value);
        self
    }

    pub fn string_attribute(mut self, value: Option<String>) -> Self {
        self.string_attribute = value;
        self
    }

    pub fn tags(mut self, value: Vec<String>) -> Self {
        self.tags = value;
        self
    }

    pub fn build(self) -> ImmutableItem {
        ImmutableItem {
            partition_key: self.partition_key.unwrap_or_default(),
            sort_key: self.sort_key.unwrap_or_default(),
            string_attribute: self.string_attribute,
            tags: self.tags,
        }
    }
}

impl Record for ImmutableItem {
    fn describe() -> Result<SchemaDescriptor<Self>, SchemaError> {
        SchemaDescriptor::builder("ImmutableItem")
            .partition_key("partitionKey", ImmutableItem::partition_key)
            .sort_key("sortKey", ImmutableItem::sort_key)
            .attribute("stringAttribute", ImmutableItem::string_attribute)
            .attribute("tags", ImmutableItem::tags)
            .build(|fields| {
                Ok(ImmutableItem::builder()
                    .partition_key(fields.take("partitionKey")?)
                    .sort_key(fields.take("sortKey")?)
                    .string_attribute(fields.take("stringAttribute")?)
                    .tags(fields.take("tags")?)
                    .build())
            })
    }
}

/// A record built with setters on a default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutableItem {
    partition_key: String,
    sort_key: i32,
    string_attribute: Option<String>,
}

impl MutableItem {
    pub fn partition_key(&self) -> &String {
        &self.partition_key
    }

    pub fn set_partition_key(&mut self, value: String) {
        self.partition_key = value;
    }

    pub fn sort_key(&self) -> &i32 {
        &self.sort_key
    }

    pub fn set_sort_key(&mut self, value: i32) {
        self.sort_key = value;
    }

    pub fn string_attribute(&self) -> &Option<String> {
        &self.string_attribute
    }

    pub fn set_string_attribute(&mut self, value: Option<String>) {
        self.string_attribute = value;
    }
}

impl Record for MutableItem {
    fn describe() -> Result<SchemaDescriptor<Self>, SchemaError> {
        SchemaDescriptor::builder("MutableItem")
            .partition_key("partitionKey", MutableItem::partition_key)
            .sort_key("sortKey", MutableItem::sort_key)
            .attribute("stringAttribute", MutableItem::string_attribute)
            .build(|fields| {
                let mut item = MutableItem::default();
                item.set_partition_key(fields.take("partitionKey")?);
                item.set_sort_key(fields.take("sortKey")?);
                item.set_string_attribute(fields.take("stringAttribute")?);
                Ok(item)
            })
    }
}

/// A recursive record assembled by a builder, nested by hand rather than derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedImmutable {
    string_attribute: String,
    nested_list: Vec<NestedImmutable>,
}

impl NestedImmutable {
    pub fn new(string_attribute: String, nested_list: Vec<NestedImmutable>) -> Self {
        Self {
            string_attribute,
            nested_list,
        }
    }

    pub fn string_attribute(&self) -> &String {
        &self.string_attribute
    }

    pub fn nested_list(&self) -> &Vec<NestedImmutable> {
        &self.nested_list
    }
}

impl Record for NestedImmutable {
    fn describe() -> Result<SchemaDescriptor<Self>, SchemaError> {
        SchemaDescriptor::builder("NestedImmutable")
            .attribute("stringAttribute", NestedImmutable::string_attribute)
            .attribute("nestedList", NestedImmutable::nested_list)
            .build(|fields| {
                Ok(NestedImmutable::new(
                    fields.take("stringAttribute")?,
                    fields.take("nestedList")?,
                ))
            })
    }
}

impl Attribute for NestedImmutable {
    fn shape() -> Shape {
        Shape::Record("NestedImmutable")
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        codec::encode_nested(self)
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        codec::decode_nested(value)
    }
}

pub fn item() -> impl Strategy<Value = Item> {
    (partition_key(), sort_key(), option::of(short_string())).prop_map(
        |(partition_key, sort_key, string_attribute)| Item {
            partition_key,
            sort_key,
            string_attribute,
        },
    )
}

pub fn mutable_item() -> impl Strategy<Value = MutableItem> {
    (partition_key(), sort_key(), option::of(short_string())).prop_map(
        |(partition_key, sort_key, string_attribute)| {
            let mut item = MutableItem::default();
            item.set_partition_key(partition_key);
            item.set_sort_key(sort_key);
            item.set_string_attribute(string_attribute);
            item
        },
    )
}

pub fn immutable_item(config: &HarnessConfig) -> impl Strategy<Value = ImmutableItem> {
    (
        partition_key(),
        sort_key(),
        option::of(short_string()),
        config.bounds().string_list(),
    )
        .prop_map(|(partition_key, sort_key, string_attribute, tags)| {
            ImmutableItem::builder()
                .partition_key(partition_key)
                .sort_key(sort_key)
                .string_attribute(string_attribute)
                .tags(tags)
                .build()
        })
}

pub fn nested(level: u32) -> BoxedStrategy<Nested> {
    (short_string(), depth_limited(level, nested))
        .prop_map(|(string_attribute, nested_list)| Nested {
            string_attribute,
            nested_list,
        })
        .boxed()
}

pub fn nested_immutable(level: u32) -> BoxedStrategy<NestedImmutable> {
    (short_string(), depth_limited(level, nested_immutable))
        .prop_map(|(string_attribute, nested_list)| {
            NestedImmutable::new(string_attribute, nested_list)
        })
        .boxed()
}

pub fn complex_item(config: &HarnessConfig) -> impl Strategy<Value = ComplexItem> {
    let bounds = config.bounds();

    let scalars = (
        option::of(short_string()),
        option::of(any::<bool>()),
        any::<bool>(),
        option::of(any::<i32>()),
        option::of(any::<i64>()),
        option::of(finite_f32()),
        option::of(finite_f64()),
        option::of(any::<i16>()),
        bytes(),
    );

    let documents = (
        bounds.string_list(),
        bounds.string_map(),
        bounds.list_of(bounds.recursive(nested)),
        bounds.map_of(bounds.recursive(nested)),
        bounds.list_of(bounds.recursive(nested_immutable)),
        bounds.string_set(),
    );

    (partition_key(), sort_key(), scalars, documents).prop_map(
        |(partition_key, sort_key, scalars, documents)| {
            let (
                string_attribute,
                boolean_attribute,
                boolean_primitive_attribute,
                int_attribute,
                long_attribute,
                float_attribute,
                double_attribute,
                short_attribute,
                byte_attribute,
            ) = scalars;
            let (
                string_list,
                string_string_map,
                nested_list,
                nested_map,
                nested_immutable_list,
                string_set,
            ) = documents;

            ComplexItem {
                partition_key,
                sort_key,
                string_attribute,
                boolean_attribute,
                boolean_primitive_attribute,
                int_attribute,
                long_attribute,
                float_attribute,
                double_attribute,
                short_attribute,
                byte_attribute,
                string_list,
                string_string_map,
                nested_list,
                nested_map,
                nested_immutable_list,
                string_set,
                field_using_with: None,
            }
        },
    )
}

/// An in-memory table for `R`, defined with the key schema of `R`.
pub fn memory_table<R: Record>(name: &str) -> Table<R, InMemoryStore> {
    let store = InMemoryStore::new();
    store
        .define_table_for::<R>(name)
        .expect("Failed to define table");

    Table::init(store, name).expect("Failed to init table")
}

pub async fn create_table(client: &Client, table_name: &str) {
    let _ = client.delete_table().table_name(table_name).send().await;

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("partitionKey")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .expect("Failed to build attribute definition"),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("sortKey")
                .attribute_type(ScalarAttributeType::N)
                .build()
                .expect("Failed to build attribute definition"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("partitionKey")
                .key_type(KeyType::Hash)
                .build()
                .expect("Failed to build key schema element"),
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("sortKey")
                .key_type(KeyType::Range)
                .build()
                .expect("Failed to build key schema element"),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(5)
                .write_capacity_units(5)
                .build()
                .expect("Failed to build provisioned throughput"),
        )
        .send()
        .await
        .expect("Failed to create table");
}

#[macro_export]
macro_rules! assert_err {
    ($cond:expr,) => {
        $crate::assert_err!($cond);
    };
    ($cond:expr) => {
        match $cond {
            Ok(t) => {
                panic!("assertion failed, expected Err(..), got Ok({:?})", t);
            },
            Err(e) => e,
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        match $cond {
            Ok(t) => {
                panic!("assertion failed, expected Err(..), got Ok({:?}): {}", t, format_args!($($arg)+));
            },
            Err(e) => e,
        }
    };
}
