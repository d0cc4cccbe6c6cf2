use dynamodb_mapper::Record;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Record)]
struct Address {
    street: String,
    postcode: Option<u32>,
}

#[derive(Debug, Record)]
struct User {
    #[partition_key]
    email: String,
    #[sort_key]
    created_at: i64,
    name: String,
    nickname: Option<String>,
    avatar: Vec<u8>,
    scores: BTreeSet<u64>,
    addresses: Vec<Address>,
    settings: BTreeMap<String, bool>,
    primary: Option<Box<Address>>,
}

fn main() {}
