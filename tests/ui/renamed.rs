use dynamodb_mapper::{encode, Record};

#[derive(Debug, Default, PartialEq)]
struct Cache(Vec<String>);

#[derive(Debug, Record)]
#[dynamo(rename_all = "SCREAMING_SNAKE_CASE", type_name = "Account")]
struct AccountRecord {
    #[partition_key]
    account_id: String,
    #[dynamo(rename = "bal")]
    balance: f64,
    #[dynamo(skip)]
    cache: Cache,
    r#type: String,
}

fn main() {
    let account = AccountRecord {
        account_id: "acc-1".into(),
        balance: 10.5,
        cache: Cache::default(),
        r#type: "savings".into(),
    };

    let document = encode(&account).unwrap();
    assert!(document.contains_key("ACCOUNT_ID"));
    assert!(document.contains_key("bal"));
    assert!(document.contains_key("TYPE"));
    assert!(!document.contains_key("CACHE"));
}
