use dynamodb_mapper::{
    conformance::{ConformanceError, Harness, HarnessConfig},
    errors::EncodeReason,
};
use proptest::prelude::*;

mod common;
use common::{complex_item, immutable_item, item, mutable_item, nested, nested_immutable};

fn harness() -> Harness {
    Harness::new(HarnessConfig::from_env().expect("Invalid harness config"))
}

#[test]
fn test_item_round_trips() {
    let report = harness().check_codec(item()).unwrap();
    assert_eq!(report.cases, harness().config().cases);
}

#[test]
fn test_mutable_item_round_trips() {
    harness().check_codec(mutable_item()).unwrap();
}

#[test]
fn test_immutable_item_round_trips() {
    let harness = harness();
    harness
        .check_codec(immutable_item(harness.config()))
        .unwrap();
}

#[test]
fn test_complex_item_round_trips() {
    let harness = harness();
    harness.check_codec(complex_item(harness.config())).unwrap();
}

#[test]
fn test_nested_round_trips() {
    let harness = harness();
    let depth = harness.config().max_depth;

    harness.check_codec(nested(depth)).unwrap();
    harness.check_codec(nested_immutable(depth)).unwrap();
}

#[test]
fn test_generation_is_deterministic() {
    let config = HarnessConfig::default();

    for seed in [0, 42, u64::MAX] {
        assert_eq!(
            Harness::generate(&item(), seed).unwrap(),
            Harness::generate(&item(), seed).unwrap()
        );
        assert_eq!(
            Harness::generate(&mutable_item(), seed).unwrap(),
            Harness::generate(&mutable_item(), seed).unwrap()
        );
        assert_eq!(
            Harness::generate(&immutable_item(&config), seed).unwrap(),
            Harness::generate(&immutable_item(&config), seed).unwrap()
        );
        assert_eq!(
            Harness::generate(&complex_item(&config), seed).unwrap(),
            Harness::generate(&complex_item(&config), seed).unwrap()
        );
    }
}

#[test]
fn test_reported_seed_reproduces_samples() {
    let report = Harness::new(HarnessConfig::default())
        .check_codec(item())
        .unwrap();

    let config = HarnessConfig::builder()
        .seed(report.seed)
        .cases(5)
        .build()
        .unwrap();

    assert_eq!(
        Harness::new(config.clone()).samples(item()).unwrap(),
        Harness::new(config).samples(item()).unwrap()
    );
}

#[test]
fn test_mismatch_is_reported() {
    // Skipped fields are not stored and come back as `None`
    let strategy = complex_item(&HarnessConfig::default()).prop_map(|mut item| {
        item.field_using_with = Some("lost".into());
        item
    });

    let harness = Harness::new(HarnessConfig::builder().cases(3).seed(1).build().unwrap());
    let err = assert_err!(harness.check_codec(strategy));

    assert!(matches!(err, ConformanceError::Mismatch { case: 0, .. }));
}

#[test]
fn test_encode_failure_is_reported() {
    let strategy = complex_item(&HarnessConfig::default()).prop_map(|mut item| {
        item.string_set.clear();
        item
    });

    let harness = Harness::new(HarnessConfig::builder().cases(1).seed(1).build().unwrap());
    let err = assert_err!(harness.check_codec(strategy));

    match err {
        ConformanceError::Encode { case, source } => {
            assert_eq!(case, 0);
            assert_eq!(source.reason, EncodeReason::EmptySet);
        }
        other => panic!("Expected an encode error, got {other:?}"),
    }
}
