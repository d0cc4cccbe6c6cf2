//! Property based conformance checks of the codec and of stores.
//!
//! A [`Harness`] generates records from a `proptest` strategy, round trips each one and
//! fails on the first record that does not come back equal:
//!
//! ```
//! use dynamodb_mapper::{
//!     conformance::{strategies, Harness, HarnessConfig},
//!     Record,
//! };
//! use proptest::prelude::*;
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct User {
//!     #[partition_key]
//!     email: String,
//!     nickname: Option<String>,
//! }
//!
//! let users = (strategies::partition_key(), proptest::option::of(strategies::short_string()))
//!     .prop_map(|(email, nickname)| User { email, nickname });
//!
//! let harness = Harness::new(HarnessConfig::builder().seed(7).build().unwrap());
//! let report = harness.check_codec(users).unwrap();
//! assert_eq!(report.cases, 50);
//! ```

mod config;
pub mod strategies;

pub use config::{HarnessConfig, HarnessConfigBuilder};

use crate::{
    codec::{decode, encode},
    errors::{DecodeError, DeleteError, EncodeError, GetError, PutError},
    store::DocumentStore,
    traits::Record,
    Table,
};
use log::{debug, info};
use proptest::{
    prelude::Rng,
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::fmt::Debug;
use thiserror::Error;

/// Error returned when a generated record fails a conformance check.
///
/// Every variant carries the index of the failing case; rerunning with the same seed
/// reproduces it.
#[derive(Error, Debug)]
pub enum ConformanceError {
    #[error("Failed to generate a value: {0}")]
    Generation(String),
    #[error("Case {case}: {source}")]
    Encode {
        case: usize,
        #[source]
        source: EncodeError,
    },
    #[error("Case {case}: {source}")]
    Decode {
        case: usize,
        #[source]
        source: DecodeError,
    },
    #[error("Case {case}: round trip mismatch\n  expected: {expected}\n    actual: {actual}")]
    Mismatch {
        case: usize,
        expected: String,
        actual: String,
    },
    #[error("Case {case}: record was not found after it was put")]
    NotFound { case: usize },
    #[error("Case {case}: record was still found after it was deleted")]
    NotDeleted { case: usize },
    #[error("Case {case}: {source}")]
    Put {
        case: usize,
        #[source]
        source: PutError,
    },
    #[error("Case {case}: {source}")]
    Get {
        case: usize,
        #[source]
        source: GetError,
    },
    #[error("Case {case}: {source}")]
    Delete {
        case: usize,
        #[source]
        source: DeleteError,
    },
}

/// The outcome of a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub cases: usize,
    /// The seed the values were generated from.
    pub seed: u64,
}

pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Generate a single value from `strategy`. The same seed always yields the same value.
    pub fn generate<S: Strategy>(strategy: &S, seed: u64) -> Result<S::Value, ConformanceError> {
        generate(strategy, &mut runner(seed))
    }

    /// Generate `cases` values from `strategy`, deterministic for a configured seed.
    pub fn samples<S: Strategy>(&self, strategy: S) -> Result<Vec<S::Value>, ConformanceError> {
        let mut runner = runner(self.seed());

        (0..self.config.cases)
            .map(|_| generate(&strategy, &mut runner))
            .collect()
    }

    /// Check `decode(encode(record)) == record` for generated records.
    pub fn check_codec<R, S>(&self, strategy: S) -> Result<Report, ConformanceError>
    where
        R: Record + PartialEq + Debug,
        S: Strategy<Value = R>,
    {
        let seed = self.seed();
        let mut runner = runner(seed);

        info!(
            "Checking codec round trips of {} with {} cases (seed {seed})",
            std::any::type_name::<R>(),
            self.config.cases
        );

        for case in 0..self.config.cases {
            let record = generate(&strategy, &mut runner)?;

            let document =
                encode(&record).map_err(|source| ConformanceError::Encode { case, source })?;
            let decoded: R =
                decode(document).map_err(|source| ConformanceError::Decode { case, source })?;

            expect_equal(case, &record, &decoded)?;
        }

        Ok(self.report(seed))
    }

    /// Put every generated record into `table`, get it back, compare and delete it.
    pub async fn check_table<R, St, S>(
        &self,
        table: &Table<R, St>,
        strategy: S,
    ) -> Result<Report, ConformanceError>
    where
        R: Record + PartialEq + Debug,
        St: DocumentStore,
        S: Strategy<Value = R>,
    {
        let seed = self.seed();
        let mut runner = runner(seed);

        info!(
            "Checking table {} with {} cases (seed {seed})",
            table.name(),
            self.config.cases
        );

        for case in 0..self.config.cases {
            let record = generate(&strategy, &mut runner)?;
            let key = table
                .key_of(&record)
                .map_err(|source| ConformanceError::Encode { case, source })?;

            table
                .put(&record)
                .await
                .map_err(|source| ConformanceError::Put { case, source })?;

            let found = table
                .get(key.clone().into_parts())
                .await
                .map_err(|source| ConformanceError::Get { case, source })?
                .ok_or(ConformanceError::NotFound { case })?;

            expect_equal(case, &record, &found)?;

            table
                .delete(key.clone().into_parts())
                .await
                .map_err(|source| ConformanceError::Delete { case, source })?;

            let deleted = table
                .get(key.into_parts())
                .await
                .map_err(|source| ConformanceError::Get { case, source })?;

            if deleted.is_some() {
                return Err(ConformanceError::NotDeleted { case });
            }
        }

        Ok(self.report(seed))
    }

    fn seed(&self) -> u64 {
        self.config
            .seed
            .unwrap_or_else(|| TestRunner::new(Config::default()).rng().next_u64())
    }

    fn report(&self, seed: u64) -> Report {
        debug!("Passed {} cases (seed {seed})", self.config.cases);

        Report {
            cases: self.config.cases,
            seed,
        }
    }
}

fn runner(seed: u64) -> TestRunner {
    let mut bytes = [0u8; 32];
    for chunk in bytes.chunks_mut(8) {
        chunk.copy_from_slice(&seed.to_le_bytes());
    }

    TestRunner::new_with_rng(
        Config::default(),
        TestRng::from_seed(RngAlgorithm::ChaCha, &bytes),
    )
}

fn generate<S: Strategy>(
    strategy: &S,
    runner: &mut TestRunner,
) -> Result<S::Value, ConformanceError> {
    strategy
        .new_tree(runner)
        .map(|tree| tree.current())
        .map_err(|reason| ConformanceError::Generation(reason.to_string()))
}

fn expect_equal<R: PartialEq + Debug>(
    case: usize,
    expected: &R,
    actual: &R,
) -> Result<(), ConformanceError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ConformanceError::Mismatch {
            case,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}
