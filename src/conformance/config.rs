use super::strategies::Bounds;
use crate::errors::ConfigError;
use std::{env, str::FromStr};

const CASES: &str = "DYNAMODB_MAPPER_CASES";
const SEED: &str = "DYNAMODB_MAPPER_SEED";
const MAX_DEPTH: &str = "DYNAMODB_MAPPER_MAX_DEPTH";
const MAX_COLLECTION: &str = "DYNAMODB_MAPPER_MAX_COLLECTION";

/// Settings of a conformance [`Harness`](super::Harness) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Number of generated values checked per run.
    pub cases: usize,
    /// Seed of the generator, a random seed is drawn per run when `None`.
    pub seed: Option<u64>,
    /// Maximum nesting depth of recursive records.
    pub max_depth: u32,
    /// Maximum number of entries of generated lists, maps and sets.
    pub max_collection: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cases: 50,
            seed: None,
            max_depth: 3,
            max_collection: 5,
        }
    }
}

impl HarnessConfig {
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder {
            config: HarnessConfig::default(),
            error: None,
        }
    }

    /// The default configuration overridden by `DYNAMODB_MAPPER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().with_env().build()
    }

    /// The collection and depth bounds generated records should stay within.
    pub fn bounds(&self) -> Bounds {
        Bounds::from(self)
    }
}

pub struct HarnessConfigBuilder {
    config: HarnessConfig,
    error: Option<ConfigError>,
}

impl HarnessConfigBuilder {
    pub fn cases(mut self, cases: usize) -> Self {
        self.config.cases = cases;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn max_collection(mut self, max_collection: usize) -> Self {
        self.config.max_collection = max_collection;
        self
    }

    /// Override settings from the environment:
    ///
    /// | variable                         | setting          |
    /// |----------------------------------|------------------|
    /// | `DYNAMODB_MAPPER_CASES`          | `cases`          |
    /// | `DYNAMODB_MAPPER_SEED`           | `seed`           |
    /// | `DYNAMODB_MAPPER_MAX_DEPTH`      | `max_depth`      |
    /// | `DYNAMODB_MAPPER_MAX_COLLECTION` | `max_collection` |
    pub fn with_env(self) -> Self {
        self.with_vars(|name| env::var(name).ok())
    }

    fn with_vars(mut self, var: impl Fn(&'static str) -> Option<String>) -> Self {
        if let Some(cases) = self.parse(CASES, &var) {
            self.config.cases = cases;
        }

        if let Some(seed) = self.parse(SEED, &var) {
            self.config.seed = Some(seed);
        }

        if let Some(max_depth) = self.parse(MAX_DEPTH, &var) {
            self.config.max_depth = max_depth;
        }

        if let Some(max_collection) = self.parse(MAX_COLLECTION, &var) {
            self.config.max_collection = max_collection;
        }

        self
    }

    fn parse<T: FromStr>(
        &mut self,
        name: &'static str,
        var: impl Fn(&'static str) -> Option<String>,
    ) -> Option<T> {
        let value = var(name)?;

        match value.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.error
                    .get_or_insert(ConfigError::InvalidValue { name, value });
                None
            }
        }
    }

    pub fn build(self) -> Result<HarnessConfig, ConfigError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.config),
        }
    }
}
