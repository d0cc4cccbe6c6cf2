//! Generators for the values records are built from.
//!
//! Sizes follow what a document store accepts: partition keys and map keys are never
//! empty, sets have at least one entry, numbers are finite.

use super::HarnessConfig;
use proptest::{
    collection::{hash_map, hash_set, vec},
    prelude::*,
};
use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
};

/// Printable ASCII strings of 1 to 10 characters.
pub fn short_string() -> impl Strategy<Value = String> + Clone {
    ascii_string(1, 10)
}

/// Printable ASCII strings of up to 10 characters, possibly empty.
pub fn empty_or_short_string() -> impl Strategy<Value = String> + Clone {
    ascii_string(0, 10)
}

fn ascii_string(min: usize, max: usize) -> impl Strategy<Value = String> + Clone {
    vec(proptest::char::range(' ', '~'), min..=max).prop_map(String::from_iter)
}

/// Random (version 4) UUIDs in their hyphenated text form.
pub fn partition_key() -> impl Strategy<Value = String> + Clone {
    any::<[u8; 16]>().prop_map(|mut bytes| {
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex = hex::encode(bytes);
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    })
}

pub fn sort_key() -> impl Strategy<Value = i32> + Clone {
    any::<i32>()
}

/// Finite doubles within ±10e120, inside the range DynamoDB numbers can hold.
pub fn finite_f64() -> impl Strategy<Value = f64> + Clone {
    -10e120..10e120
}

/// Finite floats of any magnitude except `-0.0`.
pub fn finite_f32() -> impl Strategy<Value = f32> + Clone {
    use proptest::num::f32::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};

    (POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO)
        .prop_filter("negative zero", |f| !(*f == 0.0 && f.is_sign_negative()))
}

/// Byte strings of up to 10 bytes, possibly empty.
pub fn bytes() -> impl Strategy<Value = Vec<u8>> + Clone {
    vec(any::<u8>(), 0..=10)
}

/// Lists of up to `max` possibly empty strings.
pub fn string_list(max: usize) -> impl Strategy<Value = Vec<String>> + Clone {
    vec(empty_or_short_string(), 0..=max)
}

/// Maps of up to `max` entries with non-empty keys.
pub fn string_map(max: usize) -> impl Strategy<Value = HashMap<String, String>> + Clone {
    hash_map(short_string(), empty_or_short_string(), 0..=max)
}

/// Sets of 1 to `max` possibly empty strings.
pub fn string_set(max: usize) -> impl Strategy<Value = HashSet<String>> + Clone {
    hash_set(empty_or_short_string(), 1..=max.max(1))
}

/// Collection sizes and nesting depth of a [`HarnessConfig`] run, for building record
/// strategies that follow the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_depth: u32,
    pub max_collection: usize,
}

impl From<&HarnessConfig> for Bounds {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_collection: config.max_collection,
        }
    }
}

impl Bounds {
    pub fn string_list(&self) -> impl Strategy<Value = Vec<String>> + Clone {
        string_list(self.max_collection)
    }

    pub fn string_map(&self) -> impl Strategy<Value = HashMap<String, String>> + Clone {
        string_map(self.max_collection)
    }

    pub fn string_set(&self) -> impl Strategy<Value = HashSet<String>> + Clone {
        string_set(self.max_collection)
    }

    /// Lists of up to `max_collection` elements.
    pub fn list_of<S: Strategy>(&self, element: S) -> impl Strategy<Value = Vec<S::Value>> {
        vec(element, 0..=self.max_collection)
    }

    /// Maps of up to `max_collection` entries with non-empty keys.
    pub fn map_of<S: Strategy>(&self, value: S) -> impl Strategy<Value = HashMap<String, S::Value>> {
        hash_map(short_string(), value, 0..=self.max_collection)
    }

    /// The root of a recursive record, nesting at most `max_depth` levels.
    pub fn recursive<T: Debug>(&self, node: fn(u32) -> BoxedStrategy<T>) -> BoxedStrategy<T> {
        node(self.max_depth)
    }
}

/// Children of a recursive record at nesting `level`.
///
/// Below level 0 there are no children. Above it, one in five nodes still stops early
/// so that trees of every depth are generated.
pub fn depth_limited<T>(level: u32, node: fn(u32) -> BoxedStrategy<T>) -> BoxedStrategy<Vec<T>>
where
    T: Clone + Debug + 'static,
{
    if level == 0 {
        return Just(Vec::new()).boxed();
    }

    prop_oneof![
        1 => Just(Vec::new()),
        4 => vec(node(level - 1), 0..=3)
    ]
    .boxed()
}
