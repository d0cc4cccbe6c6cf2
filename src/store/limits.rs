use crate::{
    attribute::number::Decimal,
    errors::{AttributePath, LimitError, PathSegment},
    AttributeValue, Document,
};

/// The numbers a store can hold.
///
/// The codec emits numbers at full precision; whether a store accepts them is a
/// property of the store, checked before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLimits {
    /// Maximum number of significant digits, `None` for no limit.
    pub max_digits: Option<usize>,
    /// Allowed range of the exponent in scientific notation, `None` for no limit.
    pub exponent_range: Option<(i64, i64)>,
}

impl Default for NumberLimits {
    fn default() -> Self {
        Self::dynamodb()
    }
}

impl NumberLimits {
    /// DynamoDB numbers: 38 significant digits, magnitudes from 1E-130 to below 1E+126.
    pub const fn dynamodb() -> Self {
        Self {
            max_digits: Some(38),
            exponent_range: Some((-130, 125)),
        }
    }

    pub const fn unbounded() -> Self {
        Self {
            max_digits: None,
            exponent_range: None,
        }
    }

    /// Check every number in `document`, including numbers nested in lists, maps and
    /// number sets.
    pub fn check(&self, document: &Document) -> Result<(), LimitError> {
        if *self == Self::unbounded() {
            return Ok(());
        }

        document.iter().try_for_each(|(key, value)| {
            self.check_value(value, &mut vec![PathSegment::Field(key.clone())])
        })
    }

    fn check_value(
        &self,
        value: &AttributeValue,
        path: &mut Vec<PathSegment>,
    ) -> Result<(), LimitError> {
        match value {
            AttributeValue::Number(n) => self.check_number(n, path),
            AttributeValue::NumberSet(set) => set.iter().try_for_each(|n| self.check_number(n, path)),
            AttributeValue::List(list) => list.iter().enumerate().try_for_each(|(i, value)| {
                path.push(PathSegment::Index(i));
                let result = self.check_value(value, path);
                path.pop();
                result
            }),
            AttributeValue::Map(map) => map.iter().try_for_each(|(key, value)| {
                path.push(PathSegment::Key(key.clone()));
                let result = self.check_value(value, path);
                path.pop();
                result
            }),
            _ => Ok(()),
        }
    }

    fn check_number(&self, value: &str, path: &[PathSegment]) -> Result<(), LimitError> {
        // Malformed numbers are rejected by validation, not here
        let Some(decimal) = Decimal::parse(value) else {
            return Ok(());
        };

        if decimal.is_zero() {
            return Ok(());
        }

        if let Some(limit) = self.max_digits {
            let digits = decimal.significant_digits();
            if digits > limit {
                return Err(LimitError::Precision {
                    value: value.to_string(),
                    path: to_path(path),
                    digits,
                    limit,
                });
            }
        }

        if let Some((min, max)) = self.exponent_range {
            let exponent = decimal.scientific_exponent();
            if exponent < min || exponent > max {
                return Err(LimitError::Magnitude {
                    value: value.to_string(),
                    path: to_path(path),
                    exponent,
                });
            }
        }

        Ok(())
    }
}

fn to_path(segments: &[PathSegment]) -> AttributePath {
    let mut path = AttributePath::new();
    for segment in segments.iter().rev() {
        path.push_front(segment.clone());
    }
    path
}
