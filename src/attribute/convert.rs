//! [`Attribute`] implementations for native Rust types.
//!
//! | native type                              | attribute         |
//! |------------------------------------------|-------------------|
//! | integers (except `u8`), `f32`, `f64`     | `Number`          |
//! | `String`                                 | `String`          |
//! | `bool`                                   | `Bool`            |
//! | `Vec<u8>`                                | `Binary`          |
//! | `Vec<T>`                                 | `List`            |
//! | `BTreeSet<T>`, `HashSet<T>`              | typed set         |
//! | `BTreeMap<K, V>`, `HashMap<K, V>`        | `Map`             |
//! | `Option<T>`                              | omitted when None |
//!
//! `u8` is not an attribute, so `Vec<u8>` is always binary and never a list of numbers.
//! Sequences are always lists and sets are always sets, nothing is inferred from the
//! element values.

use crate::{
    errors::{DecodeError, DecodeReason, EncodeError, EncodeReason},
    schema::Shape,
    traits::{Attribute, SetElement, SetKind},
    AttributeValue, Document,
};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
    str::FromStr,
};

fn parse_number<T: FromStr>(value: AttributeValue, target: &'static str) -> Result<T, DecodeError> {
    match value {
        AttributeValue::Number(n) => n
            .parse()
            .map_err(|_| DecodeError::new(DecodeReason::InvalidNumber { value: n, target })),
        other => Err(DecodeError::type_mismatch(Shape::Number, other.type_name())),
    }
}

macro_rules! impl_integer_attribute {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::Number(value.to_string())
                }
            }

            impl Attribute for $ty {
                fn shape() -> Shape {
                    Shape::Number
                }

                fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
                    Ok(AttributeValue::from(*self))
                }

                fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
                    parse_number(value, stringify!($ty))
                }
            }

            impl SetElement for $ty {
                const SET_KIND: SetKind = SetKind::Number;
            }
        )*
    };
}

impl_integer_attribute!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

macro_rules! impl_float_attribute {
    ($($ty:ty => $from:ident),* $(,)?) => {
        $(
            impl Attribute for $ty {
                fn shape() -> Shape {
                    Shape::Number
                }

                fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
                    AttributeValue::$from(*self)
                }

                fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
                    let parsed: $ty = parse_number(value, stringify!($ty))?;

                    // Numbers beyond the float range parse to infinity
                    if parsed.is_finite() {
                        Ok(parsed)
                    } else {
                        Err(DecodeError::new(DecodeReason::InvalidNumber {
                            value: parsed.to_string(),
                            target: stringify!($ty),
                        }))
                    }
                }
            }
        )*
    };
}

impl_float_attribute!(f32 => from_f32, f64 => from_f64);

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl Attribute for bool {
    fn shape() -> Shape {
        Shape::Bool
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::Bool(*self))
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        match value {
            AttributeValue::Bool(b) => Ok(b),
            other => Err(DecodeError::type_mismatch(Shape::Bool, other.type_name())),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl Attribute for String {
    fn shape() -> Shape {
        Shape::String
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::String(self.clone()))
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        match value {
            AttributeValue::String(s) => Ok(s),
            other => Err(DecodeError::type_mismatch(Shape::String, other.type_name())),
        }
    }
}

impl SetElement for String {
    const SET_KIND: SetKind = SetKind::String;
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Binary(value)
    }
}

impl Attribute for Vec<u8> {
    fn shape() -> Shape {
        Shape::Binary
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::Binary(self.clone()))
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        match value {
            AttributeValue::Binary(b) => Ok(b),
            other => Err(DecodeError::type_mismatch(Shape::Binary, other.type_name())),
        }
    }
}

impl SetElement for Vec<u8> {
    const SET_KIND: SetKind = SetKind::Binary;
}

impl Attribute for AttributeValue {
    fn shape() -> Shape {
        Shape::Document
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        self.validate()?;
        Ok(self.clone())
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

impl<T> Attribute for Option<T>
where
    T: Attribute,
{
    const NULLABLE: bool = true;

    fn shape() -> Shape {
        T::shape()
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        match self {
            Some(value) => value.to_attribute(),
            None => Ok(AttributeValue::Null),
        }
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::try_from_attribute(value).map(Some)
        }
    }

    fn to_optional_attribute(&self) -> Result<Option<AttributeValue>, EncodeError> {
        self.as_ref().map(T::to_attribute).transpose()
    }

    fn try_from_optional_attribute(value: Option<AttributeValue>) -> Result<Self, DecodeError> {
        match value {
            Some(value) => Self::try_from_attribute(value),
            None => Ok(None),
        }
    }
}

impl<T> Attribute for Box<T>
where
    T: Attribute,
{
    const NULLABLE: bool = T::NULLABLE;

    fn shape() -> Shape {
        T::shape()
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        self.as_ref().to_attribute()
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        T::try_from_attribute(value).map(Box::new)
    }

    fn to_optional_attribute(&self) -> Result<Option<AttributeValue>, EncodeError> {
        self.as_ref().to_optional_attribute()
    }

    fn try_from_optional_attribute(value: Option<AttributeValue>) -> Result<Self, DecodeError> {
        T::try_from_optional_attribute(value).map(Box::new)
    }
}

impl<T> Attribute for Vec<T>
where
    T: Attribute,
{
    fn shape() -> Shape {
        Shape::list_of(T::shape())
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        self.iter()
            .enumerate()
            .map(|(i, item)| item.to_attribute().map_err(|e| e.in_index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::List)
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        let AttributeValue::List(list) = value else {
            return Err(DecodeError::type_mismatch(Self::shape(), value.type_name()));
        };

        list.into_iter()
            .enumerate()
            .map(|(i, item)| T::try_from_attribute(item).map_err(|e| e.in_index(i)))
            .collect()
    }
}

fn encode_set<'a, E>(items: impl Iterator<Item = &'a E>) -> Result<AttributeValue, EncodeError>
where
    E: SetElement + 'a,
{
    let members = items
        .map(|item| item.to_attribute())
        .collect::<Result<Vec<_>, _>>()?;

    E::SET_KIND.collect(members)
}

fn decode_set<E, C>(value: AttributeValue) -> Result<C, DecodeError>
where
    E: SetElement,
    C: FromIterator<E>,
{
    E::SET_KIND
        .members(value)?
        .into_iter()
        .map(E::try_from_attribute)
        .collect()
}

impl<E> Attribute for BTreeSet<E>
where
    E: SetElement + Ord,
{
    fn shape() -> Shape {
        E::SET_KIND.shape()
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        encode_set(self.iter())
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        decode_set(value)
    }
}

impl<E> Attribute for HashSet<E>
where
    E: SetElement + Hash + Eq,
{
    fn shape() -> Shape {
        E::SET_KIND.shape()
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        encode_set(self.iter())
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        decode_set(value)
    }
}

fn encode_map<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Result<AttributeValue, EncodeError>
where
    K: ToString + 'a,
    V: Attribute + 'a,
{
    entries
        .map(|(k, v)| {
            let key = k.to_string();
            if key.is_empty() {
                return Err(EncodeError::new(EncodeReason::EmptyKey));
            }

            let value = v.to_attribute().map_err(|e| e.in_key(&key))?;
            Ok((key, value))
        })
        .collect::<Result<Document, _>>()
        .map(AttributeValue::Map)
}

fn decode_map<K, V, C>(value: AttributeValue, shape: Shape) -> Result<C, DecodeError>
where
    K: FromStr,
    V: Attribute,
    C: FromIterator<(K, V)>,
{
    let AttributeValue::Map(map) = value else {
        return Err(DecodeError::type_mismatch(shape, value.type_name()));
    };

    map.into_iter()
        .map(|(k, v)| {
            let value = V::try_from_attribute(v).map_err(|e| e.in_key(&k))?;
            let key = k
                .parse()
                .map_err(|_| DecodeError::new(DecodeReason::InvalidMapKey(k.clone())))?;

            Ok((key, value))
        })
        .collect()
}

impl<K, V> Attribute for HashMap<K, V>
where
    K: ToString + FromStr + Hash + Eq,
    V: Attribute,
{
    fn shape() -> Shape {
        Shape::map_of(V::shape())
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        encode_map(self.iter())
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        decode_map(value, Self::shape())
    }
}

impl<K, V> Attribute for BTreeMap<K, V>
where
    K: ToString + FromStr + Ord,
    V: Attribute,
{
    fn shape() -> Shape {
        Shape::map_of(V::shape())
    }

    fn to_attribute(&self) -> Result<AttributeValue, EncodeError> {
        encode_map(self.iter())
    }

    fn try_from_attribute(value: AttributeValue) -> Result<Self, DecodeError> {
        decode_map(value, Self::shape())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::PathSegment;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    enum MapKeys {
        A,
        B,
        C,
    }

    impl std::fmt::Display for MapKeys {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let c = match self {
                MapKeys::A => "A",
                MapKeys::B => "B",
                MapKeys::C => "C",
            };

            write!(f, "{c}")
        }
    }

    impl FromStr for MapKeys {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "A" => Ok(MapKeys::A),
                "B" => Ok(MapKeys::B),
                "C" => Ok(MapKeys::C),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn test_string_vec_is_a_list() {
        let test_vec = vec![
            "String0".to_string(),
            "String1".to_string(),
            "String2".to_string(),
        ];

        let attribute = test_vec.to_attribute().unwrap();

        // Never inferred to be a set from the element type
        assert!(matches!(
            &attribute,
            AttributeValue::List(x)
            if x.len() == test_vec.len()
        ));

        let original = Vec::<String>::try_from_attribute(attribute).unwrap();
        assert_eq!(original, test_vec);
    }

    #[test]
    fn test_empty_list() {
        let attribute = Vec::<String>::new().to_attribute().unwrap();
        assert_eq!(attribute, AttributeValue::List(vec![]));
    }

    #[test]
    fn test_bytes_are_binary() {
        let bytes: Vec<u8> = vec![1, 2, 3];
        assert_eq!(
            bytes.to_attribute().unwrap(),
            AttributeValue::Binary(vec![1, 2, 3])
        );

        let list_of_bytes: Vec<Vec<u8>> = vec![vec![1], vec![]];
        assert!(matches!(
            list_of_bytes.to_attribute().unwrap(),
            AttributeValue::List(x) if x.len() == 2
        ));
    }

    #[test]
    fn test_number_set() {
        let set: BTreeSet<i64> = [2, 3, 5, 7, 13].into_iter().collect();
        let attribute = set.to_attribute().unwrap();

        assert!(matches!(&attribute, AttributeValue::NumberSet(x) if x.len() == 5));
        assert_eq!(BTreeSet::<i64>::try_from_attribute(attribute).unwrap(), set);
    }

    #[test]
    fn test_binary_hash_set() {
        let set: HashSet<Vec<u8>> = [vec![1u8], vec![2, 3]].into_iter().collect();
        let attribute = set.to_attribute().unwrap();

        assert!(matches!(&attribute, AttributeValue::BinarySet(x) if x.len() == 2));
        assert_eq!(HashSet::<Vec<u8>>::try_from_attribute(attribute).unwrap(), set);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let err = BTreeSet::<String>::new().to_attribute().unwrap_err();
        assert_eq!(err.reason, EncodeReason::EmptySet);
    }

    #[test]
    fn test_set_does_not_decode_from_list() {
        let list = AttributeValue::List(vec![AttributeValue::String("a".into())]);
        let err = BTreeSet::<String>::try_from_attribute(list).unwrap_err();

        assert_eq!(
            err.reason,
            DecodeReason::TypeMismatch {
                expected: "StringSet".into(),
                found: "List"
            }
        );
    }

    #[test]
    fn test_hashmap() {
        let map = [
            (MapKeys::A, "Something in A".to_string()),
            (MapKeys::B, "Something in B".to_string()),
            (MapKeys::C, "Something in C".to_string()),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>();

        let attribute = map.to_attribute().unwrap();

        assert!(matches!(
            &attribute,
            AttributeValue::Map(x)
            if x.len() == map.len()
        ));

        let original = HashMap::<MapKeys, String>::try_from_attribute(attribute).unwrap();
        assert_eq!(original, map);
    }

    #[test]
    fn test_btreemap_invalid_key() {
        let mut document = Document::new();
        document.insert("D".into(), AttributeValue::String("nope".into()));

        let err = BTreeMap::<MapKeys, String>::try_from_attribute(AttributeValue::Map(document))
            .unwrap_err();
        assert_eq!(err.reason, DecodeReason::InvalidMapKey("D".into()));
    }

    #[test]
    fn test_empty_map_key() {
        let map: BTreeMap<String, i32> = [("".to_string(), 1)].into_iter().collect();
        let err = map.to_attribute().unwrap_err();
        assert_eq!(err.reason, EncodeReason::EmptyKey);
    }

    #[test]
    fn test_option() {
        assert_eq!(Option::<i32>::None.to_optional_attribute().unwrap(), None);
        assert_eq!(
            Option::<i32>::None.to_attribute().unwrap(),
            AttributeValue::Null
        );
        assert_eq!(
            Option::<i32>::try_from_optional_attribute(None).unwrap(),
            None
        );
        assert_eq!(
            Option::<i32>::try_from_attribute(AttributeValue::Null).unwrap(),
            None
        );
        assert_eq!(
            Some(5i32).to_optional_attribute().unwrap(),
            Some(AttributeValue::Number("5".into()))
        );

        let err = i32::try_from_optional_attribute(None).unwrap_err();
        assert_eq!(err.reason, DecodeReason::MissingRequiredField);
    }

    #[test]
    fn test_integer_bounds() {
        for value in [i64::MIN, i64::MAX] {
            let attribute = value.to_attribute().unwrap();
            assert_eq!(i64::try_from_attribute(attribute).unwrap(), value);
        }

        let attribute = u128::MAX.to_attribute().unwrap();
        assert_eq!(u128::try_from_attribute(attribute).unwrap(), u128::MAX);

        let err = i16::try_from_attribute(AttributeValue::Number("40000".into())).unwrap_err();
        assert!(matches!(
            err.reason,
            DecodeReason::InvalidNumber { target: "i16", .. }
        ));
    }

    #[test]
    fn test_float_out_of_range() {
        let err = f32::try_from_attribute(AttributeValue::Number("1e39".into())).unwrap_err();
        assert!(matches!(
            err.reason,
            DecodeReason::InvalidNumber { target: "f32", .. }
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let err = i32::try_from_attribute(AttributeValue::String("1".into())).unwrap_err();
        assert_eq!(
            err.reason,
            DecodeReason::TypeMismatch {
                expected: "Number".into(),
                found: "String"
            }
        );
    }

    #[test]
    fn test_error_path_in_nested_collections() {
        let value: BTreeMap<String, Vec<f64>> =
            [("a".to_string(), vec![1.0, f64::NAN])].into_iter().collect();

        let err = value.to_attribute().unwrap_err();

        assert_eq!(err.reason, EncodeReason::NonFiniteNumber);
        assert_eq!(
            err.path.segments().cloned().collect::<Vec<_>>(),
            vec![PathSegment::Key("a".into()), PathSegment::Index(1)]
        );
    }
}
