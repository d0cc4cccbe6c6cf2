use crate::AttributeValue;

/// Key values supplied independently of a record, before they are bound to the key
/// attribute names of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKeyParts {
    pub pk: AttributeValue,
    pub sk: Option<AttributeValue>,
}

pub trait PrimaryKey: private::Sealed {
    fn into_parts(self) -> PrimaryKeyParts;
}

impl PrimaryKey for Pk {
    fn into_parts(self) -> PrimaryKeyParts {
        PrimaryKeyParts {
            pk: self.0,
            sk: None,
        }
    }
}

impl PrimaryKey for PkSk {
    fn into_parts(self) -> PrimaryKeyParts {
        PrimaryKeyParts {
            pk: self.0,
            sk: Some(self.1),
        }
    }
}

impl PrimaryKey for PrimaryKeyParts {
    fn into_parts(self) -> PrimaryKeyParts {
        self
    }
}

impl<P: Into<AttributeValue>, S: Into<AttributeValue>> PrimaryKey for (P, S) {
    fn into_parts(self) -> PrimaryKeyParts {
        PkSk::new(self.0, self.1).into_parts()
    }
}

/// A partition key without a sort key.
pub struct Pk(pub AttributeValue);

impl Pk {
    pub fn new(pk: impl Into<AttributeValue>) -> Self {
        Self(pk.into())
    }
}

impl<P: Into<AttributeValue>> From<P> for Pk {
    fn from(value: P) -> Self {
        Self::new(value)
    }
}

/// A partition key and a sort key.
pub struct PkSk(pub AttributeValue, pub AttributeValue);

impl<P: Into<AttributeValue>, S: Into<AttributeValue>> From<(P, S)> for PkSk {
    fn from(value: (P, S)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl PkSk {
    pub fn new(pk: impl Into<AttributeValue>, sk: impl Into<AttributeValue>) -> Self {
        Self(pk.into(), sk.into())
    }
}

mod private {
    use super::*;

    pub trait Sealed {}

    impl Sealed for Pk {}
    impl Sealed for PkSk {}
    impl Sealed for PrimaryKeyParts {}
    impl<P: Into<AttributeValue>, S: Into<AttributeValue>> Sealed for (P, S) {}
}
