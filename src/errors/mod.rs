use thiserror::Error;

mod path;
pub use path::{AttributePath, PathSegment};

/// Error returned when a record type's schema is invalid.
///
/// Schema errors are raised the first time a type is described and are never retried:
/// the type definition has to be fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Record type '{0}' declares no fields")]
    ZeroFields(String),
    #[error("Record type '{0}' declares a field with an empty name")]
    EmptyFieldName(String),
    #[error("Record type '{type_name}' declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },
    #[error("Record type '{type_name}': partition key was already specified to be '{existing}', found '{field}'")]
    DuplicatePartitionKey {
        type_name: String,
        existing: String,
        field: String,
    },
    #[error("Record type '{type_name}': sort key was already specified to be '{existing}', found '{field}'")]
    DuplicateSortKey {
        type_name: String,
        existing: String,
        field: String,
    },
    #[error("Record type '{type_name}' declares sort key '{field}' without a partition key")]
    SortKeyWithoutPartitionKey { type_name: String, field: String },
    #[error("Record type '{0}' has no partition key")]
    MissingPartitionKey(String),
    #[error("Key field '{field}' of '{type_name}' must be a non-nullable String, Number or Binary, found {shape}")]
    InvalidKey {
        type_name: String,
        field: String,
        shape: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeReason {
    #[error("number is NaN or infinite")]
    NonFiniteNumber,
    #[error("set is empty")]
    EmptySet,
    #[error("map key is empty")]
    EmptyKey,
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),
    #[error("invalid schema: {0}")]
    InvalidSchema(SchemaError),
}

/// Error returned by [`encode`](crate::encode) when a record cannot be represented as a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to encode {path}: {reason}")]
pub struct EncodeError {
    pub reason: EncodeReason,
    pub path: AttributePath,
}

impl EncodeError {
    pub fn new(reason: EncodeReason) -> Self {
        Self {
            reason,
            path: AttributePath::new(),
        }
    }

    pub fn reason(&self) -> &EncodeReason {
        &self.reason
    }

    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    pub(crate) fn in_field(mut self, name: &str) -> Self {
        self.path.push_front(PathSegment::Field(name.to_string()));
        self
    }

    pub(crate) fn in_index(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Index(index));
        self
    }

    pub(crate) fn in_key(mut self, key: &str) -> Self {
        self.path.push_front(PathSegment::Key(key.to_string()));
        self
    }
}

impl From<SchemaError> for EncodeError {
    fn from(error: SchemaError) -> Self {
        Self::new(EncodeReason::InvalidSchema(error))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeReason {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },
    #[error("missing required field")]
    MissingRequiredField,
    #[error("invalid number '{value}' for {target}")]
    InvalidNumber { value: String, target: &'static str },
    #[error("invalid map key '{0}'")]
    InvalidMapKey(String),
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),
    #[error("invalid schema: {0}")]
    InvalidSchema(SchemaError),
}

/// Error returned by [`decode`](crate::decode) when a document does not match the target record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode {path}: {reason}")]
pub struct DecodeError {
    pub reason: DecodeReason,
    pub path: AttributePath,
}

impl DecodeError {
    pub fn new(reason: DecodeReason) -> Self {
        Self {
            reason,
            path: AttributePath::new(),
        }
    }

    pub fn type_mismatch(expected: impl ToString, found: &'static str) -> Self {
        Self::new(DecodeReason::TypeMismatch {
            expected: expected.to_string(),
            found,
        })
    }

    pub fn reason(&self) -> &DecodeReason {
        &self.reason
    }

    pub fn path(&self) -> &AttributePath {
        &self.path
    }

    pub(crate) fn in_field(mut self, name: &str) -> Self {
        self.path.push_front(PathSegment::Field(name.to_string()));
        self
    }

    pub(crate) fn in_index(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Index(index));
        self
    }

    pub(crate) fn in_key(mut self, key: &str) -> Self {
        self.path.push_front(PathSegment::Key(key.to_string()));
        self
    }
}

impl From<SchemaError> for DecodeError {
    fn from(error: SchemaError) -> Self {
        Self::new(DecodeReason::InvalidSchema(error))
    }
}

/// Error returned when a key does not fit the key schema of a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key attribute '{0}' is missing")]
    MissingAttribute(String),
    #[error("Table requires a sort key '{0}'")]
    MissingSortKey(String),
    #[error("Table has no sort key but one was provided")]
    UnexpectedSortKey,
    #[error("Key attribute '{name}' must be {expected}, found {found}")]
    ShapeMismatch {
        name: String,
        expected: String,
        found: &'static str,
    },
}

/// Error returned when a number exceeds what the target store can hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("Number '{value}' at {path} has {digits} significant digits, the limit is {limit}")]
    Precision {
        value: String,
        path: AttributePath,
        digits: usize,
        limit: usize,
    },
    #[error("Number '{value}' at {path} is out of range (exponent {exponent})")]
    Magnitude {
        value: String,
        path: AttributePath,
        exponent: i64,
    },
}

/// Error returned by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("AwsError: {0}")]
    Aws(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] DecodeError),
    #[error("Key Error: {0}")]
    Key(#[from] KeyError),
}

/// Error returned by [`Table::init`](crate::Table::init) when the record type cannot back a table
#[derive(Error, Debug)]
pub enum InitError {
    #[error("SchemaError: {0}")]
    Schema(#[from] SchemaError),
}

/// Error returned by [`Table::put`](crate::Table::put) when encoding and writing a record
#[derive(Error, Debug)]
pub enum PutError {
    #[error("EncodeError: {0}")]
    Encode(#[from] EncodeError),
    #[error("KeyError: {0}")]
    Key(#[from] KeyError),
    #[error("LimitError: {0}")]
    Limit(#[from] LimitError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

/// Error returned by [`Table::get`](crate::Table::get) when reading and decoding a record
#[derive(Error, Debug)]
pub enum GetError {
    #[error("KeyError: {0}")]
    Key(#[from] KeyError),
    #[error("DecodeError: {0}")]
    Decode(#[from] DecodeError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

/// Error returned by [`Table::delete`](crate::Table::delete)
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("KeyError: {0}")]
    Key(#[from] KeyError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

/// Error returned by [`Table::query`](crate::Table::query) when reading and decoding records
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("KeyError: {0}")]
    Key(#[from] KeyError),
    #[error("DecodeError: {0}")]
    Decode(#[from] DecodeError),
    #[error("StoreError: {0}")]
    Store(#[from] StoreError),
}

/// Error returned when configuration cannot be loaded from the environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Error abstracting all errors returned by `dynamodb-mapper`.
///
/// If you use this error you can use `?` to convert from other `dynamodb-mapper` errors to
/// this one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("SchemaError: {0}")]
    Schema(#[from] SchemaError),
    #[error("EncodeError: {0}")]
    Encode(#[from] EncodeError),
    #[error("DecodeError: {0}")]
    Decode(#[from] DecodeError),
    #[error("InitError: {0}")]
    Init(#[from] InitError),
    #[error("PutError: {0}")]
    Put(#[from] PutError),
    #[error("GetError: {0}")]
    Get(#[from] GetError),
    #[error("DeleteError: {0}")]
    Delete(#[from] DeleteError),
    #[error("QueryError: {0}")]
    Query(#[from] QueryError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
}
