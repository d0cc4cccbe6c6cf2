use super::SchemaDescriptor;
use crate::{errors::SchemaError, traits::Record};
use log::debug;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

type CachedDescriptor = Arc<dyn Any + Send + Sync>;

/// A cache of [`SchemaDescriptor`]s, one per record type.
///
/// Descriptors are computed on first request and kept for the lifetime of the
/// registry. Two threads requesting the same type for the first time may both compute
/// it, the first one stored wins and both callers get that one.
#[derive(Default)]
pub struct SchemaRegistry {
    descriptors: RwLock<HashMap<TypeId, CachedDescriptor>>,
}

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process wide registry used by [`encode`](crate::encode) and [`decode`](crate::decode).
    pub fn global() -> &'static SchemaRegistry {
        GLOBAL.get_or_init(SchemaRegistry::new)
    }

    pub fn get<T: Record>(&self) -> Result<Arc<SchemaDescriptor<T>>, SchemaError> {
        if let Some(descriptor) = self.cached::<T>() {
            return Ok(descriptor);
        }

        let computed = Arc::new(T::describe()?);

        let mut descriptors = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let stored = descriptors
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                debug!(
                    "Described record type {} with {} fields",
                    computed.type_name(),
                    computed.fields().len()
                );
                computed.clone()
            })
            .clone();

        // Entries are keyed by the TypeId of the descriptor's record type
        Ok(stored.downcast::<SchemaDescriptor<T>>().unwrap_or(computed))
    }

    /// Returns true if the descriptor of `T` has already been computed.
    pub fn contains<T: Record>(&self) -> bool {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached<T: Record>(&self) -> Option<Arc<SchemaDescriptor<T>>> {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|descriptor| descriptor.downcast().ok())
    }
}
