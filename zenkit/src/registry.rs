//! Binds collection schemas to generated, strongly typed wrappers.
//!
//! A [`CollectionRegistry`] is built once at startup (usually by calling the `register`
//! function of every generated module) and handed to [`crate::Zenkit`]. Generic lookups then
//! consult it to decide whether a collection is returned as a plain [`Collection`] or wrapped
//! in its registered type.

use crate::collection::Collection;
use crate::info;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A wrapper around [`Collection`] generated for one fixed schema.
pub trait TypedCollection: Send + 'static {
    const ID: u64;
    const UUID: &'static str;
    const WORKSPACE_ID: u64;

    fn from_collection(collection: Collection) -> Self;
    fn into_collection(self) -> Collection;
    fn collection(&self) -> &Collection;
    fn collection_mut(&mut self) -> &mut Collection;
}

/// Object safe view of any registered [`TypedCollection`].
pub trait AnyCollection: Send {
    fn inner(&self) -> &Collection;
    fn inner_mut(&mut self) -> &mut Collection;
    fn into_inner(self: Box<Self>) -> Collection;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: TypedCollection> AnyCollection for T {
    fn inner(&self) -> &Collection {
        self.collection()
    }

    fn inner_mut(&mut self) -> &mut Collection {
        self.collection_mut()
    }

    fn into_inner(self: Box<Self>) -> Collection {
        (*self).into_collection()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

type Factory = fn(Collection) -> Box<dyn AnyCollection>;

fn wrap<T: TypedCollection>(collection: Collection) -> Box<dyn AnyCollection> {
    Box::new(T::from_collection(collection))
}

#[derive(Clone, Copy)]
struct Registration {
    type_id: TypeId,
    type_name: &'static str,
    factory: Factory,
}

/// Map from collection uuid to the typed wrapper registered for it.
#[derive(Clone, Default)]
pub struct CollectionRegistry {
    by_uuid: HashMap<String, Registration>,
}

impl fmt::Debug for CollectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.by_uuid.iter().map(|(uuid, r)| (uuid.as_str(), r.type_name)).collect();
        names.sort();
        f.debug_map().entries(names).finish()
    }
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` for its schema uuid. A later registration for the same uuid replaces it.
    pub fn register<T: TypedCollection>(&mut self) -> &mut Self {
        let registration = Registration { type_id: TypeId::of::<T>(), type_name: std::any::type_name::<T>(), factory: wrap::<T> };
        if let Some(previous) = self.by_uuid.insert(T::UUID.to_string(), registration) {
            if previous.type_id != registration.type_id {
                info!("Collection {} re-registered: {} replaces {}", T::UUID, registration.type_name, previous.type_name);
            }
        }
        self
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.by_uuid.contains_key(uuid)
    }

    pub fn type_name(&self, uuid: &str) -> Option<&'static str> {
        self.by_uuid.get(uuid).map(|r| r.type_name)
    }

    pub fn len(&self) -> usize {
        self.by_uuid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uuid.is_empty()
    }

    /// Wraps `collection` in its registered type, or returns it unchanged.
    pub fn bind(&self, collection: Collection) -> BoundCollection {
        match self.by_uuid.get(collection.uuid()) {
            Some(registration) => BoundCollection::Typed((registration.factory)(collection)),
            None => BoundCollection::Generic(collection),
        }
    }
}

/// Result of a registry-aware collection lookup.
pub enum BoundCollection {
    Generic(Collection),
    Typed(Box<dyn AnyCollection>),
}

impl fmt::Debug for BoundCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundCollection::Generic(c) => f.debug_tuple("Generic").field(c).finish(),
            BoundCollection::Typed(t) => f.debug_tuple("Typed").field(&t.type_name()).field(t.inner()).finish(),
        }
    }
}

impl BoundCollection {
    pub fn is_typed(&self) -> bool {
        matches!(self, BoundCollection::Typed(_))
    }

    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            BoundCollection::Generic(_) => None,
            BoundCollection::Typed(t) => Some(t.type_name()),
        }
    }

    pub fn collection(&self) -> &Collection {
        match self {
            BoundCollection::Generic(c) => c,
            BoundCollection::Typed(t) => t.inner(),
        }
    }

    pub fn collection_mut(&mut self) -> &mut Collection {
        match self {
            BoundCollection::Generic(c) => c,
            BoundCollection::Typed(t) => t.inner_mut(),
        }
    }

    pub fn into_collection(self) -> Collection {
        match self {
            BoundCollection::Generic(c) => c,
            BoundCollection::Typed(t) => t.into_inner(),
        }
    }

    /// The typed wrapper, if this collection was bound to `T`.
    pub fn downcast<T: TypedCollection>(self) -> Option<T> {
        match self {
            BoundCollection::Typed(t) => t.into_any().downcast::<T>().ok().map(|t| *t),
            BoundCollection::Generic(_) => None,
        }
    }

    pub fn downcast_ref<T: TypedCollection>(&self) -> Option<&T> {
        match self {
            BoundCollection::Typed(t) => t.as_any().downcast_ref::<T>(),
            BoundCollection::Generic(_) => None,
        }
    }

    pub fn downcast_mut<T: TypedCollection>(&mut self) -> Option<&mut T> {
        match self {
            BoundCollection::Typed(t) => t.as_any_mut().downcast_mut::<T>(),
            BoundCollection::Generic(_) => None,
        }
    }
}
