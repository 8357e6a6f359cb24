//! Service identities and type-erased instances

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime type token used as a registry key.
///
/// Two identities are equal when they name the same type; the type name is
/// carried for diagnostics only.
#[derive(Clone, Copy)]
pub struct ServiceId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ServiceId {
    /// Identity of `T`, which may be an unsized trait object such as `dyn Trait`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ServiceId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceId {}

impl Hash for ServiceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceId").field(&self.type_name).finish()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A resolved service value with its static type erased.
///
/// Holds an `Arc<S>` for the service `S` it was produced for, so trait-object
/// services survive the round trip through `Any`. Cloning is cheap and shares
/// the underlying value.
#[derive(Clone)]
pub struct Instance {
    service: ServiceId,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap a service value produced for service `S`.
    pub fn new<S>(value: Arc<S>) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        Self {
            service: ServiceId::of::<S>(),
            value: Arc::new(value),
        }
    }

    /// The service this instance was produced for.
    pub fn service(&self) -> ServiceId {
        self.service
    }

    /// Recover the typed handle; `None` if `S` is not the service this
    /// instance was produced for.
    pub fn downcast<S>(&self) -> Option<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.value.downcast_ref::<Arc<S>>().cloned()
    }

    /// Whether both handles share one cached value.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
