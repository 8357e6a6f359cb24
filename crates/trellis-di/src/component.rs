//! Component descriptions: what a type provides and how it is built
//!
//! A type takes part in injection by implementing [`Injectable`], which lists
//! the services it *directly* provides. Types the container can build also
//! implement [`Component`], declaring a tuple of dependencies and a
//! constructor that receives them already resolved.
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_di::{interfaces, Component, Injectable, Interfaces};
//!
//! trait Store: Send + Sync {}
//! trait Audit: Send + Sync {}
//!
//! struct MemoryStore;
//! impl Store for MemoryStore {}
//!
//! impl Injectable for MemoryStore {
//!     fn interfaces() -> Interfaces<Self> {
//!         interfaces![dyn Store]
//!     }
//! }
//!
//! struct AuditedStore {
//!     inner: Arc<dyn Store>,
//! }
//! impl Audit for AuditedStore {}
//!
//! impl Injectable for AuditedStore {
//!     fn interfaces() -> Interfaces<Self> {
//!         interfaces![dyn Audit]
//!     }
//! }
//!
//! impl Component for AuditedStore {
//!     type Dependencies = (Arc<dyn Store>,);
//!
//!     fn construct((inner,): Self::Dependencies) -> Self {
//!         AuditedStore { inner }
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::resolver::Resolver;
use crate::service::{Instance, ServiceId};
use crate::DIResult;

pub(crate) type ErasedArc = Arc<dyn Any + Send + Sync>;

pub(crate) type Constructor =
    Arc<dyn Fn(&mut Resolver<'_>) -> DIResult<ErasedArc> + Send + Sync>;

/// Turns a freshly built implementation value into the service-shaped instance.
pub(crate) type Upcast = Arc<dyn Fn(ErasedArc) -> Option<Instance> + Send + Sync>;

/// A type that can be bound to services in the container.
pub trait Injectable: Send + Sync + Sized + 'static {
    /// Services this type directly provides, besides itself.
    ///
    /// Compatibility is not transitive: a service reachable only through
    /// another listed service must be listed too.
    fn interfaces() -> Interfaces<Self> {
        Interfaces::new()
    }
}

/// A type the container knows how to construct.
pub trait Component: Injectable {
    /// Constructor parameters, resolved left to right.
    type Dependencies: Dependencies;

    fn construct(dependencies: Self::Dependencies) -> Self;
}

#[derive(Clone)]
struct Interface {
    service: ServiceId,
    upcast: Upcast,
}

/// Ordered list of the services an implementation `T` directly provides.
///
/// Usually built with the [`interfaces!`](crate::interfaces) macro.
pub struct Interfaces<T> {
    entries: Vec<Interface>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Interfaces<T>
where
    T: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Declare that `T` provides `S`, with the coercion from `Arc<T>`.
    pub fn with<S>(mut self, upcast: fn(Arc<T>) -> Arc<S>) -> Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.entries.push(Interface {
            service: ServiceId::of::<S>(),
            upcast: Arc::new(move |raw: ErasedArc| {
                raw.downcast::<T>()
                    .ok()
                    .map(|this| Instance::new(upcast(this)))
            }),
        });
        self
    }

    pub fn services(&self) -> Vec<ServiceId> {
        self.entries.iter().map(|entry| entry.service).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Interfaces<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A single constructor parameter.
pub trait Dependency: Sized {
    fn resolve(resolver: &mut Resolver<'_>) -> DIResult<Self>;
}

impl<S> Dependency for Arc<S>
where
    S: ?Sized + Send + Sync + 'static,
{
    fn resolve(resolver: &mut Resolver<'_>) -> DIResult<Self> {
        resolver.resolve_dependency::<S>()
    }
}

/// The full parameter list of a constructor.
///
/// Implemented for `()` and for tuples of up to twelve [`Dependency`] values.
pub trait Dependencies: Sized {
    fn resolve(resolver: &mut Resolver<'_>) -> DIResult<Self>;
}

impl Dependencies for () {
    fn resolve(_resolver: &mut Resolver<'_>) -> DIResult<Self> {
        Ok(())
    }
}

// Tuple expressions evaluate left to right, which fixes declaration order.
macro_rules! impl_dependencies_tuple {
    ($($T:ident),+) => {
        impl<$($T: Dependency),+> Dependencies for ($($T,)+) {
            fn resolve(resolver: &mut Resolver<'_>) -> DIResult<Self> {
                Ok(($(<$T as Dependency>::resolve(resolver)?,)+))
            }
        }
    };
}

impl_dependencies_tuple!(A);
impl_dependencies_tuple!(A, B);
impl_dependencies_tuple!(A, B, C);
impl_dependencies_tuple!(A, B, C, D);
impl_dependencies_tuple!(A, B, C, D, E);
impl_dependencies_tuple!(A, B, C, D, E, F);
impl_dependencies_tuple!(A, B, C, D, E, F, G);
impl_dependencies_tuple!(A, B, C, D, E, F, G, H);
impl_dependencies_tuple!(A, B, C, D, E, F, G, H, I);
impl_dependencies_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_dependencies_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_dependencies_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Registration-time descriptor of a concrete implementation type.
#[derive(Clone)]
pub struct Implementation {
    id: ServiceId,
    interfaces: Vec<Interface>,
    constructor: Option<Constructor>,
    self_binding: Upcast,
}

impl Implementation {
    /// Describe `T` without a constructor. Suitable for seeded singletons;
    /// resolving a transient or singleton binding of it fails.
    pub fn of<T: Injectable>() -> Self {
        Self {
            id: ServiceId::of::<T>(),
            interfaces: T::interfaces().entries,
            constructor: None,
            self_binding: Arc::new(|raw: ErasedArc| raw.downcast::<T>().ok().map(Instance::new)),
        }
    }

    /// Describe `T` together with its constructor.
    pub fn component<T: Component>() -> Self {
        let constructor: Constructor = Arc::new(build_component::<T>);
        Self {
            constructor: Some(constructor),
            ..Self::of::<T>()
        }
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.id.type_name()
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// Services this implementation directly provides, in declaration order.
    pub fn provided_services(&self) -> Vec<ServiceId> {
        self.interfaces.iter().map(|entry| entry.service).collect()
    }

    /// True when `service` is this type itself or one it directly provides.
    pub fn is_compatible_with(&self, service: ServiceId) -> bool {
        self.binding_for(service).is_some()
    }

    pub(crate) fn binding_for(&self, service: ServiceId) -> Option<Upcast> {
        if service == self.id {
            return Some(self.self_binding.clone());
        }
        self.interfaces
            .iter()
            .find(|entry| entry.service == service)
            .map(|entry| entry.upcast.clone())
    }

    pub(crate) fn constructor(&self) -> Option<Constructor> {
        self.constructor.clone()
    }
}

fn build_component<T: Component>(resolver: &mut Resolver<'_>) -> DIResult<ErasedArc> {
    let dependencies = <T::Dependencies as Dependencies>::resolve(resolver)?;
    Ok(Arc::new(T::construct(dependencies)) as ErasedArc)
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("id", &self.id)
            .field("provides", &self.provided_services())
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}
