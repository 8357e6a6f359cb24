//! Providers: one per registration, producing instances per lifetime policy
//!
//! A transient provider runs its constructor on every call. A singleton
//! provider runs it at most once, under its own lock, and hands out the cached
//! value afterwards. A seeded provider was given its value at registration and
//! never constructs anything.

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::component::{Constructor, Implementation, Upcast};
use crate::lifetime::Lifetime;
use crate::resolver::Resolver;
use crate::service::{Instance, ServiceId};
use crate::{DIError, DIResult};

/// How to build the implementation and present it as the registered service.
struct Recipe {
    constructor: Option<Constructor>,
    binding: Upcast,
}

enum ProviderKind {
    Transient(Recipe),
    Singleton {
        recipe: Recipe,
        cell: Mutex<Option<Instance>>,
    },
    Seeded(Instance),
}

pub struct Provider {
    implementation: ServiceId,
    kind: ProviderKind,
}

impl Provider {
    pub(crate) fn new(implementation: &Implementation, binding: Upcast, lifetime: Lifetime) -> Self {
        let recipe = Recipe {
            constructor: implementation.constructor(),
            binding,
        };
        let kind = match lifetime {
            Lifetime::Transient => ProviderKind::Transient(recipe),
            Lifetime::Singleton => ProviderKind::Singleton {
                recipe,
                cell: Mutex::new(None),
            },
        };
        Self {
            implementation: implementation.id(),
            kind,
        }
    }

    pub(crate) fn seeded(implementation: ServiceId, instance: Instance) -> Self {
        Self {
            implementation,
            kind: ProviderKind::Seeded(instance),
        }
    }

    pub fn lifetime(&self) -> Lifetime {
        match self.kind {
            ProviderKind::Transient(_) => Lifetime::Transient,
            ProviderKind::Singleton { .. } | ProviderKind::Seeded(_) => Lifetime::Singleton,
        }
    }

    pub fn implementation_type(&self) -> ServiceId {
        self.implementation
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self.kind, ProviderKind::Seeded(_))
    }

    /// Whether a cached instance exists. Always false for transients.
    ///
    /// Takes the singleton lock, so it must not be called from inside that
    /// singleton's own construction.
    pub fn is_populated(&self) -> bool {
        match &self.kind {
            ProviderKind::Transient(_) => false,
            ProviderKind::Singleton { cell, .. } => cell.lock().is_some(),
            ProviderKind::Seeded(_) => true,
        }
    }

    pub(crate) fn get_instance(&self, resolver: &mut Resolver<'_>) -> DIResult<Instance> {
        match &self.kind {
            ProviderKind::Transient(recipe) => self.build(recipe, resolver),
            ProviderKind::Singleton { recipe, cell } => {
                // Held across construction so racing first uses build once.
                let mut cell = cell.lock();
                if let Some(instance) = cell.as_ref() {
                    trace!("Singleton cache hit for {}", self.implementation);
                    return Ok(instance.clone());
                }
                let instance = self.build(recipe, resolver)?;
                debug!("Constructed singleton {}", self.implementation);
                *cell = Some(instance.clone());
                Ok(instance)
            }
            ProviderKind::Seeded(instance) => Ok(instance.clone()),
        }
    }

    fn build(&self, recipe: &Recipe, resolver: &mut Resolver<'_>) -> DIResult<Instance> {
        let constructor = recipe
            .constructor
            .as_ref()
            .ok_or_else(|| DIError::NoConstructorAvailable {
                implementation_type: self.implementation.type_name().to_string(),
            })?;
        let raw = constructor(resolver)?;
        (recipe.binding)(raw).ok_or_else(|| DIError::ServiceTypeMismatch {
            service_type: self.implementation.type_name().to_string(),
        })
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime())
            .field("seeded", &self.is_seeded())
            .finish()
    }
}
