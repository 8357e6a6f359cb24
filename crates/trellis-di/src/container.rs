//! The container facade
//!
//! Registration methods take `&mut self` and resolution methods take `&self`,
//! so every registration has to finish before the container can be shared for
//! resolution. Once shared, the registry is never mutated again and concurrent
//! resolution is safe.

use std::any::Any;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::TypeCatalog;
use crate::component::{Component, Implementation, Injectable};
use crate::config::{ContainerConfig, ContainerOptions};
use crate::lifetime::Lifetime;
use crate::registry::Registry;
use crate::resolver::{downcast, Resolver};
use crate::service::{Instance, ServiceId};
use crate::{DIError, DIResult};

/// The dependency injection container
pub struct Container {
    registry: Registry,
    options: ContainerOptions,
}

impl Container {
    /// Create a new empty container with default options
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    pub fn with_options(options: ContainerOptions) -> Self {
        if !options.detect_cycles {
            warn!("Cycle detection disabled; cyclic registrations will not terminate");
        }
        Self {
            registry: Registry::new(),
            options,
        }
    }

    /// Create a container from a configuration, registering every binding
    /// it lists.
    pub fn from_config(catalog: &TypeCatalog, config: &ContainerConfig) -> DIResult<Self> {
        let mut container = Self::with_options(config.options.clone());
        container.apply_config(catalog, config)?;
        Ok(container)
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register `T` as its own service.
    pub fn register<T: Component>(&mut self, lifetime: Lifetime) -> DIResult<()> {
        self.register_type(
            ServiceId::of::<T>(),
            &Implementation::component::<T>(),
            lifetime,
        )
    }

    /// Register implementation `I` for service `S`.
    pub fn register_as<S, I>(&mut self, lifetime: Lifetime) -> DIResult<()>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Component,
    {
        self.register_type(
            ServiceId::of::<S>(),
            &Implementation::component::<I>(),
            lifetime,
        )
    }

    pub fn register_type(
        &mut self,
        service: ServiceId,
        implementation: &Implementation,
        lifetime: Lifetime,
    ) -> DIResult<()> {
        self.registry.register(service, implementation, lifetime)
    }

    /// Register an existing value as the singleton for its own type.
    pub fn register_singleton<T: Injectable>(&mut self, value: T) -> DIResult<()> {
        self.register_instance::<T, T>(Arc::new(value))
    }

    /// Register an existing value as a singleton for service `S`.
    pub fn register_instance<S, I>(&mut self, instance: Arc<I>) -> DIResult<()>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Injectable,
    {
        self.registry
            .register_instance(ServiceId::of::<S>(), &Implementation::of::<I>(), instance)
    }

    pub fn register_erased_instance(
        &mut self,
        service: ServiceId,
        implementation: &Implementation,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> DIResult<()> {
        self.registry
            .register_instance(service, implementation, instance)
    }

    /// Register every binding of `config`, in order, stopping at the first
    /// failure.
    pub fn apply_config(&mut self, catalog: &TypeCatalog, config: &ContainerConfig) -> DIResult<()> {
        for binding in &config.bindings {
            let (service, implementation, lifetime) = catalog.resolve_binding(binding)?;
            self.registry.register(service, implementation, lifetime)?;
        }
        info!("Applied {} configured bindings", config.bindings.len());
        Ok(())
    }

    /// Resolve the default (first registered) implementation of `S`.
    pub fn resolve<S>(&self) -> DIResult<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_type(ServiceId::of::<S>())?;
        downcast(&instance)
    }

    /// Resolve every implementation of `S`, in registration order.
    pub fn resolve_all<S>(&self) -> DIResult<Vec<Arc<S>>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.resolve_all_type(ServiceId::of::<S>())?
            .iter()
            .map(downcast::<S>)
            .collect()
    }

    pub fn resolve_type(&self, service: ServiceId) -> DIResult<Instance> {
        let provider = self
            .registry
            .lookup(service)
            .and_then(|providers| providers.first())
            .ok_or_else(|| not_registered(service))?;
        self.resolver().invoke(service, provider)
    }

    pub fn resolve_all_type(&self, service: ServiceId) -> DIResult<Vec<Instance>> {
        let providers = self
            .registry
            .lookup(service)
            .ok_or_else(|| not_registered(service))?;
        let mut resolver = self.resolver();
        providers
            .iter()
            .map(|provider| resolver.invoke(service, provider))
            .collect()
    }

    /// Check if a service is registered
    pub fn is_registered<S: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(ServiceId::of::<S>())
    }

    /// Get the number of registered service identities
    pub fn service_count(&self) -> usize {
        self.registry.service_count()
    }

    pub fn registration_count<S: ?Sized + 'static>(&self) -> usize {
        self.registry.registration_count(ServiceId::of::<S>())
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry, self.options.detect_cycles)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

fn not_registered(service: ServiceId) -> DIError {
    DIError::NotRegistered {
        service_type: service.type_name().to_string(),
    }
}

/// Builder pattern for configuring the container
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            container: Container::with_options(options),
        }
    }

    pub fn register<T: Component>(mut self, lifetime: Lifetime) -> DIResult<Self> {
        self.container.register::<T>(lifetime)?;
        Ok(self)
    }

    pub fn register_as<S, I>(mut self, lifetime: Lifetime) -> DIResult<Self>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Component,
    {
        self.container.register_as::<S, I>(lifetime)?;
        Ok(self)
    }

    pub fn register_singleton<T: Injectable>(mut self, value: T) -> DIResult<Self> {
        self.container.register_singleton(value)?;
        Ok(self)
    }

    pub fn register_instance<S, I>(mut self, instance: Arc<I>) -> DIResult<Self>
    where
        S: ?Sized + Send + Sync + 'static,
        I: Injectable,
    {
        self.container.register_instance::<S, I>(instance)?;
        Ok(self)
    }

    pub fn apply_config(mut self, catalog: &TypeCatalog, config: &ContainerConfig) -> DIResult<Self> {
        self.container.apply_config(catalog, config)?;
        Ok(self)
    }

    /// Build the container
    pub fn build(self) -> Container {
        info!(
            "Built container with {} services",
            self.container.service_count()
        );
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
