//! Per-request resolution context
//!
//! A [`Resolver`] is created for every top-level resolution and handed down
//! through each constructor, so nested parameters are resolved against the
//! same registry. It also records the chain of providers currently running.
//! Cycle detection keys on the provider, so a later binding of a service may
//! depend on that same service through its first binding.

use std::sync::Arc;

use tracing::trace;

use crate::provider::Provider;
use crate::registry::Registry;
use crate::service::{Instance, ServiceId};
use crate::{DIError, DIResult};

pub struct Resolver<'a> {
    registry: &'a Registry,
    detect_cycles: bool,
    path: Vec<ServiceId>,
    active: Vec<&'a Provider>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(registry: &'a Registry, detect_cycles: bool) -> Self {
        Self {
            registry,
            detect_cycles,
            path: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Resolve a constructor parameter of type `Arc<S>`.
    pub fn resolve_dependency<S>(&mut self) -> DIResult<Arc<S>>
    where
        S: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_dependency_type(ServiceId::of::<S>())?;
        downcast(&instance)
    }

    /// Resolve a constructor parameter through the first provider registered
    /// for `service`.
    pub fn resolve_dependency_type(&mut self, service: ServiceId) -> DIResult<Instance> {
        let registry = self.registry;
        match registry.lookup(service).and_then(|providers| providers.first()) {
            Some(provider) => self.invoke(service, provider),
            None => Err(DIError::MissingDependency {
                service_type: self
                    .path
                    .last()
                    .map(|owner| owner.type_name())
                    .unwrap_or("<root>")
                    .to_string(),
                dependency_type: service.type_name().to_string(),
            }),
        }
    }

    /// Services currently under construction, outermost first.
    pub fn path(&self) -> &[ServiceId] {
        &self.path
    }

    pub(crate) fn invoke(
        &mut self,
        service: ServiceId,
        provider: &'a Provider,
    ) -> DIResult<Instance> {
        self.enter(service, provider)?;
        trace!(
            "Invoking {} provider for {} (depth {})",
            provider.lifetime(),
            service,
            self.path.len()
        );
        let result = provider.get_instance(self);
        self.path.pop();
        self.active.pop();
        result
    }

    fn enter(&mut self, service: ServiceId, provider: &'a Provider) -> DIResult<()> {
        if self.detect_cycles
            && self
                .active
                .iter()
                .any(|running| std::ptr::eq(*running, provider))
        {
            let path = self
                .path
                .iter()
                .chain(std::iter::once(&service))
                .map(|id| id.type_name())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(DIError::CyclicDependency { path });
        }
        self.path.push(service);
        self.active.push(provider);
        Ok(())
    }
}

pub(crate) fn downcast<S>(instance: &Instance) -> DIResult<Arc<S>>
where
    S: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast::<S>()
        .ok_or_else(|| DIError::ServiceTypeMismatch {
            service_type: std::any::type_name::<S>().to_string(),
        })
}
