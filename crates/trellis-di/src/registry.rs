//! Registry mapping service identities to ordered provider sequences
//!
//! Entries are only ever appended, so a key that is present always has at
//! least one provider. The first provider registered for a service is the
//! default resolution target.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::component::{Implementation, Upcast};
use crate::lifetime::Lifetime;
use crate::provider::Provider;
use crate::service::ServiceId;
use crate::{DIError, DIResult};

#[derive(Default)]
pub struct Registry {
    providers: HashMap<ServiceId, Vec<Provider>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transient or singleton provider building `implementation`
    /// for `service`.
    pub fn register(
        &mut self,
        service: ServiceId,
        implementation: &Implementation,
        lifetime: Lifetime,
    ) -> DIResult<()> {
        let binding = Self::validate(service, implementation)?;
        self.push(service, Provider::new(implementation, binding, lifetime));

        debug!(
            "Registered {} service: {} => {}",
            lifetime,
            service,
            implementation.type_name()
        );
        Ok(())
    }

    /// Append a singleton provider pre-populated with `instance`, whose
    /// runtime type must be `implementation`.
    pub fn register_instance(
        &mut self,
        service: ServiceId,
        implementation: &Implementation,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> DIResult<()> {
        let binding = Self::validate(service, implementation)?;
        let instance = binding(instance).ok_or_else(|| DIError::InvalidRegistration {
            service_type: service.type_name().to_string(),
            implementation_type: format!("value not of type {}", implementation.type_name()),
        })?;
        self.push(service, Provider::seeded(implementation.id(), instance));

        debug!(
            "Registered singleton instance: {} => {}",
            service,
            implementation.type_name()
        );
        Ok(())
    }

    /// Providers for `service` in registration order.
    pub fn lookup(&self, service: ServiceId) -> Option<&[Provider]> {
        self.providers.get(&service).map(Vec::as_slice)
    }

    pub fn contains(&self, service: ServiceId) -> bool {
        self.providers.contains_key(&service)
    }

    /// Number of distinct service identities.
    pub fn service_count(&self) -> usize {
        self.providers.len()
    }

    /// Number of providers registered for `service`.
    pub fn registration_count(&self, service: ServiceId) -> usize {
        self.providers.get(&service).map_or(0, Vec::len)
    }

    pub fn services(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.providers.keys().copied()
    }

    fn validate(service: ServiceId, implementation: &Implementation) -> DIResult<Upcast> {
        implementation
            .binding_for(service)
            .ok_or_else(|| DIError::InvalidRegistration {
                service_type: service.type_name().to_string(),
                implementation_type: implementation.type_name().to_string(),
            })
    }

    fn push(&mut self, service: ServiceId, provider: Provider) {
        self.providers.entry(service).or_default().push(provider);
    }
}
