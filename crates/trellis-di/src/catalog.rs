//! Named types for configuration-driven registration

use std::collections::HashMap;

use crate::component::{Component, Implementation};
use crate::config::BindingConfig;
use crate::lifetime::Lifetime;
use crate::service::ServiceId;
use crate::{DIError, DIResult};

/// Maps the names used in configuration files to service identities and
/// implementation descriptors.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    services: HashMap<String, ServiceId>,
    implementations: HashMap<String, Implementation>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name a service identity, typically a trait object.
    pub fn add_service<S: ?Sized + 'static>(&mut self, name: impl Into<String>) -> &mut Self {
        self.services.insert(name.into(), ServiceId::of::<S>());
        self
    }

    /// Name a constructible type, usable both as implementation and as a
    /// self-bound service.
    pub fn add_component<T: Component>(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_implementation(name, Implementation::component::<T>())
    }

    pub fn add_implementation(
        &mut self,
        name: impl Into<String>,
        implementation: Implementation,
    ) -> &mut Self {
        let name = name.into();
        self.services.insert(name.clone(), implementation.id());
        self.implementations.insert(name, implementation);
        self
    }

    pub fn service(&self, name: &str) -> DIResult<ServiceId> {
        let name = non_blank(name, "service")?;
        self.services
            .get(name)
            .copied()
            .ok_or_else(|| DIError::UnknownType {
                name: name.to_string(),
            })
    }

    pub fn implementation(&self, name: &str) -> DIResult<&Implementation> {
        let name = non_blank(name, "implementation")?;
        self.implementations
            .get(name)
            .ok_or_else(|| DIError::UnknownType {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub(crate) fn resolve_binding(
        &self,
        binding: &BindingConfig,
    ) -> DIResult<(ServiceId, &Implementation, Lifetime)> {
        let service_name = binding.service.as_deref().unwrap_or_default();
        let service = self.service(service_name)?;
        let implementation =
            self.implementation(binding.implementation.as_deref().unwrap_or(service_name))?;
        let lifetime = match binding.lifetime.as_deref() {
            Some(lifetime) => lifetime.parse::<Lifetime>()?,
            None => Lifetime::default(),
        };
        Ok((service, implementation, lifetime))
    }
}

fn non_blank<'a>(name: &'a str, argument: &str) -> DIResult<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DIError::NullArgument {
            argument: argument.to_string(),
        });
    }
    Ok(name)
}
