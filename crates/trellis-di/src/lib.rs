//! Inversion-of-Control Container for Trellis
//!
//! This crate maps service identities to implementations and lifetime policies,
//! then builds requested object graphs on demand by resolving every constructor
//! dependency from its own registry.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_di::{interfaces, Component, Container, Injectable, Lifetime};
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FixedClock;
//!
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 {
//!         42
//!     }
//! }
//!
//! impl Injectable for FixedClock {
//!     fn interfaces() -> trellis_di::Interfaces<Self> {
//!         interfaces![dyn Clock]
//!     }
//! }
//!
//! impl Component for FixedClock {
//!     type Dependencies = ();
//!
//!     fn construct(_: ()) -> Self {
//!         FixedClock
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.register_as::<dyn Clock, FixedClock>(Lifetime::Singleton).unwrap();
//!
//! let clock: Arc<dyn Clock> = container.resolve::<dyn Clock>().unwrap();
//! assert_eq!(clock.now(), 42);
//! ```
//!
//! See [`usage`] module for detailed usage examples.

use thiserror::Error;

pub mod catalog;
pub mod component;
pub mod config;
pub mod container;
pub mod lifetime;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod usage;

/// Errors that can occur during dependency injection operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DIError {
    #[error("Required argument is missing: {argument}")]
    NullArgument { argument: String },

    #[error("Implementation type '{implementation_type}' does not implement service type '{service_type}'")]
    InvalidRegistration {
        service_type: String,
        implementation_type: String,
    },

    #[error("No constructor available for implementation type: {implementation_type}")]
    NoConstructorAvailable { implementation_type: String },

    #[error("No dependency registered for '{dependency_type}' required by '{service_type}'")]
    MissingDependency {
        service_type: String,
        dependency_type: String,
    },

    #[error("Service not registered: {service_type}")]
    NotRegistered { service_type: String },

    #[error("Unsupported lifetime: {lifetime}")]
    UnsupportedLifetime { lifetime: String },

    #[error("Cyclic dependency detected: {path}")]
    CyclicDependency { path: String },

    #[error("Service type mismatch during downcast: {service_type}")]
    ServiceTypeMismatch { service_type: String },

    #[error("Unknown type name: {name}")]
    UnknownType { name: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type DIResult<T> = Result<T, DIError>;

/// Builds an [`Interfaces`] list for the implementing type.
///
/// Must be used inside an `impl Injectable` block, since the upcasts are
/// written against `Self`.
#[macro_export]
macro_rules! interfaces {
    () => {
        $crate::Interfaces::<Self>::new()
    };
    ($($service:ty),+ $(,)?) => {
        $crate::Interfaces::<Self>::new()
            $(.with::<$service>(|this| this as ::std::sync::Arc<$service>))+
    };
}

/// Convenience macro for resolving services
#[macro_export]
macro_rules! resolve_service {
    ($container:expr, $service_type:ty) => {
        $container.resolve::<$service_type>()
    };
}

pub use catalog::TypeCatalog;
pub use component::{Component, Dependencies, Dependency, Implementation, Injectable, Interfaces};
pub use config::{BindingConfig, ContainerConfig, ContainerOptions};
pub use container::{Container, ContainerBuilder};
pub use lifetime::Lifetime;
pub use provider::Provider;
pub use registry::Registry;
pub use resolver::Resolver;
pub use service::{Instance, ServiceId};
