//! # Trellis Container Usage Guide
//!
//! ## Describing Types
//!
//! Services are usually traits; implementations are structs that say which
//! traits they provide and how they are built:
//!
//! ```rust
//! use std::sync::Arc;
//! use trellis_di::{interfaces, Component, Container, Injectable, Interfaces, Lifetime};
//!
//! pub trait Repository: Send + Sync {
//!     fn name(&self) -> &str;
//! }
//!
//! pub struct SqlRepository;
//!
//! impl Repository for SqlRepository {
//!     fn name(&self) -> &str {
//!         "sql"
//!     }
//! }
//!
//! impl Injectable for SqlRepository {
//!     fn interfaces() -> Interfaces<Self> {
//!         interfaces![dyn Repository]
//!     }
//! }
//!
//! impl Component for SqlRepository {
//!     type Dependencies = ();
//!
//!     fn construct(_: ()) -> Self {
//!         SqlRepository
//!     }
//! }
//!
//! pub struct UserService {
//!     repository: Arc<dyn Repository>,
//! }
//!
//! impl Injectable for UserService {}
//!
//! impl Component for UserService {
//!     type Dependencies = (Arc<dyn Repository>,);
//!
//!     fn construct((repository,): Self::Dependencies) -> Self {
//!         UserService { repository }
//!     }
//! }
//!
//! let mut container = Container::new();
//! container.register_as::<dyn Repository, SqlRepository>(Lifetime::Singleton).unwrap();
//! container.register::<UserService>(Lifetime::Transient).unwrap();
//!
//! let service = container.resolve::<UserService>().unwrap();
//! assert_eq!(service.repository.name(), "sql");
//! ```
//!
//! ## Lifetimes
//!
//! - `Lifetime::Transient` builds a new instance on every resolution.
//! - `Lifetime::Singleton` builds once, on first resolution, and caches the
//!   value for the life of the container.
//!
//! Lifetimes compose per registration: a transient service holding a
//! singleton dependency is rebuilt on each resolution but always receives the
//! same dependency.
//!
//! ## Compatibility Rules
//!
//! `register_as::<S, I>` succeeds only if `S` is `I` itself or is listed in
//! `I::interfaces()`. Nothing is inferred: if `I` provides `dyn Child` and
//! `Child: Parent`, binding `I` to `dyn Parent` fails with
//! `DIError::InvalidRegistration` unless `dyn Parent` is listed too.
//!
//! ## Multiple Bindings
//!
//! Registering the same service again appends another provider. `resolve`
//! uses the first one; `resolve_all` builds every one, in registration order:
//!
//! ```rust
//! # use std::sync::Arc;
//! # use trellis_di::{interfaces, Component, Container, Injectable, Interfaces, Lifetime};
//! pub trait Plugin: Send + Sync {
//!     fn id(&self) -> &'static str;
//! }
//!
//! pub struct Alpha;
//! impl Plugin for Alpha {
//!     fn id(&self) -> &'static str { "alpha" }
//! }
//! impl Injectable for Alpha {
//!     fn interfaces() -> Interfaces<Self> { interfaces![dyn Plugin] }
//! }
//! impl Component for Alpha {
//!     type Dependencies = ();
//!     fn construct(_: ()) -> Self { Alpha }
//! }
//!
//! pub struct Beta;
//! impl Plugin for Beta {
//!     fn id(&self) -> &'static str { "beta" }
//! }
//! impl Injectable for Beta {
//!     fn interfaces() -> Interfaces<Self> { interfaces![dyn Plugin] }
//! }
//!
//! let mut container = Container::new();
//! container.register_as::<dyn Plugin, Alpha>(Lifetime::Transient).unwrap();
//! container.register_instance::<dyn Plugin, Beta>(Arc::new(Beta)).unwrap();
//!
//! let ids: Vec<_> = container
//!     .resolve_all::<dyn Plugin>()
//!     .unwrap()
//!     .iter()
//!     .map(|plugin| plugin.id())
//!     .collect();
//! assert_eq!(ids, ["alpha", "beta"]);
//! ```
//!
//! ## Configuration Files
//!
//! Bindings can come from a file once their names are known to a
//! [`TypeCatalog`](crate::TypeCatalog):
//!
//! ```rust,ignore
//! let mut catalog = TypeCatalog::new();
//! catalog
//!     .add_service::<dyn Repository>("Repository")
//!     .add_component::<SqlRepository>("SqlRepository")
//!     .add_component::<UserService>("UserService");
//!
//! let config = ContainerConfig::load("trellis.toml")?;
//! let container = Container::from_config(&catalog, &config)?;
//! ```
//!
//! ## Sharing Across Threads
//!
//! Registration needs `&mut Container`, resolution only `&Container`. Finish
//! registering, then share the container (for example in an `Arc`). Racing
//! first resolutions of one singleton construct it exactly once.
//!
//! ## Best Practices
//!
//! 1. **Register everything at startup**, before the container is shared
//! 2. **Bind to traits**, so implementations can be swapped in tests
//! 3. **Keep cycle detection on** unless you have measured a reason not to
//! 4. **Handle resolution errors**; there is no silent fallback
