//! # Mockwire Dependency Injection
//!
//! Type-keyed service container used by the mockwire harness.
//!
//! ## Features
//!
//! - **Shapes**: types describe their public constructors through [`Discoverable`]
//! - **Strategies**: default construction, constructor injection, fixed instances,
//!   empty arrays and arbitrary factories
//! - **Missing-type policy**: a pluggable hook consulted when a type has no registration
//! - **Container-scoped caching**: every service is built at most once per container
//! - **Cycle detection**: circular constructor graphs fail with the offending path
//!
//! ## Example
//!
//! ```rust
//! use mockwire_di::{discoverable, ServiceRegistry, Registration, Strategy, TypeInfo};
//!
//! #[derive(Clone)]
//! pub struct Settings {
//!     pub retries: u8,
//! }
//!
//! #[discoverable]
//! impl Settings {
//!     pub fn new() -> Self {
//!         Self { retries: 3 }
//!     }
//! }
//!
//! pub struct Client {
//!     settings: Settings,
//! }
//!
//! #[discoverable]
//! impl Client {
//!     pub fn new(settings: Settings) -> Self {
//!         Self { settings }
//!     }
//! }
//!
//! let mut registry = ServiceRegistry::new();
//! for info in [TypeInfo::of::<Settings>(), TypeInfo::of::<Client>()] {
//!     let shape = info.shape();
//!     if let Some(constructor) = shape.richest_constructor() {
//!         registry.register(Registration::new(
//!             info.key(),
//!             Strategy::Constructor(constructor.clone()),
//!         ));
//!     }
//! }
//!
//! let container = registry.build();
//! let client = container.resolve::<Client>().unwrap();
//! assert_eq!(client.settings.retries, 3);
//! ```

// Lets macro-generated `::mockwire_di` paths resolve inside this crate too.
extern crate self as mockwire_di;

pub mod container;
pub mod cycle_detection;
pub mod error;
pub mod instance;
pub mod key;
pub mod registry;
pub mod scope;
pub mod shape;

pub use container::Container;
pub use cycle_detection::{CycleError, DEFAULT_MAX_RESOLUTION_DEPTH};
pub use error::{DiError, DiResult};
pub use instance::Instance;
pub use key::TypeKey;
pub use registry::{
	FactoryFn, MissingTypePolicy, Registration, ServiceRegistry, ServiceRequest, Strategy,
};
pub use scope::InstanceCache;
pub use shape::{BuildFn, Constructor, Discoverable, Kind, Shape, TypeInfo};

pub use mockwire_di_macros::discoverable;
