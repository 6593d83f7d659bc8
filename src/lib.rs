//! # Mockwire
//!
//! Automatic assembly of a system under test for Rust unit tests.
//!
//! Mockwire walks the public constructors of the type you want to test,
//! builds every concrete collaborator for real and hands a shared test double
//! to every abstraction it meets. Tests stay independent of constructor
//! signatures: adding a parameter to a service does not break the tests that
//! build it.
//!
//! ## Crates
//!
//! - [`di`] - the service container, constructor shapes and the
//!   `#[discoverable]` attribute
//! - [`test`] - the auto-mocking harness, double engines and graph
//!   visualization
//!
//! ## Quick Start
//!
//! ```rust
//! use mockwire::prelude::*;
//! use std::sync::Arc;
//!
//! #[discoverable]
//! pub trait Mailer: Send + Sync {
//!     fn send(&self, to: &str) -> bool;
//! }
//!
//! struct NullMailer;
//!
//! impl Mailer for NullMailer {
//!     fn send(&self, _to: &str) -> bool {
//!         true
//!     }
//! }
//!
//! pub struct Signup {
//!     mailer: Arc<dyn Mailer>,
//! }
//!
//! #[discoverable]
//! impl Signup {
//!     pub fn new(mailer: Arc<dyn Mailer>) -> Self {
//!         Self { mailer }
//!     }
//! }
//!
//! let engine = MockRegistry::new().with::<dyn Mailer, _>(|| Arc::new(NullMailer) as Arc<dyn Mailer>);
//! let mocker = AutoMocker::<Signup>::new(Arc::new(engine));
//!
//! let signup = mocker.class_under_test().unwrap();
//! assert!(signup.mailer.send("alice@example.com"));
//! ```

pub use mockwire_di as di;
pub use mockwire_test as test;

/// Commonly used types
pub mod prelude {
	pub use mockwire_di::{
		Container, DiError, DiResult, Discoverable, Kind, Registration, ServiceRegistry, Shape,
		TypeInfo, TypeKey, discoverable,
	};
	pub use mockwire_test::{
		AutoMocker, AutoMockerBuilder, DependencyGraph, DoubleEngine, EngineChain, HarnessConfig,
		HarnessError, MockRegistry, init_test_logging,
	};
}
