//! # Mockwire Test
//!
//! Auto-mocking harness: hand it a system under test and get back a fully wired
//! instance whose abstract dependencies are test doubles.
//!
//! ## Overview
//!
//! - **[`GraphBuilder`]**: walks constructor parameters and registers each type once
//! - **[`AutoMockingPolicy`]**: answers abstractions nobody registered with a double
//! - **[`DoubleLocator`]**: one double per type for the lifetime of a harness
//! - **[`MockRegistry`]**: double engine backed by per-type factories, typically
//!   producing `mockall` mocks
//! - **[`AutoMocker`]**: puts it all together
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mockall::automock;
//! use mockwire_di::discoverable;
//! use mockwire_test::{AutoMocker, MockRegistry};
//! use std::sync::Arc;
//!
//! #[discoverable]
//! #[automock]
//! pub trait Repository: Send + Sync {
//!     fn find(&self, id: u32) -> Option<String>;
//! }
//!
//! pub struct UserService {
//!     repo: Arc<dyn Repository>,
//! }
//!
//! #[discoverable]
//! impl UserService {
//!     pub fn new(repo: Arc<dyn Repository>) -> Self {
//!         Self { repo }
//!     }
//! }
//!
//! let engine = MockRegistry::new().with::<dyn Repository, _>(|| {
//!     let mut repo = MockRepository::new();
//!     repo.expect_find().returning(|_| Some("alice".to_string()));
//!     Arc::new(repo) as Arc<dyn Repository>
//! });
//!
//! let mocker = AutoMocker::<UserService>::new(Arc::new(engine));
//! let service = mocker.class_under_test()?;
//! ```
//!
//! ## Identity
//!
//! Every registration is built once per harness and doubles are cached by the
//! locator, so the double injected into the system under test is the one
//! returned by [`AutoMocker::get`].

pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod fixtures;
pub mod graph;
pub mod harness;
pub mod locator;
pub mod logging;
pub mod visualization;

pub use config::HarnessConfig;
pub use engine::{DoubleEngine, EngineChain, MockRegistry};
pub use error::HarnessError;
pub use fallback::AutoMockingPolicy;
pub use graph::GraphBuilder;
pub use harness::{AutoMocker, AutoMockerBuilder};
pub use locator::DoubleLocator;
pub use logging::init_test_logging;
pub use visualization::{DependencyGraph, GraphNode, GraphStatistics};
