//! The auto-mocking harness

use crate::config::HarnessConfig;
use crate::engine::{DoubleEngine, EngineChain, MockRegistry};
use crate::fallback::AutoMockingPolicy;
use crate::graph::GraphBuilder;
use crate::locator::DoubleLocator;
use crate::visualization::DependencyGraph;
use mockwire_di::{
	Container, DiResult, Discoverable, Instance, Registration, ServiceRegistry, TypeInfo, TypeKey,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Wires a system under test with real collaborators and test doubles.
///
/// Construction walks the constructor graph of `TSut`, registers every type it
/// reaches and seals the result into a [`Container`]. Abstractions are served
/// by the [`DoubleEngine`]; the same double is handed to every collaborator
/// that needs it and to [`get`](Self::get).
///
/// # Examples
///
/// ```
/// use mockwire_di::discoverable;
/// use mockwire_test::{AutoMocker, MockRegistry};
/// use std::sync::Arc;
///
/// #[discoverable]
/// pub trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct FrozenClock;
///
/// impl Clock for FrozenClock {
///     fn now(&self) -> u64 {
///         1_700_000_000
///     }
/// }
///
/// pub struct Session {
///     clock: Arc<dyn Clock>,
/// }
///
/// #[discoverable]
/// impl Session {
///     pub fn new(clock: Arc<dyn Clock>) -> Self {
///         Self { clock }
///     }
/// }
///
/// let engine = MockRegistry::new().with::<dyn Clock, _>(|| Arc::new(FrozenClock) as Arc<dyn Clock>);
/// let mocker = AutoMocker::<Session>::new(Arc::new(engine));
///
/// let session = mocker.class_under_test().unwrap();
/// let clock = mocker.get::<dyn Clock>().unwrap();
///
/// assert_eq!(session.clock.now(), 1_700_000_000);
/// assert!(Arc::ptr_eq(&session.clock, &clock));
/// ```
pub struct AutoMocker<TSut: ?Sized> {
	container: Container,
	locator: Arc<DoubleLocator>,
	graph: DependencyGraph,
	config: HarnessConfig,
	_sut: PhantomData<fn() -> Arc<TSut>>,
}

impl<TSut: Discoverable + ?Sized> AutoMocker<TSut> {
	/// Builds a harness with the default configuration.
	pub fn new(engine: Arc<dyn DoubleEngine>) -> Self {
		Self::builder(engine).build()
	}

	pub fn with_config(engine: Arc<dyn DoubleEngine>, config: HarnessConfig) -> Self {
		Self::builder(engine).config(config).build()
	}

	pub fn builder(engine: Arc<dyn DoubleEngine>) -> AutoMockerBuilder<TSut> {
		AutoMockerBuilder::new(engine)
	}

	/// Resolves any type through the harness container.
	pub fn get<S: Discoverable + ?Sized>(&self) -> DiResult<Arc<S>> {
		self.container.resolve::<S>()
	}

	/// Resolves the system under test.
	pub fn class_under_test(&self) -> DiResult<Arc<TSut>> {
		self.container.resolve::<TSut>()
	}

	pub fn container(&self) -> &Container {
		&self.container
	}

	pub fn locator(&self) -> &DoubleLocator {
		&self.locator
	}

	pub fn config(&self) -> &HarnessConfig {
		&self.config
	}

	/// Registered types in registration order, including those the fallback
	/// policy added so far.
	pub fn registered_types(&self) -> Vec<TypeKey> {
		self.container
			.registrations()
			.iter()
			.map(Registration::key)
			.collect()
	}

	/// Strategy label registered for `key`.
	pub fn strategy_of(&self, key: TypeKey) -> Option<&'static str> {
		self.container.strategy_of(key)
	}

	/// Graph discovered while the harness was built.
	pub fn dependency_graph(&self) -> &DependencyGraph {
		&self.graph
	}
}

impl<TSut: ?Sized> fmt::Debug for AutoMocker<TSut> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AutoMocker")
			.field("sut", &std::any::type_name::<TSut>())
			.field("container", &self.container)
			.field("config", &self.config)
			.finish()
	}
}

/// Configures an [`AutoMocker`] before the graph walk runs.
pub struct AutoMockerBuilder<TSut: ?Sized> {
	engine: Arc<dyn DoubleEngine>,
	config: HarnessConfig,
	pinned: Vec<(TypeInfo, Instance)>,
	_sut: PhantomData<fn() -> Arc<TSut>>,
}

impl<TSut: Discoverable + ?Sized> AutoMockerBuilder<TSut> {
	pub fn new(engine: Arc<dyn DoubleEngine>) -> Self {
		Self {
			engine,
			config: HarnessConfig::default(),
			pinned: Vec::new(),
			_sut: PhantomData,
		}
	}

	pub fn config(mut self, config: HarnessConfig) -> Self {
		self.config = config;
		self
	}

	/// Uses `instance` for `S` instead of anything the walk would register.
	///
	/// The instance is also what the double locator hands out for `S`.
	pub fn use_instance<S: Discoverable + ?Sized>(mut self, instance: Arc<S>) -> Self {
		self.pinned.push((TypeInfo::of::<S>(), Instance::new(instance)));
		self
	}

	pub fn build(self) -> AutoMocker<TSut> {
		let config = self.config;
		let engine: Arc<dyn DoubleEngine> = if config.primitive_defaults {
			Arc::new(
				EngineChain::new()
					.with(self.engine)
					.with(Arc::new(MockRegistry::with_primitive_defaults())),
			)
		} else {
			self.engine
		};
		let locator = Arc::new(DoubleLocator::new(engine));

		let mut registry = ServiceRegistry::new();
		registry.set_max_resolution_depth(config.max_resolution_depth);

		let mut builder = GraphBuilder::new(Arc::clone(&locator));
		for (info, instance) in self.pinned {
			registry.register(Registration::instance(info.key(), instance.clone()));
			locator.seed(info.key(), instance);
			builder.pin(info);
		}

		let root = TypeInfo::of::<TSut>();
		builder.discover(root, &mut registry);

		if config.fallback {
			registry.on_missing_type(Arc::new(AutoMockingPolicy::new(Arc::clone(&locator))));
		}

		tracing::debug!(
			sut = %root.key(),
			registrations = registry.len(),
			fallback = config.fallback,
			"harness assembled"
		);

		AutoMocker {
			container: registry.build(),
			locator,
			graph: builder.into_graph(),
			config,
			_sut: PhantomData,
		}
	}
}

impl<TSut: ?Sized> fmt::Debug for AutoMockerBuilder<TSut> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AutoMockerBuilder")
			.field("sut", &std::any::type_name::<TSut>())
			.field("config", &self.config)
			.field(
				"pinned",
				&self.pinned.iter().map(|(info, _)| info.key()).collect::<Vec<_>>(),
			)
			.finish()
	}
}
