//! End-to-end tests for AutoMocker

use mockall::automock;
use mockwire_di::{DiError, Kind, TypeKey, discoverable};
use mockwire_test::fixtures::*;
use mockwire_test::{AutoMocker, HarnessConfig, MockRegistry};
use rstest::*;
use std::sync::Arc;

// Abstractions

#[discoverable]
#[automock]
pub trait Repository: Send + Sync {
	fn find(&self, id: u32) -> Option<String>;
}

#[discoverable]
#[automock]
pub trait Logger: Send + Sync {
	fn log(&self, message: &str);
}

#[discoverable]
#[automock]
pub trait Notifier: Send + Sync {
	fn notify(&self, user: &str) -> bool;
}

// System under test

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	pub retries: u32,
}

#[discoverable]
impl Config {
	pub fn new() -> Self {
		Self { retries: 3 }
	}
}

pub struct Sut {
	repo: Arc<dyn Repository>,
	log: Arc<dyn Logger>,
	cfg: Config,
}

#[discoverable]
impl Sut {
	pub fn new(repo: Arc<dyn Repository>, log: Arc<dyn Logger>, cfg: Config) -> Self {
		Self { repo, log, cfg }
	}

	pub fn describe(&self, id: u32) -> String {
		let name = self.repo.find(id).unwrap_or_else(|| "unknown".to_string());
		self.log.log(&name);
		format!("{name} (retries: {})", self.cfg.retries)
	}
}

// Diamond

pub struct Audit {
	repo: Arc<dyn Repository>,
}

#[discoverable]
impl Audit {
	pub fn new(repo: Arc<dyn Repository>) -> Self {
		Self { repo }
	}
}

pub struct Billing {
	repo: Arc<dyn Repository>,
	audit: Arc<Audit>,
}

#[discoverable]
impl Billing {
	pub fn new(repo: Arc<dyn Repository>, audit: Arc<Audit>) -> Self {
		Self { repo, audit }
	}
}

pub struct Checkout {
	billing: Arc<Billing>,
	audit: Arc<Audit>,
}

#[discoverable]
impl Checkout {
	pub fn new(billing: Arc<Billing>, audit: Arc<Audit>) -> Self {
		Self { billing, audit }
	}
}

// Cycle

pub struct Chicken {
	_egg: Arc<Egg>,
}

#[discoverable]
impl Chicken {
	pub fn new(egg: Arc<Egg>) -> Self {
		Self { _egg: egg }
	}
}

pub struct Egg {
	_chicken: Arc<Chicken>,
}

#[discoverable]
impl Egg {
	pub fn new(chicken: Arc<Chicken>) -> Self {
		Self { _chicken: chicken }
	}
}

// No public constructor

pub struct Vault {
	_sealed: (),
}

#[discoverable]
impl Vault {
	#[allow(dead_code)]
	fn open() -> Self {
		Self { _sealed: () }
	}
}

pub struct Bank {
	_vault: Arc<Vault>,
}

#[discoverable]
impl Bank {
	pub fn new(vault: Arc<Vault>) -> Self {
		Self { _vault: vault }
	}
}

// Primitives, arrays and factories

pub struct Greeter {
	greeting: String,
	times: u32,
}

#[discoverable]
impl Greeter {
	pub fn new(greeting: String, times: u32) -> Self {
		Self { greeting, times }
	}
}

pub struct Inbox {
	messages: Vec<String>,
}

#[discoverable]
impl Inbox {
	pub fn new(messages: Vec<String>) -> Self {
		Self { messages }
	}
}

pub struct Ticker {
	next: Arc<dyn Fn() -> u64 + Send + Sync>,
}

#[discoverable]
impl Ticker {
	pub fn new(next: Arc<dyn Fn() -> u64 + Send + Sync>) -> Self {
		Self { next }
	}
}

// Equal-arity constructors

pub struct Report {
	source: &'static str,
}

#[discoverable]
impl Report {
	pub fn from_repo(_repo: Arc<dyn Repository>) -> Self {
		Self { source: "repo" }
	}

	pub fn from_logger(_log: Arc<dyn Logger>) -> Self {
		Self { source: "logger" }
	}
}

// Fixtures

fn repository_double() -> Arc<dyn Repository> {
	let mut repo = MockRepository::new();
	repo.expect_find()
		.returning(|id| (id == 1).then(|| "alice".to_string()));
	Arc::new(repo)
}

fn logger_double() -> Arc<dyn Logger> {
	let mut log = MockLogger::new();
	log.expect_log().returning(|_| ());
	Arc::new(log)
}

#[fixture]
fn engine(mock_registry: MockRegistry) -> MockRegistry {
	mock_registry
		.with::<dyn Repository, _>(repository_double)
		.with::<dyn Logger, _>(logger_double)
}

// Tests

#[rstest]
fn class_under_test_gets_doubles_and_real_config(
	engine: MockRegistry,
	harness_config: HarnessConfig,
) {
	// Arrange
	let mocker = AutoMocker::<Sut>::with_config(Arc::new(engine), harness_config);

	// Act
	let sut = mocker.class_under_test().unwrap();

	// Assert
	assert_eq!(sut.cfg, Config::new());
	assert_eq!(sut.describe(1), "alice (retries: 3)");
	assert_eq!(sut.describe(2), "unknown (retries: 3)");
}

#[rstest]
fn requested_abstraction_is_the_injected_double(engine: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));
	let sut = mocker.class_under_test().unwrap();

	// Act
	let repo = mocker.get::<dyn Repository>().unwrap();
	let log = mocker.get::<dyn Logger>().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&sut.repo, &repo));
	assert!(Arc::ptr_eq(&sut.log, &log));
	assert!(Arc::ptr_eq(
		&repo,
		&mocker.locator().service_of::<dyn Repository>().unwrap()
	));
}

#[rstest]
fn default_constructible_types_are_built_for_real(engine: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));

	// Act
	let config = mocker.get::<Config>().unwrap();

	// Assert
	assert_eq!(config.retries, 3);
	assert_eq!(mocker.strategy_of(TypeKey::of::<Config>()), Some("default"));
	assert!(!mocker.locator().is_cached(TypeKey::of::<Config>()));
}

#[rstest]
fn registrations_follow_the_walk(engine: MockRegistry) {
	// Arrange & Act
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));

	// Assert
	assert_eq!(
		mocker.registered_types(),
		vec![
			TypeKey::of::<dyn Repository>(),
			TypeKey::of::<dyn Logger>(),
			TypeKey::of::<Config>(),
			TypeKey::of::<Sut>(),
		]
	);
	assert_eq!(mocker.strategy_of(TypeKey::of::<dyn Repository>()), Some("factory"));
	assert_eq!(mocker.strategy_of(TypeKey::of::<Sut>()), Some("constructor"));
}

#[rstest]
fn diamond_dependencies_share_one_instance(engine: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Checkout>::new(Arc::new(engine));

	// Act
	let checkout = mocker.class_under_test().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&checkout.audit, &checkout.billing.audit));
	assert!(Arc::ptr_eq(&checkout.billing.repo, &checkout.audit.repo));
	let registered = mocker.registered_types();
	let audits = registered
		.iter()
		.filter(|key| **key == TypeKey::of::<Audit>())
		.count();
	assert_eq!(audits, 1);
	assert_eq!(registered.len(), 4);
}

#[rstest]
fn cyclic_constructors_build_but_fail_to_resolve(mock_registry: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Chicken>::new(Arc::new(mock_registry));

	// Act
	let result = mocker.class_under_test();

	// Assert
	assert_eq!(
		mocker.registered_types(),
		vec![TypeKey::of::<Egg>(), TypeKey::of::<Chicken>()]
	);
	let error = result.err().unwrap();
	assert!(error.is_circular());
	assert!(error.to_string().contains("Chicken -> Egg -> Chicken"));
	assert_eq!(mocker.dependency_graph().detect_cycles().len(), 1);
}

#[rstest]
fn unconstructible_dependency_fails_only_at_resolution(mock_registry: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Bank>::new(Arc::new(mock_registry));

	// Act
	let bank = mocker.class_under_test();
	let vault = mocker.get::<Vault>();

	// Assert
	assert!(bank.err().unwrap().is_not_registered());
	assert!(vault.err().unwrap().is_not_registered());
	assert!(!mocker.registered_types().contains(&TypeKey::of::<Vault>()));
	assert_eq!(
		mocker
			.dependency_graph()
			.node(TypeKey::of::<Vault>())
			.map(|node| node.kind),
		Some(Kind::Unconstructible)
	);
}

#[rstest]
fn unreachable_abstraction_is_mocked_on_demand(engine: MockRegistry) {
	// Arrange
	let engine = engine.with::<dyn Notifier, _>(|| {
		let mut notifier = MockNotifier::new();
		notifier.expect_notify().returning(|user| user == "alice");
		Arc::new(notifier) as Arc<dyn Notifier>
	});
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));
	assert!(!mocker.container().contains(TypeKey::of::<dyn Notifier>()));

	// Act
	let first = mocker.get::<dyn Notifier>().unwrap();
	let second = mocker.get::<dyn Notifier>().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
	assert!(first.notify("alice"));
	assert_eq!(mocker.strategy_of(TypeKey::of::<dyn Notifier>()), Some("instance"));
}

#[rstest]
fn abstraction_unknown_to_engine_is_not_registered(engine: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));

	// Act
	let result = mocker.get::<dyn Notifier>();

	// Assert
	assert!(result.err().unwrap().is_not_registered());
}

#[rstest]
fn strict_mode_disables_the_fallback(strict_config: HarnessConfig) {
	// Arrange
	let engine = MockRegistry::new()
		.with::<dyn Notifier, _>(|| Arc::new(MockNotifier::new()) as Arc<dyn Notifier>);
	let mocker = AutoMocker::<Config>::with_config(Arc::new(engine), strict_config);

	// Act
	let result = mocker.get::<dyn Notifier>();

	// Assert
	assert!(result.err().unwrap().is_not_registered());
	assert!(mocker.get::<Config>().is_ok());
}

#[rstest]
fn reachable_terminal_without_double_fails_when_resolved(mock_registry: MockRegistry) {
	// Arrange
	let engine = mock_registry.with::<dyn Repository, _>(repository_double);
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));

	// Act
	let result = mocker.class_under_test();

	// Assert
	assert!(mocker.registered_types().contains(&TypeKey::of::<dyn Logger>()));
	assert!(matches!(
		result.err().unwrap(),
		DiError::DoubleUnavailable(name) if name.contains("Logger")
	));
}

#[rstest]
fn primitive_defaults_fill_strings_and_numbers(
	mock_registry: MockRegistry,
	harness_config: HarnessConfig,
) {
	// Arrange
	let engine = mock_registry.with::<String, _>(|| Arc::new("hello".to_string()));
	let config = harness_config.with_primitive_defaults(true);
	let mocker = AutoMocker::<Greeter>::with_config(Arc::new(engine), config);

	// Act
	let greeter = mocker.class_under_test().unwrap();

	// Assert
	assert_eq!(greeter.greeting, "hello");
	assert_eq!(greeter.times, 0);
	assert_eq!(mocker.strategy_of(TypeKey::of::<u32>()), Some("factory"));
}

#[rstest]
fn primitives_without_defaults_are_unavailable(mock_registry: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Greeter>::new(Arc::new(mock_registry));

	// Act
	let result = mocker.class_under_test();

	// Assert
	assert!(matches!(result.err().unwrap(), DiError::DoubleUnavailable(_)));
}

#[rstest]
fn arrays_resolve_empty(mock_registry: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Inbox>::new(Arc::new(mock_registry));

	// Act
	let inbox = mocker.class_under_test().unwrap();

	// Assert
	assert!(inbox.messages.is_empty());
	assert_eq!(
		mocker.strategy_of(TypeKey::of::<Vec<String>>()),
		Some("empty-array")
	);
	assert!(!mocker.container().contains(TypeKey::of::<String>()));
}

#[rstest]
fn factory_closures_come_from_the_engine(mock_registry: MockRegistry) {
	// Arrange
	let engine = mock_registry.with::<dyn Fn() -> u64 + Send + Sync, _>(|| {
		Arc::new(|| 7u64) as Arc<dyn Fn() -> u64 + Send + Sync>
	});
	let mocker = AutoMocker::<Ticker>::new(Arc::new(engine));

	// Act
	let ticker = mocker.class_under_test().unwrap();

	// Assert
	assert_eq!((ticker.next)(), 7);
	assert_eq!(
		mocker.strategy_of(TypeKey::of::<dyn Fn() -> u64 + Send + Sync>()),
		Some("factory")
	);
}

#[rstest]
fn first_declared_constructor_wins_ties(engine: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Report>::new(Arc::new(engine));

	// Act
	let report = mocker.class_under_test().unwrap();

	// Assert
	assert_eq!(report.source, "repo");
	assert!(!mocker.container().contains(TypeKey::of::<dyn Logger>()));
}

#[rstest]
fn use_instance_pins_a_prepared_double(engine: MockRegistry) {
	// Arrange
	let mut repo = MockRepository::new();
	repo.expect_find()
		.withf(|id| *id == 42)
		.times(1)
		.returning(|_| Some("pinned".to_string()));
	let repo: Arc<dyn Repository> = Arc::new(repo);
	let mocker = AutoMocker::<Sut>::builder(Arc::new(engine))
		.use_instance::<dyn Repository>(Arc::clone(&repo))
		.build();

	// Act
	let sut = mocker.class_under_test().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&sut.repo, &repo));
	assert_eq!(sut.describe(42), "pinned (retries: 3)");
	assert_eq!(mocker.strategy_of(TypeKey::of::<dyn Repository>()), Some("instance"));
}

#[rstest]
fn dependency_graph_describes_the_walk(engine: MockRegistry) {
	// Arrange
	let mocker = AutoMocker::<Sut>::new(Arc::new(engine));

	// Act
	let graph = mocker.dependency_graph();
	let stats = graph.statistics();

	// Assert
	assert_eq!(stats.node_count, 4);
	assert_eq!(stats.edge_count, 3);
	assert_eq!(stats.terminal_count, 2);
	assert_eq!(stats.concrete_count, 2);
	assert!(graph.to_dot().contains("\"Sut\" -> \"dyn Repository\";"));
	assert!(graph.detect_cycles().is_empty());
}
