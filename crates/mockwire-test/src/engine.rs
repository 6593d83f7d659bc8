//! Test double engines
//!
//! An engine turns a service type into a test double, or declines. The harness
//! never inspects how doubles are made; [`MockRegistry`] simply calls a factory
//! registered per type, which is where `mockall` mocks usually come from.

use mockwire_di::{Instance, TypeKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Produces test doubles for service types.
pub trait DoubleEngine: Send + Sync {
	/// Creates a double for `key`, or `None` if this engine cannot.
	fn create_double(&self, key: TypeKey) -> Option<Instance>;
}

type DoubleFactory = Arc<dyn Fn() -> Instance + Send + Sync>;

/// Factory-backed [`DoubleEngine`].
///
/// # Examples
///
/// ```
/// use mockwire_test::engine::{DoubleEngine, MockRegistry};
/// use mockwire_di::TypeKey;
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct FrozenClock;
///
/// impl Clock for FrozenClock {
///     fn now(&self) -> u64 {
///         42
///     }
/// }
///
/// let engine = MockRegistry::new().with::<dyn Clock, _>(|| Arc::new(FrozenClock) as Arc<dyn Clock>);
///
/// let double = engine.create_double(TypeKey::of::<dyn Clock>()).unwrap();
/// assert_eq!(double.downcast::<dyn Clock>().unwrap().now(), 42);
/// assert!(engine.create_double(TypeKey::of::<String>()).is_none());
/// ```
#[derive(Default, Clone)]
pub struct MockRegistry {
	factories: HashMap<TypeKey, DoubleFactory>,
}

macro_rules! register_defaults {
	($registry:ident; $($ty:ty),* $(,)?) => {
		$(
			$registry.register::<$ty, _>(|| Arc::new(<$ty as Default>::default()));
		)*
	};
}

impl MockRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry answering every built-in primitive type with its `Default` value.
	pub fn with_primitive_defaults() -> Self {
		let mut registry = Self::new();
		register_defaults!(
			registry;
			u8, u16, u32, u64, u128, usize,
			i8, i16, i32, i64, i128, isize,
			f32, f64, bool, char, (), String, &'static str,
		);
		registry
	}

	/// Registers the factory used whenever a double of `S` is requested.
	///
	/// A later registration for the same type replaces the earlier one.
	pub fn register<S, F>(&mut self, factory: F)
	where
		S: ?Sized + Send + Sync + 'static,
		F: Fn() -> Arc<S> + Send + Sync + 'static,
	{
		self.factories.insert(
			TypeKey::of::<S>(),
			Arc::new(move || Instance::new(factory())),
		);
	}

	/// Builder form of [`register`](Self::register).
	pub fn with<S, F>(mut self, factory: F) -> Self
	where
		S: ?Sized + Send + Sync + 'static,
		F: Fn() -> Arc<S> + Send + Sync + 'static,
	{
		self.register::<S, F>(factory);
		self
	}

	pub fn contains(&self, key: TypeKey) -> bool {
		self.factories.contains_key(&key)
	}

	pub fn len(&self) -> usize {
		self.factories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.factories.is_empty()
	}
}

impl DoubleEngine for MockRegistry {
	fn create_double(&self, key: TypeKey) -> Option<Instance> {
		self.factories.get(&key).map(|factory| factory())
	}
}

impl fmt::Debug for MockRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.factories.keys()).finish()
	}
}

/// Asks each engine in turn; the first double produced wins.
#[derive(Default, Clone)]
pub struct EngineChain {
	engines: Vec<Arc<dyn DoubleEngine>>,
}

impl EngineChain {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, engine: Arc<dyn DoubleEngine>) {
		self.engines.push(engine);
	}

	pub fn with(mut self, engine: Arc<dyn DoubleEngine>) -> Self {
		self.push(engine);
		self
	}

	pub fn len(&self) -> usize {
		self.engines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.engines.is_empty()
	}
}

impl DoubleEngine for EngineChain {
	fn create_double(&self, key: TypeKey) -> Option<Instance> {
		self.engines
			.iter()
			.find_map(|engine| engine.create_double(key))
	}
}
