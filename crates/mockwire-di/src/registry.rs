//! Service registry: construction strategies keyed by type

use crate::cycle_detection::DEFAULT_MAX_RESOLUTION_DEPTH;
use crate::{Constructor, Container, DiResult, Instance, Shape, TypeInfo, TypeKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Arbitrary construction closure over the container.
pub type FactoryFn = Arc<dyn Fn(&Container) -> DiResult<Instance> + Send + Sync>;

/// How a registered type gets built.
#[derive(Clone)]
pub enum Strategy {
	/// Invoke a zero-parameter constructor.
	Default(Constructor),
	/// Invoke a constructor with every parameter resolved from the container.
	Constructor(Constructor),
	/// Always hand out this instance.
	Instance(Instance),
	/// A zero-length array of `element`.
	EmptyArray {
		element: TypeKey,
		build: fn() -> Instance,
	},
	Factory(FactoryFn),
}

impl Strategy {
	pub fn label(&self) -> &'static str {
		match self {
			Strategy::Default(_) => "default",
			Strategy::Constructor(_) => "constructor",
			Strategy::Instance(_) => "instance",
			Strategy::EmptyArray { .. } => "empty-array",
			Strategy::Factory(_) => "factory",
		}
	}

	pub(crate) fn produce(&self, container: &Container) -> DiResult<Instance> {
		match self {
			Strategy::Default(constructor) | Strategy::Constructor(constructor) => {
				constructor.invoke(container)
			}
			Strategy::Instance(instance) => Ok(instance.clone()),
			Strategy::EmptyArray { build, .. } => Ok(build()),
			Strategy::Factory(factory) => factory(container),
		}
	}
}

impl fmt::Debug for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Strategy::Default(constructor) | Strategy::Constructor(constructor) => f
				.debug_tuple(self.label())
				.field(&constructor.name())
				.finish(),
			Strategy::EmptyArray { element, .. } => f.debug_tuple(self.label()).field(element).finish(),
			_ => f.write_str(self.label()),
		}
	}
}

/// One entry of a [`ServiceRegistry`].
#[derive(Clone, Debug)]
pub struct Registration {
	key: TypeKey,
	strategy: Strategy,
}

impl Registration {
	pub fn new(key: TypeKey, strategy: Strategy) -> Self {
		Self { key, strategy }
	}

	/// Registration that always yields `instance`.
	pub fn instance(key: TypeKey, instance: Instance) -> Self {
		Self::new(key, Strategy::Instance(instance))
	}

	pub fn factory<F>(key: TypeKey, factory: F) -> Self
	where
		F: Fn(&Container) -> DiResult<Instance> + Send + Sync + 'static,
	{
		Self::new(key, Strategy::Factory(Arc::new(factory)))
	}

	pub fn key(&self) -> TypeKey {
		self.key
	}

	pub fn strategy(&self) -> &Strategy {
		&self.strategy
	}
}

/// A request for a type that has no registration.
#[derive(Debug, Clone, Copy)]
pub struct ServiceRequest {
	info: TypeInfo,
}

impl ServiceRequest {
	pub fn new(info: TypeInfo) -> Self {
		Self { info }
	}

	pub fn key(&self) -> TypeKey {
		self.info.key()
	}

	pub fn info(&self) -> TypeInfo {
		self.info
	}

	pub fn shape(&self) -> Shape {
		self.info.shape()
	}

	pub fn is_concrete(&self) -> bool {
		self.shape().is_concrete()
	}
}

/// Hook invoked by the container when a requested type has no registration.
///
/// Returning `None` declines; the container then reports
/// [`DiError::NotRegistered`](crate::DiError::NotRegistered). A returned
/// registration is stored and treated exactly like an explicit one.
pub trait MissingTypePolicy: Send + Sync {
	fn build(&self, request: &ServiceRequest) -> Option<Registration>;
}

/// Ordered set of registrations, at most one per type.
///
/// # Examples
///
/// ```
/// use mockwire_di::{Instance, Registration, ServiceRegistry, TypeKey};
/// use std::sync::Arc;
///
/// let mut registry = ServiceRegistry::new();
/// let key = TypeKey::of::<u32>();
/// registry.register(Registration::instance(key, Instance::new(Arc::new(7u32))));
///
/// let container = registry.build();
/// assert_eq!(*container.resolve::<u32>().unwrap(), 7);
/// ```
pub struct ServiceRegistry {
	entries: Vec<Registration>,
	index: HashMap<TypeKey, usize>,
	missing_type_policy: Option<Arc<dyn MissingTypePolicy>>,
	max_resolution_depth: usize,
}

impl ServiceRegistry {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
			missing_type_policy: None,
			max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
		}
	}

	/// Adds `registration`, replacing an existing one for the same type in place.
	pub fn register(&mut self, registration: Registration) {
		match self.index.get(&registration.key) {
			Some(&slot) => self.entries[slot] = registration,
			None => {
				self.index.insert(registration.key, self.entries.len());
				self.entries.push(registration);
			}
		}
	}

	pub fn on_missing_type(&mut self, policy: Arc<dyn MissingTypePolicy>) {
		self.missing_type_policy = Some(policy);
	}

	pub fn set_max_resolution_depth(&mut self, depth: usize) {
		self.max_resolution_depth = depth;
	}

	pub fn get(&self, key: TypeKey) -> Option<&Registration> {
		self.index.get(&key).map(|&slot| &self.entries[slot])
	}

	pub fn contains(&self, key: TypeKey) -> bool {
		self.index.contains_key(&key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registered types in registration order.
	pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
		self.entries.iter().map(Registration::key)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Registration> {
		self.entries.iter()
	}

	/// Seals the registry into a container.
	pub fn build(mut self) -> Container {
		let policy = self.missing_type_policy.take();
		let depth = self.max_resolution_depth;
		Container::new(self, policy, depth)
	}
}

impl Default for ServiceRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ServiceRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ServiceRegistry")
			.field("entries", &self.entries)
			.field("missing_type_policy", &self.missing_type_policy.is_some())
			.finish()
	}
}
