//! Service container

use crate::cycle_detection::{begin_resolution, with_cycle_detection_scope};
use crate::registry::{MissingTypePolicy, Registration, ServiceRegistry, ServiceRequest, Strategy};
use crate::{DiError, DiResult, Discoverable, Instance, InstanceCache, TypeInfo, TypeKey};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Resolves services from a sealed [`ServiceRegistry`].
///
/// Lookup order for a requested type:
///
/// 1. the container's instance cache,
/// 2. an explicit registration,
/// 3. the missing-type policy, whose answer is stored as a registration,
/// 4. [`DiError::NotRegistered`].
///
/// Every registration is built at most once per container. Strategies run with
/// no lock held, so constructors may resolve their own parameters freely.
pub struct Container {
	registry: RwLock<ServiceRegistry>,
	cache: InstanceCache,
	missing_type_policy: Option<Arc<dyn MissingTypePolicy>>,
	max_resolution_depth: usize,
}

impl Container {
	pub(crate) fn new(
		registry: ServiceRegistry,
		missing_type_policy: Option<Arc<dyn MissingTypePolicy>>,
		max_resolution_depth: usize,
	) -> Self {
		Self {
			registry: RwLock::new(registry),
			cache: InstanceCache::new(),
			missing_type_policy,
			max_resolution_depth,
		}
	}

	/// Resolves `S` and returns the shared `Arc<S>`.
	///
	/// # Examples
	///
	/// ```
	/// use mockwire_di::{Instance, Registration, ServiceRegistry, TypeKey};
	/// use std::sync::Arc;
	///
	/// let mut registry = ServiceRegistry::new();
	/// registry.register(Registration::factory(TypeKey::of::<String>(), |_| {
	///     Ok(Instance::new(Arc::new("built once".to_string())))
	/// }));
	/// let container = registry.build();
	///
	/// let first = container.resolve::<String>().unwrap();
	/// let second = container.resolve::<String>().unwrap();
	/// assert!(Arc::ptr_eq(&first, &second));
	/// ```
	pub fn resolve<S: Discoverable + ?Sized>(&self) -> DiResult<Arc<S>> {
		let info = TypeInfo::of::<S>();
		let instance = self.resolve_info(info)?;
		instance.downcast::<S>().ok_or_else(|| {
			DiError::TypeMismatch(format!(
				"{} (stored as {})",
				info.key().name(),
				instance.key().name()
			))
		})
	}

	/// Resolves the type described by `info` without downcasting.
	pub fn resolve_info(&self, info: TypeInfo) -> DiResult<Instance> {
		let key = info.key();
		if let Some(instance) = self.cache.get(key) {
			tracing::trace!(service = %key, "served from container cache");
			return Ok(instance);
		}

		with_cycle_detection_scope(self.max_resolution_depth, || -> DiResult<Instance> {
			let _guard = begin_resolution(key)?;
			let strategy = self.strategy_for(info)?;

			tracing::trace!(service = %key, strategy = strategy.label(), "building service");
			let instance = strategy.produce(self)?;
			Ok(self.cache.insert(key, instance))
		})
	}

	fn strategy_for(&self, info: TypeInfo) -> DiResult<Strategy> {
		let key = info.key();
		if let Some(registration) = self.read_registry().get(key) {
			return Ok(registration.strategy().clone());
		}

		let registration = self
			.missing_type_policy
			.as_ref()
			.and_then(|policy| policy.build(&ServiceRequest::new(info)));

		match registration {
			Some(registration) => {
				tracing::debug!(
					service = %key,
					strategy = registration.strategy().label(),
					"missing-type policy supplied a registration"
				);
				let strategy = registration.strategy().clone();
				self.write_registry().register(Registration::new(key, strategy.clone()));
				Ok(strategy)
			}
			None => {
				tracing::debug!(service = %key, "no registration and the missing-type policy declined");
				Err(DiError::NotRegistered(key.name().to_string()))
			}
		}
	}

	/// Whether `key` has a registration, explicit or supplied by the policy.
	pub fn contains(&self, key: TypeKey) -> bool {
		self.read_registry().contains(key)
	}

	pub fn len(&self) -> usize {
		self.read_registry().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Snapshot of all registrations in registration order.
	pub fn registrations(&self) -> Vec<Registration> {
		self.read_registry().iter().cloned().collect()
	}

	/// Label of the strategy registered for `key`.
	pub fn strategy_of(&self, key: TypeKey) -> Option<&'static str> {
		self.read_registry()
			.get(key)
			.map(|registration| registration.strategy().label())
	}

	/// Whether `key` has already been built by this container.
	pub fn is_resolved(&self, key: TypeKey) -> bool {
		self.cache.contains(key)
	}

	fn read_registry(&self) -> std::sync::RwLockReadGuard<'_, ServiceRegistry> {
		self.registry.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write_registry(&self) -> std::sync::RwLockWriteGuard<'_, ServiceRegistry> {
		self.registry.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl fmt::Debug for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Container")
			.field("registrations", &self.len())
			.field("resolved", &self.cache.len())
			.field("max_resolution_depth", &self.max_resolution_depth)
			.finish()
	}
}
