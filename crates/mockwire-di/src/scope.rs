//! Container-scoped instance cache

use crate::{Instance, TypeKey};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Instances built by one container, keyed by service type.
///
/// Every registration is scoped to its container: built on first request and
/// served from here afterwards.
pub struct InstanceCache {
	cache: RwLock<HashMap<TypeKey, Instance>>,
}

impl InstanceCache {
	/// Creates an empty cache.
	///
	/// # Examples
	///
	/// ```
	/// use mockwire_di::InstanceCache;
	///
	/// let cache = InstanceCache::new();
	/// assert!(cache.is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// Retrieves the cached instance for `key`.
	///
	/// # Examples
	///
	/// ```
	/// use mockwire_di::{Instance, InstanceCache, TypeKey};
	/// use std::sync::Arc;
	///
	/// let cache = InstanceCache::new();
	/// cache.insert(TypeKey::of::<i32>(), Instance::new(Arc::new(42i32)));
	///
	/// let value = cache.get(TypeKey::of::<i32>()).unwrap();
	/// assert_eq!(*value.downcast::<i32>().unwrap(), 42);
	/// ```
	pub fn get(&self, key: TypeKey) -> Option<Instance> {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.get(&key).cloned()
	}

	/// Stores `instance` under `key` and returns the cached value.
	///
	/// If another instance got there first, that one is kept and returned so
	/// every caller observes a single identity.
	pub fn insert(&self, key: TypeKey, instance: Instance) -> Instance {
		let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
		cache.entry(key).or_insert(instance).clone()
	}

	pub fn contains(&self, key: TypeKey) -> bool {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.contains_key(&key)
	}

	pub fn len(&self) -> usize {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for InstanceCache {
	fn default() -> Self {
		Self::new()
	}
}
