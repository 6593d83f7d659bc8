//! Cached access to test doubles

use crate::engine::DoubleEngine;
use mockwire_di::{Instance, TypeKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Hands out one double per service type for the lifetime of a harness.
///
/// The first request for a type asks the engine; the answer is cached and every
/// later request gets the same instance, so collaborators sharing an
/// abstraction also share its expectations.
pub struct DoubleLocator {
	engine: Arc<dyn DoubleEngine>,
	cache: RwLock<HashMap<TypeKey, Instance>>,
}

impl DoubleLocator {
	pub fn new(engine: Arc<dyn DoubleEngine>) -> Self {
		Self {
			engine,
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// Returns the double for `key`, creating it on first request.
	///
	/// `None` means the engine declined; nothing is cached in that case.
	pub fn service(&self, key: TypeKey) -> Option<Instance> {
		if let Some(cached) = self.cached(key) {
			tracing::trace!(service = %key, "double served from cache");
			return Some(cached);
		}

		let Some(created) = self.engine.create_double(key) else {
			tracing::debug!(service = %key, "double engine declined");
			return None;
		};

		let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
		let double = cache.entry(key).or_insert(created).clone();
		tracing::debug!(service = %key, "double created");
		Some(double)
	}

	/// Typed form of [`service`](Self::service).
	pub fn service_of<S: ?Sized + 'static>(&self) -> Option<Arc<S>> {
		self.service(TypeKey::of::<S>())?.downcast::<S>()
	}

	/// Caches `instance` as the double for `key`, replacing any earlier one.
	pub fn seed(&self, key: TypeKey, instance: Instance) {
		let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
		cache.insert(key, instance);
	}

	pub fn is_cached(&self, key: TypeKey) -> bool {
		self.cached(key).is_some()
	}

	pub fn len(&self) -> usize {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn cached(&self, key: TypeKey) -> Option<Instance> {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		cache.get(&key).cloned()
	}
}

impl fmt::Debug for DoubleLocator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
		f.debug_struct("DoubleLocator")
			.field("cached", &cache.keys().collect::<Vec<_>>())
			.finish()
	}
}
