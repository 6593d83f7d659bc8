//! Type-erased service instances

use crate::TypeKey;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A resolved service value with its type erased.
///
/// Holds the `Arc<S>` produced for service type `S` (sized or a trait object).
/// Cloning an `Instance` shares the underlying value, so every `Arc<S>`
/// recovered from clones points at the same object.
///
/// # Examples
///
/// ```
/// use mockwire_di::Instance;
/// use std::sync::Arc;
///
/// let instance = Instance::new(Arc::new(42u32));
/// let first = instance.downcast::<u32>().unwrap();
/// let second = instance.clone().downcast::<u32>().unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(instance.downcast::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct Instance {
	key: TypeKey,
	value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
	pub fn new<S>(value: Arc<S>) -> Self
	where
		S: ?Sized + Send + Sync + 'static,
	{
		Self {
			key: TypeKey::of::<S>(),
			value: Arc::new(value),
		}
	}

	/// Key of the service type this instance was created for.
	pub fn key(&self) -> TypeKey {
		self.key
	}

	/// Recovers the `Arc<S>` if this instance was created for `S`.
	pub fn downcast<S: ?Sized + 'static>(&self) -> Option<Arc<S>> {
		(*self.value).downcast_ref::<Arc<S>>().cloned()
	}

	/// Whether both instances share the same underlying value.
	pub fn ptr_eq(&self, other: &Instance) -> bool {
		Arc::ptr_eq(&self.value, &other.value)
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance").field("key", &self.key).finish()
	}
}
