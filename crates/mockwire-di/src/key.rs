//! Type identity used by registries and caches

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a service type.
///
/// Equality and hashing only consider the [`TypeId`]; the name is carried along
/// for diagnostics. Unsized types such as `dyn Repository` have a key like any
/// other type.
///
/// # Examples
///
/// ```
/// use mockwire_di::TypeKey;
///
/// let key = TypeKey::of::<String>();
/// assert_eq!(key, TypeKey::of::<String>());
/// assert_ne!(key, TypeKey::of::<u32>());
/// assert_eq!(key.short_name(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
}

impl TypeKey {
	/// Returns the key of `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Fully qualified type name as reported by [`std::any::type_name`].
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Type name with module paths stripped from every segment.
	///
	/// `alloc::vec::Vec<my_app::User>` becomes `Vec<User>`.
	pub fn short_name(&self) -> String {
		let mut out = String::with_capacity(self.name.len());
		let mut segment = String::new();
		for ch in self.name.chars() {
			if ch.is_alphanumeric() || ch == '_' || ch == ':' {
				segment.push(ch);
			} else {
				out.push_str(last_path_segment(&segment));
				segment.clear();
				out.push(ch);
			}
		}
		out.push_str(last_path_segment(&segment));
		out
	}
}

fn last_path_segment(path: &str) -> &str {
	path.rsplit("::").next().unwrap_or(path)
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}
