//! Constructor shapes of discoverable types
//!
//! Rust has no runtime reflection, so every type that takes part in graph
//! discovery describes itself through [`Discoverable`]: which shape it has and,
//! for concrete types, which public constructors exist and what they need.
//!
//! Most implementations come from the [`discoverable`](crate::discoverable)
//! attribute:
//!
//! ```rust,ignore
//! use mockwire_di::discoverable;
//! use std::sync::Arc;
//!
//! #[discoverable]
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
//! ```

use crate::{Container, DiResult, Instance, TypeKey};
use std::fmt;
use std::sync::Arc;

/// Build closure of a constructor, resolving its parameters from a container.
pub type BuildFn = Arc<dyn Fn(&Container) -> DiResult<Instance> + Send + Sync>;

/// A type that can describe its own constructor shape.
///
/// Implemented for trait objects (abstractions), primitives, `String`,
/// `Vec<T>`, factory closures and any user type annotated with
/// [`discoverable`](crate::discoverable).
pub trait Discoverable: Send + Sync + 'static {
	fn shape() -> Shape;
}

/// Reflection handle for a discoverable type: its key plus a way to compute
/// its shape on demand.
#[derive(Clone, Copy)]
pub struct TypeInfo {
	key: TypeKey,
	shape: fn() -> Shape,
}

impl TypeInfo {
	pub fn of<S: Discoverable + ?Sized>() -> Self {
		Self {
			key: TypeKey::of::<S>(),
			shape: <S as Discoverable>::shape,
		}
	}

	pub fn key(&self) -> TypeKey {
		self.key
	}

	pub fn shape(&self) -> Shape {
		(self.shape)()
	}
}

impl fmt::Debug for TypeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("TypeInfo").field(&self.key).finish()
	}
}

/// A public constructor of a concrete type.
#[derive(Clone)]
pub struct Constructor {
	name: &'static str,
	params: Vec<TypeInfo>,
	build: BuildFn,
}

impl Constructor {
	/// Creates a constructor for `S` whose `build` closure resolves each of
	/// `params` from the container and invokes the real constructor.
	pub fn new<S, F>(name: &'static str, params: Vec<TypeInfo>, build: F) -> Self
	where
		S: ?Sized + Send + Sync + 'static,
		F: Fn(&Container) -> DiResult<Arc<S>> + Send + Sync + 'static,
	{
		Self {
			name,
			params,
			build: Arc::new(move |container| build(container).map(Instance::new)),
		}
	}

	/// Zero-parameter constructor backed by [`Default`].
	pub fn from_default<S: Default + Send + Sync + 'static>() -> Self {
		Self::new::<S, _>("default", Vec::new(), |_| Ok(Arc::new(S::default())))
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn params(&self) -> &[TypeInfo] {
		&self.params
	}

	pub fn arity(&self) -> usize {
		self.params.len()
	}

	pub fn invoke(&self, container: &Container) -> DiResult<Instance> {
		(self.build)(container)
	}
}

impl fmt::Debug for Constructor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Constructor")
			.field("name", &self.name)
			.field("params", &self.params)
			.finish()
	}
}

/// Shape of a discoverable type.
#[derive(Clone)]
pub enum Shape {
	/// A trait object; only a test double can stand in for it.
	Abstract,
	/// Numbers, `bool`, `char`, strings and `()`.
	Primitive,
	/// A zero-argument closure producing `output`.
	Factory { output: TypeKey },
	/// A growable array; `empty` builds one without elements.
	Array {
		element: TypeKey,
		empty: fn() -> Instance,
	},
	/// A concrete type with its public constructors in declaration order.
	/// An empty list means the type cannot be built from outside.
	Concrete(Vec<Constructor>),
}

/// Closed classification derived from a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Abstractions, primitives and factories: delegated to a double engine.
	Terminal,
	Array,
	/// Concrete with a zero-parameter constructor.
	DefaultConstructible,
	/// Concrete with parameterised constructors only.
	DependencyRequiring,
	/// Concrete without any public constructor.
	Unconstructible,
}

impl Kind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Kind::Terminal => "terminal",
			Kind::Array => "array",
			Kind::DefaultConstructible => "default-constructible",
			Kind::DependencyRequiring => "dependency-requiring",
			Kind::Unconstructible => "unconstructible",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Shape {
	pub fn kind(&self) -> Kind {
		match self {
			Shape::Abstract | Shape::Primitive | Shape::Factory { .. } => Kind::Terminal,
			Shape::Array { .. } => Kind::Array,
			Shape::Concrete(constructors) if constructors.is_empty() => Kind::Unconstructible,
			Shape::Concrete(_) if self.default_constructor().is_some() => {
				Kind::DefaultConstructible
			}
			Shape::Concrete(_) => Kind::DependencyRequiring,
		}
	}

	/// Everything except trait objects counts as concrete.
	pub fn is_concrete(&self) -> bool {
		!matches!(self, Shape::Abstract)
	}

	pub fn constructors(&self) -> &[Constructor] {
		match self {
			Shape::Concrete(constructors) => constructors,
			_ => &[],
		}
	}

	/// First declared zero-parameter constructor.
	pub fn default_constructor(&self) -> Option<&Constructor> {
		self.constructors().iter().find(|c| c.arity() == 0)
	}

	/// Constructor with the most parameters. Ties go to the one declared first.
	pub fn richest_constructor(&self) -> Option<&Constructor> {
		self.constructors()
			.iter()
			.fold(None, |best: Option<&Constructor>, candidate| match best {
				Some(best) if best.arity() >= candidate.arity() => Some(best),
				_ => Some(candidate),
			})
	}
}

impl fmt::Debug for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Shape::Abstract => f.write_str("Abstract"),
			Shape::Primitive => f.write_str("Primitive"),
			Shape::Factory { output } => f.debug_struct("Factory").field("output", output).finish(),
			Shape::Array { element, .. } => f.debug_struct("Array").field("element", element).finish(),
			Shape::Concrete(constructors) => f.debug_tuple("Concrete").field(constructors).finish(),
		}
	}
}

macro_rules! primitive_shapes {
	($($ty:ty),* $(,)?) => {
		$(
			impl Discoverable for $ty {
				fn shape() -> Shape {
					Shape::Primitive
				}
			}
		)*
	};
}

primitive_shapes!(
	u8,
	u16,
	u32,
	u64,
	u128,
	usize,
	i8,
	i16,
	i32,
	i64,
	i128,
	isize,
	f32,
	f64,
	bool,
	char,
	(),
	String,
	&'static str,
);

fn empty_vec<T: Send + Sync + 'static>() -> Instance {
	Instance::new(Arc::new(Vec::<T>::new()))
}

impl<T: Send + Sync + 'static> Discoverable for Vec<T> {
	fn shape() -> Shape {
		Shape::Array {
			element: TypeKey::of::<T>(),
			empty: empty_vec::<T>,
		}
	}
}

impl<T: 'static> Discoverable for dyn Fn() -> T + Send + Sync {
	fn shape() -> Shape {
		Shape::Factory {
			output: TypeKey::of::<T>(),
		}
	}
}
