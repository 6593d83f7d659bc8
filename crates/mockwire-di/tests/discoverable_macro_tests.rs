//! Integration tests for the `#[discoverable]` attribute

use mockwire_di::{
	Discoverable, Instance, Kind, Registration, ServiceRegistry, Shape, Strategy, TypeInfo, TypeKey,
	discoverable,
};
use rstest::*;
use std::sync::Arc;

#[discoverable]
pub trait Repository: Send + Sync {
	fn find(&self, id: u32) -> Option<String>;
}

struct InMemoryRepository;

impl Repository for InMemoryRepository {
	fn find(&self, id: u32) -> Option<String> {
		(id == 1).then(|| "alice".to_string())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
	pub page_size: usize,
}

#[discoverable]
impl Settings {
	pub fn new() -> Self {
		Self { page_size: 20 }
	}

	pub fn with_page_size(page_size: usize) -> Settings {
		Self { page_size }
	}

	fn tiny() -> Self {
		Self { page_size: 1 }
	}
}

pub struct UserService {
	repo: Arc<dyn Repository>,
	settings: Settings,
}

#[discoverable]
impl UserService {
	pub fn new(repo: Arc<dyn Repository>, settings: Settings) -> Self {
		Self { repo, settings }
	}

	pub fn name_of(&self, id: u32) -> Option<String> {
		self.repo.find(id)
	}
}

pub struct Sealed {
	_private: (),
}

#[discoverable]
impl Sealed {
	fn create() -> Self {
		Self { _private: () }
	}
}

pub struct Ledger;

#[discoverable]
impl Ledger {
	pub fn from_repo(_repo: Arc<dyn Repository>) -> Self {
		Self
	}

	pub fn from_names(_names: Vec<String>) -> Self {
		Self
	}
}

fn register_richest(registry: &mut ServiceRegistry, info: TypeInfo) {
	let shape = info.shape();
	if let Some(constructor) = shape.richest_constructor() {
		registry.register(Registration::new(
			info.key(),
			Strategy::Constructor(constructor.clone()),
		));
	}
}

#[rstest]
fn trait_becomes_abstract_shape() {
	// Act
	let shape = <dyn Repository as Discoverable>::shape();

	// Assert
	assert!(matches!(shape, Shape::Abstract));
	assert_eq!(shape.kind(), Kind::Terminal);
	assert!(!shape.is_concrete());
}

#[rstest]
fn private_constructors_are_ignored() {
	// Act
	let shape = Settings::shape();
	let names: Vec<_> = shape.constructors().iter().map(|c| c.name()).collect();

	// Assert
	assert_eq!(names, vec!["new", "with_page_size"]);
	assert_eq!(shape.kind(), Kind::DefaultConstructible);
	assert_eq!(Settings::tiny().page_size, 1);
}

#[rstest]
fn parameters_keep_declaration_order() {
	// Act
	let shape = UserService::shape();
	let constructor = shape.richest_constructor().unwrap();
	let params: Vec<_> = constructor.params().iter().map(|p| p.key()).collect();

	// Assert
	assert_eq!(shape.kind(), Kind::DependencyRequiring);
	assert_eq!(
		params,
		vec![TypeKey::of::<dyn Repository>(), TypeKey::of::<Settings>()]
	);
}

#[rstest]
fn impl_without_public_constructor_is_unconstructible() {
	// Act
	let shape = Sealed::shape();

	// Assert
	assert_eq!(shape.kind(), Kind::Unconstructible);
	let _ = Sealed::create();
}

#[rstest]
fn equal_arity_ties_go_to_first_declared() {
	// Act
	let shape = Ledger::shape();

	// Assert
	assert_eq!(shape.richest_constructor().map(|c| c.name()), Some("from_repo"));
}

#[rstest]
fn generated_constructor_shares_arcs_and_clones_values() {
	// Arrange
	let repo: Arc<dyn Repository> = Arc::new(InMemoryRepository);
	let mut registry = ServiceRegistry::new();
	registry.register(Registration::instance(
		TypeKey::of::<dyn Repository>(),
		Instance::new(Arc::clone(&repo)),
	));
	registry.register(Registration::instance(
		TypeKey::of::<usize>(),
		Instance::new(Arc::new(7usize)),
	));
	register_richest(&mut registry, TypeInfo::of::<Settings>());
	register_richest(&mut registry, TypeInfo::of::<UserService>());
	let container = registry.build();

	// Act
	let service = container.resolve::<UserService>().unwrap();
	let settings = container.resolve::<Settings>().unwrap();

	// Assert
	assert!(Arc::ptr_eq(&service.repo, &repo));
	assert_eq!(service.settings, *settings);
	assert_eq!(service.settings.page_size, 7);
	assert_eq!(service.name_of(1).as_deref(), Some("alice"));
}
