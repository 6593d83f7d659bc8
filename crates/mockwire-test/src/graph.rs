//! Recursive dependency discovery
//!
//! [`GraphBuilder::discover`] walks the constructor graph of a type and emits
//! one registration per distinct type it reaches:
//!
//! | Kind | Registration |
//! |---|---|
//! | terminal | factory asking the [`DoubleLocator`] for a double |
//! | array | empty array of the element type |
//! | default-constructible | first zero-parameter constructor |
//! | dependency-requiring | richest constructor, after discovering its parameters |
//! | unconstructible | none |
//!
//! The visited set bounds the walk, so cyclic and diamond-shaped graphs
//! terminate with each type registered once.

use crate::locator::DoubleLocator;
use crate::visualization::DependencyGraph;
use mockwire_di::{
	DiError, Kind, Registration, ServiceRegistry, Shape, Strategy, TypeInfo, TypeKey,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Builds the registration set for one harness.
#[derive(Debug)]
pub struct GraphBuilder {
	visited: HashSet<TypeKey>,
	locator: Arc<DoubleLocator>,
	graph: DependencyGraph,
}

impl GraphBuilder {
	pub fn new(locator: Arc<DoubleLocator>) -> Self {
		Self {
			visited: HashSet::new(),
			locator,
			graph: DependencyGraph::new(),
		}
	}

	/// Marks `info` as handled by an explicit registration made elsewhere.
	///
	/// The walk will not register it again; it still shows up in the graph.
	pub fn pin(&mut self, info: TypeInfo) {
		let key = info.key();
		if self.visited.insert(key) {
			self.graph.add_node(key, info.shape().kind(), Some("instance"));
		}
	}

	/// Discovers `info` and everything reachable through its constructors.
	pub fn discover(&mut self, info: TypeInfo, registry: &mut ServiceRegistry) {
		let key = info.key();
		if !self.visited.insert(key) {
			return;
		}

		let shape = info.shape();
		let kind = shape.kind();
		match (kind, shape) {
			(Kind::Terminal, _) => {
				self.graph.add_node(key, kind, Some("factory"));
				let locator = Arc::clone(&self.locator);
				registry.register(Registration::factory(key, move |_| {
					locator
						.service(key)
						.ok_or_else(|| DiError::DoubleUnavailable(key.name().to_string()))
				}));
				tracing::debug!(service = %key, "registered terminal double");
			}
			(Kind::Array, Shape::Array { element, empty }) => {
				self.graph.add_node(key, kind, Some("empty-array"));
				registry.register(Registration::new(
					key,
					Strategy::EmptyArray {
						element,
						build: empty,
					},
				));
				tracing::debug!(service = %key, "registered empty array");
			}
			(Kind::DefaultConstructible, shape) => {
				let Some(constructor) = shape.default_constructor() else {
					return;
				};
				self.graph.add_node(key, kind, Some("default"));
				registry.register(Registration::new(
					key,
					Strategy::Default(constructor.clone()),
				));
				tracing::debug!(service = %key, constructor = constructor.name(), "registered default construction");
			}
			(Kind::DependencyRequiring, shape) => {
				let Some(constructor) = shape.richest_constructor() else {
					return;
				};
				self.graph.add_node(key, kind, Some("constructor"));
				for param in constructor.params() {
					self.graph.add_dependency(key, param.key());
					self.discover(*param, registry);
				}
				registry.register(Registration::new(
					key,
					Strategy::Constructor(constructor.clone()),
				));
				tracing::debug!(
					service = %key,
					constructor = constructor.name(),
					arity = constructor.arity(),
					"registered constructor injection"
				);
			}
			(kind, _) => {
				self.graph.add_node(key, kind, None);
				tracing::debug!(service = %key, "skipping type without public constructor");
			}
		}
	}

	pub fn is_visited(&self, key: TypeKey) -> bool {
		self.visited.contains(&key)
	}

	pub fn visited_count(&self) -> usize {
		self.visited.len()
	}

	pub fn graph(&self) -> &DependencyGraph {
		&self.graph
	}

	pub fn into_graph(self) -> DependencyGraph {
		self.graph
	}
}
