//! Discovered dependency graph and its DOT rendering
//!
//! The graph builder records every type it visits and every constructor edge
//! it follows. The result can be rendered with Graphviz:
//!
//! ```rust
//! use mockwire_di::{Kind, TypeKey};
//! use mockwire_test::visualization::DependencyGraph;
//!
//! struct Database;
//! struct UserService;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_node(TypeKey::of::<UserService>(), Kind::DependencyRequiring, Some("constructor"));
//! graph.add_node(TypeKey::of::<Database>(), Kind::DefaultConstructible, Some("default"));
//! graph.add_dependency(TypeKey::of::<UserService>(), TypeKey::of::<Database>());
//!
//! let dot = graph.to_dot();
//! assert!(dot.contains("\"UserService\" -> \"Database\""));
//! ```

use mockwire_di::{Kind, TypeKey};
use std::collections::{HashMap, HashSet};

/// A visited type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
	pub key: TypeKey,
	pub kind: Kind,
	/// Label of the registered strategy; `None` when the type was skipped
	pub strategy: Option<&'static str>,
}

/// Types in visiting order plus constructor edges
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
	nodes: Vec<GraphNode>,
	index: HashMap<TypeKey, usize>,
	edges: Vec<(TypeKey, TypeKey)>,
}

impl DependencyGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a node. A key that is already present keeps its first entry.
	pub fn add_node(&mut self, key: TypeKey, kind: Kind, strategy: Option<&'static str>) {
		if self.index.contains_key(&key) {
			return;
		}
		self.index.insert(key, self.nodes.len());
		self.nodes.push(GraphNode {
			key,
			kind,
			strategy,
		});
	}

	/// Adds an edge from a constructed type to one of its constructor parameters.
	pub fn add_dependency(&mut self, from: TypeKey, to: TypeKey) {
		self.edges.push((from, to));
	}

	pub fn node(&self, key: TypeKey) -> Option<&GraphNode> {
		self.index.get(&key).map(|&slot| &self.nodes[slot])
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[(TypeKey, TypeKey)] {
		&self.edges
	}

	/// Direct dependencies of `key` in parameter order.
	pub fn dependencies_of(&self, key: TypeKey) -> Vec<TypeKey> {
		self.edges
			.iter()
			.filter_map(|(from, to)| (*from == key).then_some(*to))
			.collect()
	}

	/// Generate DOT format output for Graphviz
	///
	/// Nodes are labelled with their short type name and kind; skipped types are
	/// drawn dashed.
	pub fn to_dot(&self) -> String {
		let mut output = String::from("digraph DependencyGraph {\n");
		output.push_str("  rankdir=LR;\n");
		output.push_str("  node [shape=box, style=rounded];\n\n");

		for node in &self.nodes {
			let color = match node.kind {
				Kind::Terminal => "lightyellow",
				Kind::Array => "lightgrey",
				Kind::DefaultConstructible => "lightblue",
				Kind::DependencyRequiring => "lightgreen",
				Kind::Unconstructible => "white",
			};
			let style = if node.strategy.is_some() {
				"filled"
			} else {
				"dashed"
			};
			let name = node.key.short_name();

			output.push_str(&format!(
				"  \"{}\" [label=\"{}\\n({})\", fillcolor={}, style={}];\n",
				name, name, node.kind, color, style
			));
		}

		output.push('\n');

		for (from, to) in &self.edges {
			output.push_str(&format!(
				"  \"{}\" -> \"{}\";\n",
				from.short_name(),
				to.short_name()
			));
		}

		output.push_str("}\n");
		output
	}

	/// Detect constructor cycles
	///
	/// Each cycle lists its types starting from the first one visited. Such
	/// graphs build fine but fail at resolution time.
	pub fn detect_cycles(&self) -> Vec<Vec<TypeKey>> {
		let mut cycles = Vec::new();
		let mut visited = HashSet::new();
		let mut rec_stack = HashSet::new();

		for node in &self.nodes {
			if !visited.contains(&node.key) {
				let mut path = Vec::new();
				self.dfs_detect_cycles(
					node.key,
					&mut visited,
					&mut rec_stack,
					&mut path,
					&mut cycles,
				);
			}
		}

		cycles
	}

	fn dfs_detect_cycles(
		&self,
		node: TypeKey,
		visited: &mut HashSet<TypeKey>,
		rec_stack: &mut HashSet<TypeKey>,
		path: &mut Vec<TypeKey>,
		cycles: &mut Vec<Vec<TypeKey>>,
	) {
		visited.insert(node);
		rec_stack.insert(node);
		path.push(node);

		for dep in self.dependencies_of(node) {
			if !visited.contains(&dep) {
				self.dfs_detect_cycles(dep, visited, rec_stack, path, cycles);
			} else if rec_stack.contains(&dep)
				&& let Some(cycle_start) = path.iter().position(|p| *p == dep)
			{
				cycles.push(path[cycle_start..].to_vec());
			}
		}

		path.pop();
		rec_stack.remove(&node);
	}

	/// Get statistics about the dependency graph
	pub fn statistics(&self) -> GraphStatistics {
		let count = |wanted: &[Kind]| {
			self.nodes
				.iter()
				.filter(|n| wanted.contains(&n.kind))
				.count()
		};

		GraphStatistics {
			node_count: self.nodes.len(),
			edge_count: self.edges.len(),
			terminal_count: count(&[Kind::Terminal]),
			array_count: count(&[Kind::Array]),
			concrete_count: count(&[Kind::DefaultConstructible, Kind::DependencyRequiring]),
			skipped_count: self.nodes.iter().filter(|n| n.strategy.is_none()).count(),
		}
	}
}

/// Statistics about a dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStatistics {
	/// Total number of nodes
	pub node_count: usize,
	/// Total number of edges
	pub edge_count: usize,
	/// Types delegated to the double engine
	pub terminal_count: usize,
	/// Types resolved to empty arrays
	pub array_count: usize,
	/// Types built for real
	pub concrete_count: usize,
	/// Types visited without a registration
	pub skipped_count: usize,
}
