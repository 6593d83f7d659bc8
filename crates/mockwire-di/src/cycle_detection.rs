//! Thread-local circular dependency detection
//!
//! Resolution is synchronous, so the stack of types currently being built is
//! kept per thread. The outermost [`with_cycle_detection_scope`] call installs
//! the state; nested resolutions reuse it.
//!
//! - **O(1) circular detection** through a `HashSet<TypeKey>`
//! - **Depth limiting** configured per scope
//! - **RAII** cleanup via [`ResolutionGuard`]

use crate::TypeKey;
use std::cell::RefCell;
use std::collections::HashSet;

/// Default maximum resolution depth
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 100;

struct CycleDetectionState {
	/// Types currently being resolved
	resolution_set: HashSet<TypeKey>,
	/// Resolution order, used to render the cycle path
	resolution_path: Vec<TypeKey>,
	max_depth: usize,
}

impl CycleDetectionState {
	fn new(max_depth: usize) -> Self {
		Self {
			resolution_set: HashSet::new(),
			resolution_path: Vec::new(),
			max_depth,
		}
	}
}

thread_local! {
	static CYCLE_STATE: RefCell<Option<CycleDetectionState>> = const { RefCell::new(None) };
}

/// Clears the state when the scope that installed it ends, even on unwind.
struct ScopeReset {
	owner: bool,
}

impl Drop for ScopeReset {
	fn drop(&mut self) {
		if self.owner {
			CYCLE_STATE.with(|cell| cell.borrow_mut().take());
		}
	}
}

/// Runs `f` inside a cycle detection scope.
///
/// If a scope is already active on this thread (nested resolution), `f` runs
/// within it and `max_depth` is ignored.
pub fn with_cycle_detection_scope<T>(max_depth: usize, f: impl FnOnce() -> T) -> T {
	let owner = CYCLE_STATE.with(|cell| {
		let mut slot = cell.borrow_mut();
		if slot.is_some() {
			false
		} else {
			*slot = Some(CycleDetectionState::new(max_depth));
			true
		}
	});
	let _reset = ScopeReset { owner };
	f()
}

fn with_state<R>(f: impl FnOnce(&mut CycleDetectionState) -> R) -> Result<R, CycleError> {
	CYCLE_STATE.with(|cell| match cell.borrow_mut().as_mut() {
		Some(state) => Ok(f(state)),
		None => Err(CycleError::NoScope),
	})
}

/// Records the start of resolving `key`.
///
/// Fails if `key` is already being resolved further up the stack or the depth
/// limit is reached. The returned guard pops `key` when dropped.
pub fn begin_resolution(key: TypeKey) -> Result<ResolutionGuard, CycleError> {
	with_state(|state| {
		let depth = state.resolution_path.len() + 1;
		if depth > state.max_depth {
			return Err(CycleError::MaxDepthExceeded(depth));
		}

		if state.resolution_set.contains(&key) {
			return Err(CycleError::CircularDependency {
				type_name: key.short_name(),
				path: build_cycle_path(state, key),
			});
		}

		state.resolution_set.insert(key);
		state.resolution_path.push(key);
		Ok(ResolutionGuard { key })
	})?
}

/// RAII guard: removes its type from the resolution stack on drop.
#[derive(Debug)]
pub struct ResolutionGuard {
	key: TypeKey,
}

impl Drop for ResolutionGuard {
	fn drop(&mut self) {
		let key = self.key;
		let _ = with_state(|state| {
			state.resolution_set.remove(&key);
			if let Some(pos) = state.resolution_path.iter().rposition(|k| *k == key) {
				state.resolution_path.remove(pos);
			}
		});
	}
}

fn build_cycle_path(state: &CycleDetectionState, current: TypeKey) -> String {
	match state.resolution_path.iter().position(|k| *k == current) {
		Some(start) => {
			let cycle: Vec<String> = state.resolution_path[start..]
				.iter()
				.map(TypeKey::short_name)
				.collect();
			format!("{} -> {}", cycle.join(" -> "), current.short_name())
		}
		None => format!("Unknown cycle involving {}", current.short_name()),
	}
}

/// Circular dependency error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
	#[error(
		"Circular dependency detected: {type_name}\n  Path: {path}\nThis forms a cycle that cannot be resolved."
	)]
	CircularDependency {
		/// Name of the type involved in the cycle
		type_name: String,
		/// Circular path (format: A -> B -> C -> A)
		path: String,
	},

	#[error(
		"Maximum resolution depth exceeded: {0}\nThis likely indicates an extremely deep or circular dependency chain."
	)]
	MaxDepthExceeded(usize),

	#[error("Cycle detection used outside of a scope. Use `with_cycle_detection_scope` to initialize.")]
	NoScope,
}
