//! Resolution errors

use crate::cycle_detection::CycleError;

pub type DiResult<T> = Result<T, DiError>;

#[derive(Debug, thiserror::Error)]
pub enum DiError {
	/// Neither a registration nor the missing-type policy could supply the type.
	#[error("No registration found for {0} and no missing-type policy could supply one")]
	NotRegistered(String),

	/// A registration delegated to the double engine and the engine declined.
	#[error("The double engine could not produce a test double for {0}")]
	DoubleUnavailable(String),

	#[error(transparent)]
	Cycle(#[from] CycleError),

	/// A stored instance does not hold the requested type.
	#[error("Resolved instance does not have the requested type: {0}")]
	TypeMismatch(String),
}

impl DiError {
	pub fn is_not_registered(&self) -> bool {
		matches!(self, DiError::NotRegistered(_))
	}

	pub fn is_circular(&self) -> bool {
		matches!(self, DiError::Cycle(CycleError::CircularDependency { .. }))
	}
}
