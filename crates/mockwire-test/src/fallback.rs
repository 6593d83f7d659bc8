//! Missing-type policy that answers abstractions with test doubles

use crate::locator::DoubleLocator;
use mockwire_di::{MissingTypePolicy, Registration, ServiceRequest};
use std::sync::Arc;

/// Supplies a double for any abstraction the container has no registration for.
///
/// Concrete types are declined: they were either skipped as unconstructible or
/// never discovered, and a double would misrepresent them. Doubles come from
/// the shared [`DoubleLocator`], so they are the same instances the eager
/// registrations hand out.
#[derive(Debug, Clone)]
pub struct AutoMockingPolicy {
	locator: Arc<DoubleLocator>,
}

impl AutoMockingPolicy {
	pub fn new(locator: Arc<DoubleLocator>) -> Self {
		Self { locator }
	}
}

impl MissingTypePolicy for AutoMockingPolicy {
	fn build(&self, request: &ServiceRequest) -> Option<Registration> {
		let key = request.key();
		if request.is_concrete() {
			tracing::debug!(service = %key, "declining concrete type");
			return None;
		}

		let double = self.locator.service(key)?;
		tracing::debug!(service = %key, "registering double on demand");
		Some(Registration::instance(key, double))
	}
}
