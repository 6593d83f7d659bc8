//! rstest fixtures for harness tests
//!
//! ```rust,ignore
//! use mockwire_test::fixtures::*;
//! use rstest::*;
//!
//! #[rstest]
//! fn builds_service(mock_registry: MockRegistry, harness_config: HarnessConfig) {
//!     let mocker = AutoMocker::<Service>::with_config(Arc::new(mock_registry), harness_config);
//!     assert!(mocker.class_under_test().is_ok());
//! }
//! ```

use crate::config::HarnessConfig;
use crate::engine::MockRegistry;
use crate::logging::init_test_logging;
use rstest::*;

/// Empty engine; register doubles on it in the test.
#[fixture]
pub fn mock_registry() -> MockRegistry {
	MockRegistry::new()
}

/// Engine answering every primitive type with its default value.
#[fixture]
pub fn primitive_engine() -> MockRegistry {
	MockRegistry::with_primitive_defaults()
}

/// Default configuration, with test logging initialised.
#[fixture]
pub fn harness_config() -> HarnessConfig {
	init_test_logging();
	HarnessConfig::default()
}

/// Configuration without the fallback policy.
#[fixture]
pub fn strict_config(harness_config: HarnessConfig) -> HarnessConfig {
	harness_config.with_fallback(false)
}
