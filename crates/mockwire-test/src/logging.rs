//! Test logging utilities
//!
//! `tracing` is built with its `log` feature, so the harness's events reach
//! `env_logger` when no `tracing` subscriber is installed. Run tests with
//! `RUST_LOG=mockwire_test=debug` to watch the graph walk.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once)
///
/// # Examples
///
/// ```
/// use mockwire_test::logging::init_test_logging;
///
/// init_test_logging();
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}
