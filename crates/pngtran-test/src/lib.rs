//! pngtran-test - Regression test framework for pngtran
//!
//! Every crate's `tests/*_reg.rs` files drive their checks through
//! [`RegParams`], which numbers each comparison, records failures instead
//! of panicking at the first one, and reports them together at
//! [`RegParams::cleanup`].
//!
//! Expected values are always stated or computed inline; there are no
//! golden files.
//!
//! # Usage
//!
//! ```ignore
//! use pngtran_test::RegParams;
//!
//! let mut rp = RegParams::new("gamma_table");
//! rp.compare_values(56.0, table.lookup(128) as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Filter for library diagnostics (default `pngtran=warn`)

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pngtran=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .without_time(),
        )
        .try_init();
}
