//! Plugdeck Telemetry - logging setup for the plugdeck deployment runtime.
//!
//! Library crates in this workspace only emit `tracing` events. Binaries and
//! test harnesses call into this crate once to decide where those events go.
//!
//! # Example
//!
//! ```rust,no_run
//! use plugdeck_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), plugdeck_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("plugdeck_deploy=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("deployer starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    BoxedSubscriber, LogConfig, LogFormat, LogTarget, build_subscriber, setup_default_logging,
    setup_logging, setup_test_logging,
};
