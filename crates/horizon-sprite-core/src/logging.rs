//! Logging facilities for Horizon Sprite.
//!
//! Horizon Sprite uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_sprite=trace")
//!     .init();
//! ```
//!
//! Button state transitions are logged at `trace`, group exclusivity
//! enforcement at `debug`, and stale handles rejected by a scene at `warn`.

use std::time::Instant;

/// Span names used throughout Horizon Sprite for tracing.
pub mod span_names {
    /// Listener dispatch for one button transition.
    pub const DISPATCH: &str = "horizon_sprite::dispatch";
    /// Touch routing for one event batch.
    pub const ROUTE: &str = "horizon_sprite::route";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_sprite_core";
    /// Button interaction state machine target.
    pub const BUTTON: &str = "horizon_sprite::button";
    /// Button group target.
    pub const GROUP: &str = "horizon_sprite::group";
    /// Scene arena and listener dispatch target.
    pub const SCENE: &str = "horizon_sprite::scene";
    /// Touch routing target.
    pub const ROUTER: &str = "horizon_sprite::router";
    /// Performance measurements.
    pub const PERF: &str = "horizon_sprite::perf";
}

/// A guard that measures an operation and reports its duration when dropped.
///
/// The measurement is emitted at `trace` level on the [`targets::PERF`] target.
#[derive(Debug)]
pub struct PerfSpan {
    operation: &'static str,
    started: Instant,
}

impl PerfSpan {
    /// Start measuring the named operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    /// The operation being measured.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::trace!(
            target: targets::PERF,
            operation = self.operation,
            elapsed_us = self.started.elapsed().as_micros() as u64,
            "operation finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("horizon_sprite=trace")
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_perf_span() {
        setup();
        let span = PerfSpan::new(span_names::DISPATCH);
        assert_eq!(span.operation(), "horizon_sprite::dispatch");
    }

    #[test]
    fn test_targets_share_crate_prefix() {
        for target in [targets::BUTTON, targets::GROUP, targets::SCENE, targets::ROUTER] {
            assert!(target.starts_with("horizon_sprite::"));
        }
    }
}
