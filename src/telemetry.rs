//! Opt-in tracing bootstrap.
//!
//! Conversion code emits `tracing` events at its boundaries (input
//! cardinalities, dropped rows, selected sign policy); installing a
//! subscriber is left to the embedding host. The `telemetry` feature adds a
//! convenience bootstrap for headless runs and test harnesses.

/// Installs a compact subscriber honoring `RUST_LOG`, defaulting to this
/// crate's `debug` events over a `warn` floor.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed, so hosts can call it unconditionally.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("visuals_rs=debug,warn"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
