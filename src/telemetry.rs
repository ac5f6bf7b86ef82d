//! Telemetry helpers for applications embedding `chart-axis`.
//!
//! Tracing setup is explicit and opt-in. Consumers either call one of the
//! `init_*` helpers or wire their own `tracing` subscriber and filters.
//! Update passes log at `debug`, per-pass internals (stack ranges, unit
//! selection, slot building) at `trace`.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "chart_axis=info";

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback filter, for
/// example `"chart_axis=trace"` while diagnosing tick placement.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter)),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
