//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! command's own output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a `-v` count
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,crudgen_lib=info",
        _ => "debug,crudgen_lib=trace",
    }
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence over the verbosity flag.
///
/// # Example
///
/// ```rust,no_run
/// use crudgen_lib::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(1)?;
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
