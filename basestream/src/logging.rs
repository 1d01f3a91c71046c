//!
//! Log output and error reports, plus the `tracing` macros used across the crate.
//!

use tracing_subscriber::EnvFilter;

use crate::errors::{eyre, Report};

pub use tracing::{debug, error, info, warn};

///
/// Install `color_eyre` reports and a `tracing_subscriber` fmt layer.
///
/// `RUST_LOG` wins over `debug` when it is set. Backtraces are captured for library
/// errors unless `RUST_LIB_BACKTRACE` says otherwise.
///
pub fn setup(debug: bool) -> Result<(), Report> {
    if std::env::var_os("RUST_LIB_BACKTRACE").is_none() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .try_init()
        .map_err(|err| eyre!("tracing subscriber already installed: {}", err))
}

fn default_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}
