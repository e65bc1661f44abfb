pub mod bucket;
pub mod datetime;
pub mod filter;
pub mod grid;
pub mod snapshot;
pub mod task;
pub mod view;
pub mod views;

use std::io::IsTerminal;

use anyhow::anyhow;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Host-facing subscriber setup.
/// The embedding application calls
/// this once at startup; the core
/// itself only emits events.
pub fn init_tracing(
  verbose: u8,
  quiet: u8
) -> anyhow::Result<()> {
  let default_level = if quiet >= 2 {
    "error"
  } else if quiet == 1 {
    "warn"
  } else if verbose >= 3 {
    "trace"
  } else if verbose == 2 {
    "debug"
  } else if verbose == 1 {
    "info"
  } else {
    "warn"
  };

  let env_filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(
          default_level
        )
      })
      .map_err(|e| {
        anyhow!(
          "invalid RUST_LOG / log \
           filter: {e}"
        )
      })?;

  let init_result =
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_level(true)
      .with_ansi(
        std::io::stderr()
          .is_terminal()
      )
      .try_init();

  if let Err(err) = init_result {
    debug!(
      error = %err,
      "tracing subscriber already \
       set, continuing"
    );
  }

  Ok(())
}
