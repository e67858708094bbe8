//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the current
//! pokermachine configuration settings with their sources (default,
//! environment, or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "packs": {
//!     "value": 10,
//!     "source": "default"
//!   },
//!   "base_stake": {
//!     "value": 200,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// Loads the current configuration with source tracking and displays it
/// as formatted JSON to the output stream.
///
/// # Arguments
///
/// * `out` - Output stream for command output
/// * `err` - Error stream for error messages
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(CliError)` if configuration loading fails or output writing fails
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "packs": {
            "value": config.packs,
            "source": sources.packs,
        },
        "base_stake": {
            "value": config.base_stake,
            "source": sources.base_stake,
        },
        "min_wager_percent": {
            "value": config.min_wager_percent,
            "source": sources.min_wager_percent,
        },
        "killer_frequency": {
            "value": config.killer_frequency,
            "source": sources.killer_frequency,
        },
        "killer_penalty_cap": {
            "value": config.killer_penalty_cap,
            "source": sources.killer_penalty_cap,
        },
        "killer_win_multiplier": {
            "value": config.killer_win_multiplier,
            "source": sources.killer_win_multiplier,
        },
        "data_file": {
            "value": config.data_file,
            "source": sources.data_file,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
