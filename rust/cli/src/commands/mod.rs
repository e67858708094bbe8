//! Command handler modules for the pokermachine CLI.
//!
//! This module contains individual handler functions for each CLI subcommand.
//! Each command is implemented in its own module file with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers: Helper functions specific to that command
//! - Dependency injection: Output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: All errors propagated via `CliError` enum

mod cfg;
mod deal;
mod paytable;
mod play;
mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use paytable::handle_paytable_command;
pub use play::handle_play_command;
pub use stats::handle_stats_command;
