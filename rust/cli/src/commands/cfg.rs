//! Configuration command handler.
//!
//! Displays the resolved settings with their sources as pretty JSON:
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "slots": {
            "value": config.slots,
            "source": sources.slots,
        },
        "hand_size": {
            "value": config.hand_size,
            "source": sources.hand_size,
        },
        "rule": {
            "value": config.rule,
            "source": sources.rule,
        },
        "bot": {
            "value": config.bot,
            "source": sources.bot,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
