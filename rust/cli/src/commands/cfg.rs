//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the current
//! riverline configuration settings with their sources (default,
//! environment, or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "starting_stack": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "seats": {
//!     "value": 6,
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
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to the output stream fails.
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
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "seats": {
            "value": config.seats,
            "source": sources.seats,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
    });

    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "RIVERLINE_CONFIG",
            "RIVERLINE_STACK",
            "RIVERLINE_SEATS",
            "RIVERLINE_SEED",
        ] {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn cfg_prints_valid_json_with_every_field() {
        clear_env();
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_cfg_command(&mut out, &mut err).unwrap();

        let text = String::from_utf8(out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        for key in ["starting_stack", "small_blind", "big_blind", "seats", "seed"] {
            assert!(parsed.get(key).is_some(), "missing key {}", key);
            assert!(parsed[key].get("value").is_some());
            assert!(parsed[key].get("source").is_some());
        }
        assert_eq!(parsed["seats"]["value"], 6);
        assert_eq!(parsed["seats"]["source"], "default");
        assert!(err.is_empty());
    }

    #[test]
    #[serial]
    fn cfg_output_is_pretty_printed() {
        clear_env();
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_cfg_command(&mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().count() > 1);
        assert!(text.contains("  "));
    }

    #[test]
    #[serial]
    fn cfg_reports_env_overrides() {
        clear_env();
        unsafe { std::env::set_var("RIVERLINE_SEED", "123") };
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_cfg_command(&mut out, &mut err).unwrap();
        clear_env();

        let parsed: serde_json::Value =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed["seed"]["value"], 123);
        assert_eq!(parsed["seed"]["source"], "env");
    }

    #[test]
    #[serial]
    fn cfg_surfaces_broken_configuration() {
        clear_env();
        unsafe { std::env::set_var("RIVERLINE_SEATS", "40") };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        clear_env();

        assert!(matches!(result, Err(CliError::Config(_))));
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Invalid configuration"));
    }
}
