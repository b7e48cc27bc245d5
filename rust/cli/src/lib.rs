//! # Durak CLI Library
//!
//! Command-line front end for the Durak engine: play against a bot on the
//! console, simulate bot matches, inspect deals and show the configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["durak", "play", "--bot", "cover", "--seed", "7"];
//! let code = durak_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert!(code == 0 || code == 130);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play one match against a bot, reading moves from stdin
//! - `sim`: Run bot-only matches and print a summary
//! - `deal`: Show the trump and hands dealt by a seed
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
mod config;
pub mod console;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, DurakCli};
use commands::{handle_cfg_command, handle_deal_command, handle_play_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "cfg"];

/// Main entry point for the CLI application, reading interactive input from stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when the player quits a match
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["durak", "deal", "--seed", "42"];
/// let code = durak_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Like [`run`], with the interactive input supplied by the caller.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DurakCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };
    logging::init_logging(cli.verbose);

    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            let e = CliError::Config(e.to_string());
            let _ = ui::write_error(err, &e.to_string());
            return e.exit_code();
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(&resolved, out),
        Commands::Deal { seed, players } => {
            let cfg = resolved.config.with_overrides(seed, None, None);
            handle_deal_command(&cfg, players, out)
        }
        Commands::Play {
            seed,
            bot,
            rule,
            history,
        } => {
            let cfg = resolved.config.with_overrides(
                seed,
                bot.map(|b| b.as_str()),
                rule.map(Into::into),
            );
            handle_play_command(&cfg, history.as_deref(), out, err, input)
        }
        Commands::Sim {
            games,
            seed,
            players,
            bot,
            rule,
        } => {
            let cfg = resolved.config.with_overrides(
                seed,
                bot.map(|b| b.as_str()),
                rule.map(Into::into),
            );
            handle_sim_command(&cfg, games, players, out, err)
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = writeln!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Durak CLI\nUsage: durak <command> [options]\n\nCommands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: durak --help");
    exit_code::ERROR
}
