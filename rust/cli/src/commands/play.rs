//! # Play Command
//!
//! One console player against one bot. The match runs inside the engine's
//! notification loop; the console player blocks on input whenever it has to
//! act. Quitting (or closing the input) abandons the match.

use crate::config::Config;
use crate::console::ConsolePlayer;
use crate::error::CliError;
use crate::ui;
use durak_ai::create_bot;
use durak_engine::engine::{Game, GameState};
use durak_engine::logger::{EventLogger, GameEvent};
use durak_engine::player::Player;
use std::io::{BufRead, Write};
use tracing::info;

/// Handle the play command.
///
/// # Arguments
///
/// * `cfg` - Resolved configuration, command-line flags already applied
/// * `history` - Optional JSONL file receiving the match events
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for the console player's decisions
///
/// # Errors
///
/// `CliError::Interrupted` when the player quits before the match ends.
pub fn handle_play_command(
    cfg: &Config,
    history: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let bot = create_bot(&cfg.bot, "Bot", seed.wrapping_add(1))?;

    if cfg.bot == "random" {
        ui::display_warning(
            err,
            "The random bot never covers; it takes every attack. Use --bot cover for a real defence.",
        )?;
    }
    writeln!(
        out,
        "play: bot={} rule={} seed={}",
        cfg.bot, cfg.rule, seed
    )?;

    let (state, rounds, events) = {
        let console = ConsolePlayer::new("You", stdin, out);
        let players: Vec<Box<dyn Player + '_>> = vec![Box::new(console), Box::new(bot)];
        let mut game = Game::new(players, cfg.game_config(seed))?;
        let status = game.start()?;
        if status.awaiting_input() {
            info!(round = status.round_number, "player left the match");
            game.end_match();
        }
        (status.state, status.round_number, game.history().to_vec())
    };

    if let Some(path) = history {
        write_history(path, &events)?;
    }

    if state == GameState::Playing {
        writeln!(out, "Game abandoned in round {}", rounds)?;
        return Err(CliError::Interrupted("player quit".to_string()));
    }
    writeln!(out, "Rounds played: {}", rounds)?;
    Ok(())
}

fn write_history(path: &str, events: &[GameEvent]) -> Result<(), CliError> {
    let mut logger = EventLogger::create(path)?;
    logger.write_all(events)?;
    Ok(())
}
