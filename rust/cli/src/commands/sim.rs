//! Simulation command: bot-only matches with a summary of the outcomes.
//!
//! Game `i` (0-based) uses seed `base + i`; bots in that game are seeded
//! from the game seed and their seat, so a run is reproducible from the
//! base seed alone.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_result;
use crate::ui;
use durak_ai::create_bot;
use durak_engine::engine::Game;
use durak_engine::player::{EndReason, GameEndResult, Player};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    losses: Vec<u32>,
    draws: u32,
    round_limit: u32,
    rounds: u64,
}

impl Summary {
    fn new(players: usize) -> Self {
        Self {
            losses: vec![0; players],
            ..Self::default()
        }
    }

    fn record(&mut self, result: &GameEndResult) {
        self.rounds += u64::from(result.rounds);
        match (result.reason, result.loser) {
            (EndReason::HandsEmptied, Some(loser)) => self.losses[loser] += 1,
            (EndReason::HandsEmptied, None) => self.draws += 1,
            (EndReason::RoundLimit, _) => self.round_limit += 1,
            (EndReason::Abandoned, _) => {}
        }
    }
}

pub fn handle_sim_command(
    cfg: &Config,
    games: u32,
    players: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    if players < 2 {
        ui::write_error(err, "players must be >= 2")?;
        return Err(CliError::InvalidInput("players must be >= 2".to_string()));
    }

    let base = cfg.seed.unwrap_or_else(rand::random);
    // size checks run before any per-seat allocation
    cfg.game_config(base).validate(players)?;
    writeln!(
        out,
        "sim: games={} players={} bot={} rule={} seed={}",
        games, players, cfg.bot, cfg.rule, base
    )?;

    let names: Vec<String> = (1..=players).map(|i| format!("P{}", i)).collect();
    let mut summary = Summary::new(players);
    for i in 0..games {
        let seed = base.wrapping_add(u64::from(i));
        let mut seats: Vec<Box<dyn Player>> = Vec::with_capacity(players);
        for (seat, name) in names.iter().enumerate() {
            let bot_seed = seed.wrapping_mul(31).wrapping_add(seat as u64);
            seats.push(Box::new(create_bot(&cfg.bot, name, bot_seed)?));
        }
        let mut game = Game::new(seats, cfg.game_config(seed))?;
        game.start()?;
        let Some(result) = game.result() else {
            // bots always answer, so only a misbehaving strategy gets here
            game.end_match();
            ui::display_warning(err, &format!("game {} stalled and was abandoned", i + 1))?;
            continue;
        };
        debug!(game = i + 1, ?result, "simulated");
        writeln!(
            out,
            "game {}: {} ({} rounds)",
            i + 1,
            format_result(result, &names),
            result.rounds
        )?;
        summary.record(result);
    }

    writeln!(out, "Games: {}", games)?;
    for (seat, losses) in summary.losses.iter().enumerate() {
        writeln!(out, "{} lost: {}", names[seat], losses)?;
    }
    writeln!(out, "Draws: {}", summary.draws)?;
    writeln!(out, "Round limit: {}", summary.round_limit)?;
    writeln!(
        out,
        "Average rounds: {:.1}",
        summary.rounds as f64 / f64::from(games)
    )?;
    Ok(())
}
