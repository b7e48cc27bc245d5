//! Deal command: shows what a seed deals without playing.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_cards;
use durak_engine::engine::Deal;
use std::io::Write;

/// Prints the seed, the trump card, every hand and the first attacker and
/// defender for `players` seats.
pub fn handle_deal_command(
    cfg: &Config,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let deal = Deal::from_seed(seed, players, cfg.hand_size)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Trump: {}", deal.trump)?;
    for (seat, hand) in deal.hands.iter().enumerate() {
        writeln!(out, "P{}: {}", seat + 1, format_cards(hand))?;
    }
    writeln!(
        out,
        "Attacker: P{}  Defender: P{}",
        deal.attacker + 1,
        deal.defender + 1
    )?;
    Ok(())
}
