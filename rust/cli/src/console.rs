//! Interactive player reading decisions from a line-based input.

use std::fmt::Display;
use std::io::{BufRead, Write};

use durak_engine::errors::Rejection;
use durak_engine::player::{
    GameEndResult, GameStart, Hand, Intent, Player, Throw, TurnContext,
};
use tracing::debug;

use crate::formatters::{format_card, format_hand_listing, format_result, format_table};
use crate::io_utils::read_stdin_line;
use crate::validation::{ParseResult, parse_hand_choice};

/// Human player on a terminal (or any reader/writer pair).
///
/// Prompts whenever it has to act: as attacker when the round opens or every
/// attacking card is covered, as defender while an attacking card is open.
/// Malformed input re-prompts. `q`, `quit` or end of input leave the turn
/// unanswered, which suspends the game.
pub struct ConsolePlayer<'io> {
    name: String,
    hand: Hand,
    input: &'io mut dyn BufRead,
    output: &'io mut dyn Write,
    names: Vec<String>,
    quit: bool,
}

impl<'io> ConsolePlayer<'io> {
    pub fn new(name: &str, input: &'io mut dyn BufRead, output: &'io mut dyn Write) -> Self {
        Self {
            name: name.to_string(),
            hand: Hand::new(),
            input,
            output,
            names: Vec::new(),
            quit: false,
        }
    }

    fn say(&mut self, line: impl Display) {
        if writeln!(self.output, "{}", line).is_err() {
            self.quit = true;
        }
    }

    fn seat_name(&self, seat: usize) -> String {
        self.names
            .get(seat)
            .cloned()
            .unwrap_or_else(|| format!("P{}", seat + 1))
    }

    fn prompt(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        if self.quit {
            return None;
        }
        let (label, zero, slot) = if ctx.attacker_to_move() {
            ("Attack", "pass", ctx.table.first_free_slot())
        } else if let Some(slot) = ctx.slot_to_cover() {
            ("Defend", "take", Some(slot))
        } else {
            return None;
        };

        self.hand.sort_by_key(|c| (c.suit, c.rank));
        loop {
            self.say(format!("Table: {}", format_table(ctx.table)));
            self.say("Your hand:");
            for line in format_hand_listing(self.hand.cards()) {
                self.say(line);
            }
            let asked = write!(
                self.output,
                "{} (0 = {}, 1-{} choose card): ",
                label,
                zero,
                self.hand.len()
            )
            .and_then(|_| self.output.flush());
            if asked.is_err() {
                self.quit = true;
            }
            if self.quit {
                return None;
            }

            let Some(line) = read_stdin_line(self.input) else {
                debug!(player = %self.name, "input closed");
                self.quit = true;
                return None;
            };
            match parse_hand_choice(&line, self.hand.len()) {
                ParseResult::Pass => return Some(Intent::Pass),
                ParseResult::Card(index) => match (self.hand.get(index), slot) {
                    (Some(card), Some(slot)) => return Some(Intent::Throw { card, slot }),
                    _ => self.say("Error: no free slot left; pass instead"),
                },
                ParseResult::Quit => {
                    self.quit = true;
                    return None;
                }
                ParseResult::Invalid(msg) => self.say(format!("Error: {}", msg)),
            }
        }
    }
}

impl Player for ConsolePlayer<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn on_game_started(&mut self, start: &GameStart) {
        self.names = start.players.clone();
        self.say(format!(
            "Trump: {} ({})",
            start.trump,
            format_card(&start.trump)
        ));
    }

    fn on_next_round(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        let attacker = self.seat_name(ctx.round.attacker());
        let defender = self.seat_name(ctx.round.defender());
        self.say(format!("Round {}", ctx.round_number));
        self.say("Round started");
        self.say(format!("Attacker: {}", attacker));
        self.say(format!("Defender: {}", defender));
        self.prompt(ctx)
    }

    fn on_card_thrown(&mut self, throw: &Throw, ctx: &TurnContext<'_>) -> Option<Intent> {
        let who = if throw.thrower == ctx.seat {
            "You".to_string()
        } else {
            self.seat_name(throw.thrower)
        };
        self.say(format!(
            "{} threw {} to slot {}",
            who,
            throw.card,
            throw.slot + 1
        ));
        self.prompt(ctx)
    }

    fn on_intent_rejected(
        &mut self,
        rejection: &Rejection,
        ctx: &TurnContext<'_>,
    ) -> Option<Intent> {
        self.say(format!("Rejected: {}", rejection));
        self.prompt(ctx)
    }

    fn on_game_ended(&mut self, result: &GameEndResult) {
        let winners: Vec<String> = result.winners.iter().map(|&s| self.seat_name(s)).collect();
        self.say(format!("Game over: {}", format_result(result, &self.names)));
        if !winners.is_empty() {
            self.say(format!("Winners: {}", winners.join(", ")));
        }
    }
}
