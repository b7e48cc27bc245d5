//! Input parsing for the interactive console player.
//!
//! The console shows the hand as a numbered list and reads one line per
//! decision: `0` passes (or takes, when defending), `1..N` picks a card.
//! Anything else re-prompts instead of aborting the game.

/// Outcome of parsing one line of console input.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// 0-based index into the printed hand
    Card(usize),
    /// `0`: pass as attacker, take as defender
    Pass,
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parses a hand selection against a hand of `hand_len` cards.
///
/// # Example
///
/// ```rust
/// # use durak_cli::validation::{parse_hand_choice, ParseResult};
/// assert_eq!(parse_hand_choice("0", 3), ParseResult::Pass);
/// assert_eq!(parse_hand_choice("3", 3), ParseResult::Card(2));
/// assert_eq!(parse_hand_choice("QUIT", 3), ParseResult::Quit);
/// assert!(matches!(parse_hand_choice("4", 3), ParseResult::Invalid(_)));
/// ```
pub fn parse_hand_choice(input: &str, hand_len: usize) -> ParseResult {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    if input == "q" || input == "quit" {
        return ParseResult::Quit;
    }
    match input.parse::<usize>() {
        Ok(0) => ParseResult::Pass,
        Ok(n) if n <= hand_len => ParseResult::Card(n - 1),
        Ok(n) => ParseResult::Invalid(format!(
            "No card {} in hand (choose 0-{})",
            n, hand_len
        )),
        Err(_) => ParseResult::Invalid(format!("Unrecognized input '{}'", input)),
    }
}
