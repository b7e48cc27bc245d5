//! Card, hand and table formatters for terminal display.
//!
//! Cards print in a compact rank+suit form. Suits use Unicode symbols with an
//! ASCII fallback for terminals that cannot render them.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use durak_engine::cards::{Card, Rank, Suit};
//! use durak_cli::formatters::format_card;
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! ```

use durak_engine::cards::{Card, Rank, Suit};
use durak_engine::player::{EndReason, GameEndResult};
use durak_engine::table::Table;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Rank as a string (6-9, T, J, Q, K, A).
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
    .to_string()
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Cards in bracket notation: `[A♠ K♥]`, `[]` when empty.
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Numbered hand listing, one card per line, as the console prompts expect.
///
/// ```rust
/// use durak_engine::cards::{Card, Rank, Suit};
/// # use durak_cli::formatters::format_hand_listing;
///
/// let lines = format_hand_listing(&[Card::new(Rank::Ten, Suit::Clubs)]);
/// assert_eq!(lines, vec!["  1) Ten of Clubs".to_string()]);
/// ```
pub fn format_hand_listing(cards: &[Card]) -> Vec<String> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| format!("  {}) {}", i + 1, card))
        .collect()
}

/// Occupied slots as `#slot attack/cover` pairs; `-` marks an open attack.
pub fn format_table(table: &Table) -> String {
    let slots: Vec<String> = table
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let attacking = slot.attacking_card()?;
            let cover = slot
                .defending_card()
                .map(|c| format_card(&c))
                .unwrap_or_else(|| "-".to_string());
            Some(format!("#{} {}/{}", i + 1, format_card(&attacking), cover))
        })
        .collect();
    if slots.is_empty() {
        "(empty)".to_string()
    } else {
        slots.join("  ")
    }
}

/// One-line match outcome using player names.
pub fn format_result(result: &GameEndResult, names: &[String]) -> String {
    let name = |seat: usize| names.get(seat).map(String::as_str).unwrap_or("?");
    match result.reason {
        EndReason::HandsEmptied => match result.loser {
            Some(loser) => format!("{} is the durak", name(loser)),
            None => "draw: every hand is empty".to_string(),
        },
        EndReason::RoundLimit => format!("stopped after {} rounds without a loser", result.rounds),
        EndReason::Abandoned => "abandoned".to_string(),
    }
}
