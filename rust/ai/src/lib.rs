//! # durak-ai: Computer Opponents for Durak
//!
//! Bot players that plug into the engine through the
//! [`Player`](durak_engine::player::Player) trait. Every bot owns a seeded
//! RNG, so a match between bots replays exactly for a given seed.
//!
//! ## Core Components
//!
//! - [`DefenceStrategy`] - How a bot answers an attacking card
//! - [`defence`] - The built-in strategies
//! - [`bot`] - [`BotPlayer`](bot::BotPlayer), the player wrapping a strategy
//! - [`create_bot`] - Factory selecting a strategy by name
//!
//! ## Quick Start
//!
//! ```rust
//! use durak_ai::create_bot;
//! use durak_engine::engine::{Game, GameConfig, GameState};
//! use durak_engine::player::Player;
//!
//! let players: Vec<Box<dyn Player>> = vec![
//!     Box::new(create_bot("cover", "alice", 1).unwrap()),
//!     Box::new(create_bot("random", "bob", 2).unwrap()),
//! ];
//! let config = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut game = Game::new(players, config).unwrap();
//!
//! // bots answer every notification, so the whole match runs inside start()
//! let status = game.start().unwrap();
//! assert_eq!(status.state, GameState::Ended);
//! ```
//!
//! ## Strategies
//!
//! - `"random"` - never covers; passes and takes the cards
//! - `"cover"` - covers with the weakest card that beats the attack

use durak_engine::cards::Card;
use durak_engine::player::Hand;
use durak_engine::rules::Judge;
use thiserror::Error;

pub mod bot;
pub mod defence;

pub use bot::BotPlayer;

/// Names accepted by [`create_bot`].
pub const STRATEGIES: [&str; 2] = ["random", "cover"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown bot strategy '{0}' (expected one of: random, cover)")]
    UnknownStrategy(String),
}

/// Decides which card, if any, a defending bot puts on an attacking card.
///
/// # Example Implementation
///
/// ```rust
/// use durak_ai::DefenceStrategy;
/// use durak_engine::cards::Card;
/// use durak_engine::player::Hand;
/// use durak_engine::rules::Judge;
///
/// struct FirstThatBeats;
///
/// impl DefenceStrategy for FirstThatBeats {
///     fn choose_cover(&self, hand: &Hand, attacking: Card, judge: &Judge) -> Option<Card> {
///         hand.cards().iter().copied().find(|&c| judge.beats(c, attacking))
///     }
///
///     fn name(&self) -> &str {
///         "first"
///     }
/// }
/// ```
pub trait DefenceStrategy: Send + Sync {
    /// Card to cover `attacking` with; `None` gives up the round.
    fn choose_cover(&self, hand: &Hand, attacking: Card, judge: &Judge) -> Option<Card>;

    fn name(&self) -> &str;
}

/// Builds a bot by strategy name.
///
/// # Errors
///
/// [`AiError::UnknownStrategy`] for names outside [`STRATEGIES`].
///
/// # Example
///
/// ```rust
/// use durak_ai::{create_bot, AiError};
///
/// let bot = create_bot("cover", "bot-1", 7).unwrap();
/// assert_eq!(bot.strategy(), "cover");
/// assert!(matches!(create_bot("smart", "bot-2", 7), Err(AiError::UnknownStrategy(_))));
/// ```
pub fn create_bot(kind: &str, name: &str, seed: u64) -> Result<BotPlayer, AiError> {
    let strategy: Box<dyn DefenceStrategy> = match kind.trim().to_ascii_lowercase().as_str() {
        "random" => Box::new(defence::AlwaysTake),
        "cover" => Box::new(defence::CheapestCover),
        _ => return Err(AiError::UnknownStrategy(kind.to_string())),
    };
    Ok(BotPlayer::new(name, seed, strategy))
}
