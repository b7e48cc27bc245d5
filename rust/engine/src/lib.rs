//! # durak-engine: Durak Card Game Engine Core
//!
//! A deterministic engine for the Russian card game Durak ("fool").
//! Provides the card model, trump-aware card comparison, table slots,
//! the player notification protocol and the round/turn mediator, with a
//! seeded RNG so that every deal can be reproduced.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the 36-card deck
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`rules`] - The trump [`Judge`](rules::Judge)
//! - [`table`] - Table slots and placement legality
//! - [`player`] - Hands, intents and the [`Player`](player::Player) capability trait
//! - [`round`] - Attacker/defender assignment and transition rules
//! - [`engine`] - The [`Game`](engine::Game) mediator driving rounds
//! - [`logger`] - Game events and JSONL event logging
//! - [`errors`] - Fatal errors and gameplay rejections
//!
//! ## Quick Start
//!
//! ```rust
//! use durak_engine::cards::{Card, Rank, Suit};
//! use durak_engine::rules::Judge;
//! use durak_engine::table::Table;
//!
//! let judge = Judge::new(Card::new(Rank::Six, Suit::Spades));
//! let mut table = Table::default();
//!
//! assert!(table.try_set_attacking_card(Card::new(Rank::Nine, Suit::Clubs), 0));
//! assert!(!table.try_set_defending_card(Card::new(Rank::Eight, Suit::Clubs), 0, &judge));
//! assert!(table.try_set_defending_card(Card::new(Rank::Ace, Suit::Clubs), 0, &judge));
//! assert!(table.is_all_attacking_cards_covered());
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use durak_engine::engine::Deal;
//!
//! // Same seed produces the same trump, hands and first attacker
//! let a = Deal::from_seed(42, 2, 6).unwrap();
//! let b = Deal::from_seed(42, 2, 6).unwrap();
//! assert_eq!(a, b);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod logger;
pub mod player;
pub mod round;
pub mod rules;
pub mod table;
