use std::collections::{HashSet, VecDeque};
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{Card, DECK_SIZE};
use crate::deck::Deck;
use crate::errors::{GameError, Rejection};
use crate::logger::GameEvent;
use crate::player::{
    EndReason, GameEndResult, GameStart, Intent, Player, PlayerId, Throw, TurnContext,
};
use crate::round::{next_round, next_seat, Role, Round, RoundOutcome, TransitionRule};
use crate::rules::Judge;
use crate::table::{Table, DEFAULT_SLOTS};

/// Cards dealt to each player at setup.
pub const DEFAULT_HAND_SIZE: usize = 6;

/// Round cap guarding against matches that never converge.
pub const DEFAULT_MAX_ROUNDS: u32 = 500;

/// Salt mixed into the seed for choosing the first attacker, so that seat
/// selection does not replay the deck shuffle stream.
const SEATING_SALT: u64 = 0x5EA7_1u64;

/// Tunables of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub slots: usize,
    pub hand_size: usize,
    pub transition: TransitionRule,
    pub max_rounds: u32,
    /// Deck and seating seed; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS,
            hand_size: DEFAULT_HAND_SIZE,
            transition: TransitionRule::Standard,
            max_rounds: DEFAULT_MAX_ROUNDS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self, players: usize) -> Result<(), GameError> {
        if self.slots == 0 {
            return Err(GameError::InvalidConfig("slots must be >= 1".into()));
        }
        if self.slots > DECK_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "slots must be <= {}",
                DECK_SIZE
            )));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand_size must be >= 1".into()));
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig("max_rounds must be >= 1".into()));
        }
        // every hand plus the trump card must fit in the deck
        let needed = players.saturating_mul(self.hand_size).saturating_add(1);
        if needed > DECK_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "{} players x {} cards plus trump exceed the {}-card deck",
                players, self.hand_size, DECK_SIZE
            )));
        }
        Ok(())
    }
}

/// Initial distribution of cards and roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub trump: Card,
    /// One hand per seat
    pub hands: Vec<Vec<Card>>,
    pub attacker: PlayerId,
    pub defender: PlayerId,
}

impl Deal {
    /// Shuffles a fresh deck with `seed`, draws the trump, deals `hand_size`
    /// cards to each seat in turn and picks a random attacker and a different
    /// random defender.
    pub fn from_seed(seed: u64, players: usize, hand_size: usize) -> Result<Self, GameError> {
        if players < 2 {
            return Err(GameError::NotEnoughPlayers { count: players });
        }
        let mut deck = Deck::shuffled(seed);
        let trump = deck.draw_trump()?;
        let hands = deck.deal_hands(players, hand_size)?;

        let mut rng = ChaCha20Rng::seed_from_u64(seed ^ SEATING_SALT);
        let attacker = rng.random_range(0..players);
        let mut defender = rng.random_range(0..players - 1);
        if defender >= attacker {
            defender += 1;
        }
        Ok(Self {
            trump,
            hands,
            attacker,
            defender,
        })
    }

    pub fn validate(&self, players: usize) -> Result<(), GameError> {
        if self.hands.len() != players {
            return Err(GameError::InvalidDeal(format!(
                "{} hands for {} players",
                self.hands.len(),
                players
            )));
        }
        if self.attacker >= players || self.defender >= players {
            return Err(GameError::InvalidDeal("role seat out of range".into()));
        }
        if let Some(seat) = self.hands.iter().position(Vec::is_empty) {
            return Err(GameError::InvalidDeal(format!("seat {} has no cards", seat)));
        }
        let mut seen = HashSet::new();
        seen.insert(self.trump);
        for card in self.hands.iter().flatten() {
            if !seen.insert(*card) {
                return Err(GameError::InvalidDeal(format!("{} dealt twice", card)));
            }
        }
        Ok(())
    }
}

/// Lifecycle of a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Constructed, not started
    Idle,
    /// Rounds in progress
    Playing,
    /// A terminal condition was reached
    Ended,
    /// Torn down with [`Game::end_match`]
    Disposed,
}

/// Snapshot returned after the game has processed every queued intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatus {
    pub state: GameState,
    pub round: Option<Round>,
    pub round_number: u32,
}

impl GameStatus {
    /// Still playing but nobody has anything queued: waiting for an outside
    /// [`Game::submit`].
    pub fn awaiting_input(&self) -> bool {
        self.state == GameState::Playing
    }
}

/// Per-match state that only exists once the game has started.
#[derive(Debug)]
struct Session {
    table: Table,
    judge: Judge,
    round: Round,
    round_number: u32,
    discard: Vec<Card>,
}

impl Session {
    fn context(&self, seat: PlayerId) -> TurnContext<'_> {
        TurnContext {
            seat,
            round: self.round,
            round_number: self.round_number,
            table: &self.table,
            judge: &self.judge,
        }
    }
}

enum Verdict {
    Applied,
    Rejected(Rejection),
}

/// Mediator between players, table and judge.
///
/// Players never touch the table; they return [`Intent`]s from their
/// notifications, which the game queues and dispatches one at a time on the
/// calling thread until nothing is left to do.
///
/// # Examples
///
/// ```
/// use durak_engine::cards::{Card, Rank, Suit};
/// use durak_engine::engine::{Deal, Game, GameConfig};
/// use durak_engine::player::{GameEndResult, Hand, Intent, Player, Throw, TurnContext};
///
/// struct Idle { name: String, hand: Hand }
///
/// impl Player for Idle {
///     fn name(&self) -> &str { &self.name }
///     fn hand(&self) -> &Hand { &self.hand }
///     fn hand_mut(&mut self) -> &mut Hand { &mut self.hand }
///     fn on_next_round(&mut self, _: &TurnContext<'_>) -> Option<Intent> { None }
///     fn on_card_thrown(&mut self, _: &Throw, _: &TurnContext<'_>) -> Option<Intent> { None }
///     fn on_game_ended(&mut self, _: &GameEndResult) {}
/// }
///
/// let players: Vec<Box<dyn Player>> = vec![
///     Box::new(Idle { name: "a".into(), hand: Hand::new() }),
///     Box::new(Idle { name: "b".into(), hand: Hand::new() }),
/// ];
/// let mut game = Game::new(players, GameConfig::default()).unwrap();
///
/// let nine = Card::new(Rank::Nine, Suit::Clubs);
/// let ace = Card::new(Rank::Ace, Suit::Clubs);
/// game.start_with(Deal {
///     trump: Card::new(Rank::Six, Suit::Hearts),
///     hands: vec![vec![nine], vec![ace]],
///     attacker: 0,
///     defender: 1,
/// })
/// .unwrap();
///
/// game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
/// game.submit(1, Intent::Throw { card: ace, slot: 0 }).unwrap();
/// assert!(game.table().unwrap().is_all_attacking_cards_covered());
/// ```
pub struct Game<'a> {
    players: Vec<Box<dyn Player + 'a>>,
    config: GameConfig,
    state: GameState,
    seed: Option<u64>,
    session: Option<Session>,
    pending: VecDeque<(PlayerId, Intent)>,
    history: Vec<GameEvent>,
    result: Option<GameEndResult>,
}

impl fmt::Debug for Game<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field(
                "players",
                &self.players.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .field("state", &self.state)
            .field("session", &self.session)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<'a> Game<'a> {
    pub fn new(players: Vec<Box<dyn Player + 'a>>, config: GameConfig) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers {
                count: players.len(),
            });
        }
        config.validate(players.len())?;
        Ok(Self {
            players,
            config,
            state: GameState::Idle,
            seed: None,
            session: None,
            pending: VecDeque::new(),
            history: Vec::new(),
            result: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    /// Seed used by [`Game::start`]; `None` for explicit deals.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn trump(&self) -> Option<Card> {
        self.session.as_ref().map(|s| s.judge.trump())
    }

    pub fn judge(&self) -> Option<&Judge> {
        self.session.as_ref().map(|s| &s.judge)
    }

    pub fn table(&self) -> Option<&Table> {
        self.session.as_ref().map(|s| &s.table)
    }

    pub fn round(&self) -> Option<Round> {
        self.session.as_ref().map(|s| s.round)
    }

    pub fn round_number(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.round_number)
    }

    /// Beaten cards (and, under the legacy rule, cards nobody picked up).
    pub fn discard_pile(&self) -> &[Card] {
        self.session
            .as_ref()
            .map(|s| s.discard.as_slice())
            .unwrap_or(&[])
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, seat: PlayerId) -> Option<&(dyn Player + 'a)> {
        self.players.get(seat).map(|p| p.as_ref())
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    pub fn result(&self) -> Option<&GameEndResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            state: self.state,
            round: self.round(),
            round_number: self.round_number(),
        }
    }

    /// Seat following `seat` in table order.
    pub fn next_for(&self, seat: PlayerId) -> Result<PlayerId, GameError> {
        if seat >= self.players.len() {
            return Err(GameError::UnknownPlayer { seat });
        }
        Ok(next_seat(seat, self.players.len()))
    }

    /// Deals from a shuffled deck and runs until input is needed or the game ends.
    pub fn start(&mut self) -> Result<GameStatus, GameError> {
        self.ensure_idle()?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let deal = Deal::from_seed(seed, self.players.len(), self.config.hand_size)?;
        self.begin(deal, Some(seed))
    }

    /// Starts from an explicit deal instead of a shuffled deck.
    pub fn start_with(&mut self, deal: Deal) -> Result<GameStatus, GameError> {
        self.ensure_idle()?;
        self.begin(deal, None)
    }

    /// Queues an intent on behalf of `seat` and processes the queue.
    pub fn submit(&mut self, seat: PlayerId, intent: Intent) -> Result<GameStatus, GameError> {
        self.ensure_playing()?;
        if seat >= self.players.len() {
            return Err(GameError::UnknownPlayer { seat });
        }
        self.pending.push_back((seat, intent));
        self.pump()
    }

    /// Tears the match down. A match still in progress ends as abandoned;
    /// afterwards every intent is refused with [`GameError::Disposed`].
    pub fn end_match(&mut self) {
        if self.state == GameState::Playing {
            self.finish_game(EndReason::Abandoned);
        }
        self.pending.clear();
        if self.state != GameState::Disposed {
            debug!("match disposed");
        }
        self.state = GameState::Disposed;
    }

    fn ensure_idle(&self) -> Result<(), GameError> {
        match self.state {
            GameState::Idle => Ok(()),
            GameState::Disposed => Err(GameError::Disposed),
            GameState::Playing | GameState::Ended => Err(GameError::AlreadyStarted),
        }
    }

    fn ensure_playing(&self) -> Result<(), GameError> {
        match self.state {
            GameState::Playing => Ok(()),
            GameState::Idle => Err(GameError::NotStarted),
            GameState::Ended => Err(GameError::GameOver),
            GameState::Disposed => Err(GameError::Disposed),
        }
    }

    fn begin(&mut self, deal: Deal, seed: Option<u64>) -> Result<GameStatus, GameError> {
        deal.validate(self.players.len())?;
        let first = Round::new(deal.attacker, deal.defender)?;
        if let Some(seat) = self.players.iter().position(|p| !p.hand().is_empty()) {
            return Err(GameError::InvalidDeal(format!(
                "seat {} already holds cards",
                seat
            )));
        }

        for (player, hand) in self.players.iter_mut().zip(&deal.hands) {
            for &card in hand {
                player.add_card(card);
            }
        }

        self.seed = seed;
        self.state = GameState::Playing;
        self.session = Some(Session {
            table: Table::new(self.config.slots),
            judge: Judge::new(deal.trump),
            round: first,
            round_number: 0,
            discard: Vec::new(),
        });

        let names: Vec<String> = self.players.iter().map(|p| p.name().to_string()).collect();
        info!(trump = %deal.trump, players = ?names, "game started");
        self.history.push(GameEvent::Started {
            seed,
            trump: deal.trump,
            players: names.clone(),
            rule: self.config.transition,
        });
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.on_game_started(&GameStart {
                seat,
                trump: deal.trump,
                players: names.clone(),
                slots: self.config.slots,
            });
        }

        self.enter_round(first)?;
        self.pump()
    }

    fn pump(&mut self) -> Result<GameStatus, GameError> {
        while self.state == GameState::Playing {
            let Some((seat, intent)) = self.pending.pop_front() else {
                break;
            };
            if let Err(e) = self.dispatch(seat, intent) {
                warn!(seat, ?intent, error = %e, "intent aborted");
                self.pending.clear();
                return Err(e);
            }
        }
        Ok(self.status())
    }

    fn dispatch(&mut self, seat: PlayerId, intent: Intent) -> Result<(), GameError> {
        let player = self
            .players
            .get(seat)
            .ok_or(GameError::UnknownPlayer { seat })?;
        let session = self.session.as_ref().ok_or(GameError::NotStarted)?;
        let role = session
            .round
            .role_of(seat)
            .ok_or(GameError::NotParticipant { seat })?;
        debug!(player = player.name(), ?role, ?intent, "intent received");

        let verdict = match intent {
            Intent::Throw { card, slot } => self.apply_throw(seat, role, card, slot)?,
            Intent::Pass => self.apply_pass(role)?,
            Intent::AcceptDefeat => self.apply_accept_defeat(role)?,
        };

        if let Verdict::Rejected(reason) = verdict {
            debug!(seat, ?intent, %reason, "intent rejected");
            self.history.push(GameEvent::IntentRejected {
                seat,
                intent,
                reason: reason.clone(),
            });
            let session = self.session.as_ref().ok_or(GameError::NotStarted)?;
            let ctx = session.context(seat);
            if let Some(retry) = self.players[seat].on_intent_rejected(&reason, &ctx) {
                self.pending.push_back((seat, retry));
            }
        }
        Ok(())
    }

    fn apply_throw(
        &mut self,
        seat: PlayerId,
        role: Role,
        card: Card,
        slot: usize,
    ) -> Result<Verdict, GameError> {
        if !self.players[seat].hand().contains(card) {
            return Ok(Verdict::Rejected(Rejection::CardNotInHand(card)));
        }
        let session = self.session.as_mut().ok_or(GameError::NotStarted)?;
        let placed = match role {
            Role::Attacker => session.table.attack(card, slot),
            Role::Defender => session.table.defend(card, slot, &session.judge),
        };
        if let Err(reason) = placed {
            return Ok(Verdict::Rejected(reason));
        }
        self.players[seat].remove_card(card)?;
        debug!(seat, %card, slot, "throw succeeded");
        self.history.push(GameEvent::CardThrown { seat, card, slot });

        let throw = Throw {
            thrower: seat,
            role,
            card,
            slot,
        };
        let session = self.session.as_ref().ok_or(GameError::NotStarted)?;
        for (seat, player) in self.players.iter_mut().enumerate() {
            let ctx = session.context(seat);
            if let Some(intent) = player.on_card_thrown(&throw, &ctx) {
                self.pending.push_back((seat, intent));
            }
        }
        Ok(Verdict::Applied)
    }

    fn apply_pass(&mut self, role: Role) -> Result<Verdict, GameError> {
        let table = &self.session.as_ref().ok_or(GameError::NotStarted)?.table;
        let covered = table.is_all_attacking_cards_covered();
        let empty = table.is_all_slots_free();
        match role {
            Role::Attacker if covered && !empty => self.finish_round(RoundOutcome::BeatOff),
            Role::Attacker => Ok(Verdict::Rejected(Rejection::AttackerCannotPass)),
            Role::Defender if !covered && !empty => self.finish_round(RoundOutcome::Taken),
            Role::Defender => Ok(Verdict::Rejected(Rejection::DefenderCannotPass)),
        }
    }

    fn apply_accept_defeat(&mut self, role: Role) -> Result<Verdict, GameError> {
        let table = &self.session.as_ref().ok_or(GameError::NotStarted)?.table;
        if role == Role::Defender && !table.is_all_slots_free() {
            self.finish_round(RoundOutcome::Taken)
        } else {
            Ok(Verdict::Rejected(Rejection::NothingToAccept))
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome) -> Result<Verdict, GameError> {
        let rule = self.config.transition;
        let session = self.session.as_mut().ok_or(GameError::NotStarted)?;
        let prev = session.round;
        let number = session.round_number;
        let cards = session.table.clear();
        if outcome == RoundOutcome::Taken && rule.defender_picks_up() {
            let defender = &mut self.players[prev.defender()];
            for &card in &cards {
                defender.add_card(card);
            }
        } else {
            session.discard.extend_from_slice(&cards);
        }
        info!(round = number, ?outcome, cards = cards.len(), "round finished");
        self.history.push(GameEvent::RoundFinished {
            number,
            outcome,
            cards,
        });

        let still_holding = self
            .players
            .iter()
            .filter(|p| !p.hand().is_empty())
            .count();
        if still_holding <= 1 {
            self.finish_game(EndReason::HandsEmptied);
            return Ok(Verdict::Applied);
        }
        if number >= self.config.max_rounds {
            self.finish_game(EndReason::RoundLimit);
            return Ok(Verdict::Applied);
        }

        let players = &self.players;
        let next = next_round(rule, prev, outcome, players.len(), |s| {
            !players[s].hand().is_empty()
        });
        match next {
            Some(round) => self.enter_round(round)?,
            None => self.finish_game(EndReason::HandsEmptied),
        }
        Ok(Verdict::Applied)
    }

    fn enter_round(&mut self, round: Round) -> Result<(), GameError> {
        let session = self.session.as_mut().ok_or(GameError::NotStarted)?;
        session.round = round;
        session.round_number += 1;
        let number = session.round_number;
        info!(
            round = number,
            attacker = self.players[round.attacker()].name(),
            defender = self.players[round.defender()].name(),
            "round started"
        );
        self.history.push(GameEvent::RoundStarted { number, round });

        let session = self.session.as_ref().ok_or(GameError::NotStarted)?;
        for (seat, player) in self.players.iter_mut().enumerate() {
            let ctx = session.context(seat);
            if let Some(intent) = player.on_next_round(&ctx) {
                self.pending.push_back((seat, intent));
            }
        }
        Ok(())
    }

    fn finish_game(&mut self, reason: EndReason) {
        let holding: Vec<PlayerId> = (0..self.players.len())
            .filter(|&s| !self.players[s].hand().is_empty())
            .collect();
        let (winners, loser) = match reason {
            EndReason::HandsEmptied => {
                let winners = (0..self.players.len())
                    .filter(|s| !holding.contains(s))
                    .collect();
                let loser = match holding.as_slice() {
                    [only] => Some(*only),
                    _ => None,
                };
                (winners, loser)
            }
            EndReason::RoundLimit | EndReason::Abandoned => (Vec::new(), None),
        };
        let result = GameEndResult {
            winners,
            loser,
            reason,
            rounds: self.round_number(),
        };
        info!(?result, "game ended");

        self.state = GameState::Ended;
        self.pending.clear();
        self.history.push(GameEvent::GameEnded {
            result: result.clone(),
        });
        for player in self.players.iter_mut() {
            player.on_game_ended(&result);
        }
        self.result = Some(result);
    }
}
