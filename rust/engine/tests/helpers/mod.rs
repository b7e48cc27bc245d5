#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use durak_engine::cards::{Card, Rank, Suit};
use durak_engine::engine::{Deal, Game, GameConfig};
use durak_engine::errors::Rejection;
use durak_engine::player::{
    GameEndResult, GameStart, Hand, Intent, Player, Throw, TurnContext,
};
use durak_engine::round::Round;

/// What a puppet saw during the match.
#[derive(Debug, Default)]
pub struct Journal {
    pub start: Option<GameStart>,
    pub rounds: Vec<Round>,
    pub throws: Vec<Throw>,
    pub rejections: Vec<Rejection>,
    pub ended: Option<GameEndResult>,
}

pub type SharedJournal = Rc<RefCell<Journal>>;

/// Player that records notifications and answers from a script: each
/// notification that leaves it able to act pops the next scripted intent.
#[derive(Debug)]
pub struct Puppet {
    name: String,
    hand: Hand,
    journal: SharedJournal,
    script: VecDeque<Intent>,
}

impl Puppet {
    pub fn new(name: &str) -> (Self, SharedJournal) {
        Self::scripted(name, std::iter::empty())
    }

    pub fn scripted(name: &str, script: impl IntoIterator<Item = Intent>) -> (Self, SharedJournal) {
        let journal = SharedJournal::default();
        let puppet = Self {
            name: name.to_string(),
            hand: Hand::new(),
            journal: journal.clone(),
            script: script.into_iter().collect(),
        };
        (puppet, journal)
    }

    fn act(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        if ctx.attacker_to_move() || ctx.slot_to_cover().is_some() {
            self.script.pop_front()
        } else {
            None
        }
    }
}

impl Player for Puppet {
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
        self.journal.borrow_mut().start = Some(start.clone());
    }

    fn on_next_round(&mut self, ctx: &TurnContext<'_>) -> Option<Intent> {
        self.journal.borrow_mut().rounds.push(ctx.round);
        self.act(ctx)
    }

    fn on_card_thrown(&mut self, throw: &Throw, ctx: &TurnContext<'_>) -> Option<Intent> {
        self.journal.borrow_mut().throws.push(*throw);
        self.act(ctx)
    }

    fn on_intent_rejected(&mut self, rejection: &Rejection, _ctx: &TurnContext<'_>) -> Option<Intent> {
        self.journal.borrow_mut().rejections.push(rejection.clone());
        None
    }

    fn on_game_ended(&mut self, result: &GameEndResult) {
        self.journal.borrow_mut().ended = Some(result.clone());
    }
}

pub fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// Passive puppets, one per hand, started from an explicit deal.
pub fn game_with_hands(
    config: GameConfig,
    trump: Card,
    hands: Vec<Vec<Card>>,
    attacker: usize,
    defender: usize,
) -> (Game<'static>, Vec<SharedJournal>) {
    let mut players: Vec<Box<dyn Player>> = Vec::new();
    let mut journals = Vec::new();
    for i in 0..hands.len() {
        let (p, j) = Puppet::new(&format!("p{}", i));
        players.push(Box::new(p));
        journals.push(j);
    }
    let mut game = Game::new(players, config).expect("valid game");
    game.start_with(Deal {
        trump,
        hands,
        attacker,
        defender,
    })
    .expect("deal accepted");
    (game, journals)
}
