mod helpers;

use std::collections::HashSet;

use durak_engine::cards::{Card, Rank, Suit};
use durak_engine::engine::{Deal, Game, GameConfig, GameState};
use durak_engine::errors::GameError;
use durak_engine::player::Player;
use helpers::{c, Puppet};

fn puppets(n: usize) -> Vec<Box<dyn Player>> {
    (0..n)
        .map(|i| Box::new(Puppet::new(&format!("p{}", i)).0) as Box<dyn Player>)
        .collect()
}

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

#[test]
fn fewer_than_two_players_is_refused() {
    let err = Game::new(puppets(1), GameConfig::default()).unwrap_err();
    assert_eq!(err, GameError::NotEnoughPlayers { count: 1 });
}

#[test]
fn hands_that_do_not_fit_the_deck_are_refused() {
    // 6 x 6 + trump = 37 > 36
    let err = Game::new(puppets(6), GameConfig::default()).unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
    assert!(Game::new(puppets(5), GameConfig::default()).is_ok());

    let zero_slots = GameConfig {
        slots: 0,
        ..GameConfig::default()
    };
    assert!(matches!(
        Game::new(puppets(2), zero_slots),
        Err(GameError::InvalidConfig(_))
    ));
}

#[test]
fn oversized_configs_are_refused_before_allocating() {
    let huge_table = GameConfig {
        slots: usize::MAX,
        ..GameConfig::default()
    };
    assert!(matches!(
        Game::new(puppets(2), huge_table),
        Err(GameError::InvalidConfig(_))
    ));
    assert!(matches!(
        GameConfig::default().validate(usize::MAX),
        Err(GameError::InvalidConfig(_))
    ));
    assert!(Deal::from_seed(1, usize::MAX, 6).is_err());
}

#[test]
fn players_already_holding_cards_cannot_start() {
    let (mut holder, _) = Puppet::new("p0");
    holder.add_card(c(Rank::Ace, Suit::Spades));
    let players: Vec<Box<dyn Player>> = vec![Box::new(holder), Box::new(Puppet::new("p1").0)];
    let mut game = Game::new(players, seeded(3)).unwrap();
    assert!(matches!(game.start(), Err(GameError::InvalidDeal(_))));
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.player(0).unwrap().hand().len(), 1);
}

#[test]
fn seeded_start_deals_six_cards_each_and_keeps_trump_out() {
    let mut game = Game::new(puppets(3), seeded(42)).unwrap();
    let status = game.start().unwrap();
    assert_eq!(status.state, GameState::Playing);
    assert_eq!(status.round_number, 1);
    assert_eq!(game.seed(), Some(42));

    let trump = game.trump().unwrap();
    let mut seen = HashSet::new();
    for seat in 0..3 {
        let hand = game.player(seat).unwrap().hand();
        assert_eq!(hand.len(), 6);
        assert!(!hand.contains(trump));
        for &card in hand.cards() {
            assert!(seen.insert(card), "{} dealt twice", card);
        }
    }
    let round = status.round.unwrap();
    assert_ne!(round.attacker(), round.defender());
}

#[test]
fn same_seed_same_deal() {
    let mut a = Game::new(puppets(2), seeded(7)).unwrap();
    let mut b = Game::new(puppets(2), seeded(7)).unwrap();
    a.start().unwrap();
    b.start().unwrap();
    assert_eq!(a.trump(), b.trump());
    assert_eq!(a.round(), b.round());
    for seat in 0..2 {
        assert_eq!(
            a.player(seat).unwrap().hand().cards(),
            b.player(seat).unwrap().hand().cards()
        );
    }
}

#[test]
fn deal_from_seed_matches_game_start() {
    let deal = Deal::from_seed(99, 2, 6).unwrap();
    let mut game = Game::new(puppets(2), seeded(99)).unwrap();
    game.start().unwrap();
    assert_eq!(game.trump(), Some(deal.trump));
    assert_eq!(game.player(1).unwrap().hand().cards(), deal.hands[1].as_slice());
    assert_eq!(game.round().map(|r| r.attacker()), Some(deal.attacker));
}

#[test]
fn starting_twice_is_refused() {
    let mut game = Game::new(puppets(2), seeded(1)).unwrap();
    game.start().unwrap();
    assert_eq!(game.start().unwrap_err(), GameError::AlreadyStarted);
}

#[test]
fn submit_before_start_is_refused() {
    let mut game = Game::new(puppets(2), GameConfig::default()).unwrap();
    assert_eq!(
        game.submit(0, durak_engine::player::Intent::Pass).unwrap_err(),
        GameError::NotStarted
    );
    assert!(game.table().is_none());
    assert_eq!(game.round_number(), 0);
}

#[test]
fn next_for_wraps_around_the_table() {
    let game = Game::new(puppets(3), GameConfig::default()).unwrap();
    assert_eq!(game.next_for(0), Ok(1));
    assert_eq!(game.next_for(2), Ok(0));
    assert_eq!(game.next_for(3), Err(GameError::UnknownPlayer { seat: 3 }));
}

fn explicit(hands: Vec<Vec<Card>>, attacker: usize, defender: usize) -> Deal {
    Deal {
        trump: c(Rank::Six, Suit::Hearts),
        hands,
        attacker,
        defender,
    }
}

#[test]
fn malformed_deals_are_refused() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let ten = c(Rank::Ten, Suit::Clubs);

    let cases = [
        explicit(vec![vec![nine]], 0, 1),
        explicit(vec![vec![nine], vec![ten]], 0, 2),
        explicit(vec![vec![nine], vec![]], 0, 1),
        explicit(vec![vec![nine], vec![nine]], 0, 1),
        explicit(vec![vec![nine], vec![c(Rank::Six, Suit::Hearts)]], 0, 1),
    ];
    for deal in cases {
        let mut game = Game::new(puppets(2), GameConfig::default()).unwrap();
        assert!(
            matches!(game.start_with(deal.clone()), Err(GameError::InvalidDeal(_))),
            "{:?} accepted",
            deal
        );
        assert_eq!(game.state(), GameState::Idle);
    }

    let mut game = Game::new(puppets(2), GameConfig::default()).unwrap();
    assert_eq!(
        game.start_with(explicit(vec![vec![nine], vec![ten]], 1, 1)),
        Err(GameError::SameAttackerAndDefender { seat: 1 })
    );
}

#[test]
fn every_player_learns_its_seat_and_the_trump() {
    let (a, ja) = Puppet::new("north");
    let (b, jb) = Puppet::new("south");
    let players: Vec<Box<dyn Player>> = vec![Box::new(a), Box::new(b)];
    let mut game = Game::new(players, seeded(5)).unwrap();
    game.start().unwrap();

    let trump = game.trump().unwrap();
    for (seat, journal) in [ja, jb].iter().enumerate() {
        let journal = journal.borrow();
        let start = journal.start.as_ref().unwrap();
        assert_eq!(start.seat, seat);
        assert_eq!(start.trump, trump);
        assert_eq!(start.players, vec!["north", "south"]);
        assert_eq!(start.slots, 6);
        assert_eq!(journal.rounds.len(), 1);
    }
}
