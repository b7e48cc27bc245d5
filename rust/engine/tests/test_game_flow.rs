mod helpers;

use durak_engine::cards::{Rank, Suit};
use durak_engine::engine::{GameConfig, GameState};
use durak_engine::errors::{GameError, Rejection};
use durak_engine::logger::GameEvent;
use durak_engine::player::{EndReason, Intent};
use durak_engine::round::{Round, RoundOutcome, TransitionRule};
use helpers::{c, game_with_hands};

fn trump() -> durak_engine::cards::Card {
    c(Rank::Six, Suit::Hearts)
}

#[test]
fn weak_cover_is_rejected_then_ace_covers() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let eight = c(Rank::Eight, Suit::Clubs);
    let ace = c(Rank::Ace, Suit::Clubs);
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![nine, c(Rank::Seven, Suit::Spades)],
            vec![eight, ace, c(Rank::King, Suit::Diamonds)],
        ],
        0,
        1,
    );

    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    game.submit(1, Intent::Throw { card: eight, slot: 0 }).unwrap();
    assert_eq!(
        journals[1].borrow().rejections,
        vec![Rejection::TooWeak {
            card: eight,
            attacking: nine
        }]
    );
    assert!(!game.table().unwrap().is_all_attacking_cards_covered());
    assert!(game.player(1).unwrap().hand().contains(eight));

    game.submit(1, Intent::Throw { card: ace, slot: 0 }).unwrap();
    let slot = game.table().unwrap().slots()[0];
    assert_eq!(slot.attacking_card(), Some(nine));
    assert_eq!(slot.defending_card(), Some(ace));
    assert!(!game.player(1).unwrap().hand().contains(ace));

    // both throws were broadcast to both players
    for j in &journals {
        assert_eq!(j.borrow().throws.len(), 2);
    }
}

#[test]
fn attacker_pass_on_empty_table_does_not_finish_round() {
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![c(Rank::Nine, Suit::Clubs)],
            vec![c(Rank::Ten, Suit::Clubs)],
        ],
        0,
        1,
    );
    let status = game.submit(0, Intent::Pass).unwrap();
    assert_eq!(status.round_number, 1);
    assert!(status.awaiting_input());
    assert_eq!(
        journals[0].borrow().rejections,
        vec![Rejection::AttackerCannotPass]
    );
}

#[test]
fn throwing_a_card_not_in_hand_is_rejected() {
    let held = c(Rank::Nine, Suit::Clubs);
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![vec![held], vec![c(Rank::Ten, Suit::Clubs)]],
        0,
        1,
    );
    let foreign = c(Rank::Ace, Suit::Spades);
    game.submit(0, Intent::Throw { card: foreign, slot: 0 }).unwrap();
    assert_eq!(
        journals[0].borrow().rejections,
        vec![Rejection::CardNotInHand(foreign)]
    );
    assert_eq!(game.player(0).unwrap().hand().cards(), &[held]);
    assert!(game.table().unwrap().is_all_slots_free());
}

#[test]
fn intent_from_third_player_is_fatal() {
    let (mut game, _) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![c(Rank::Nine, Suit::Clubs)],
            vec![c(Rank::Ten, Suit::Clubs)],
            vec![c(Rank::Jack, Suit::Clubs)],
        ],
        0,
        1,
    );
    let err = game
        .submit(2, Intent::Throw {
            card: c(Rank::Jack, Suit::Clubs),
            slot: 0,
        })
        .unwrap_err();
    assert_eq!(err, GameError::NotParticipant { seat: 2 });
    assert_eq!(
        game.submit(7, Intent::Pass).unwrap_err(),
        GameError::UnknownPlayer { seat: 7 }
    );
    // the game keeps going
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn beat_off_swaps_roles_and_discards_cards() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let ten = c(Rank::Ten, Suit::Clubs);
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![nine, c(Rank::Six, Suit::Spades)],
            vec![ten, c(Rank::Seven, Suit::Spades)],
        ],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    game.submit(1, Intent::Throw { card: ten, slot: 0 }).unwrap();
    let status = game.submit(0, Intent::Pass).unwrap();

    assert_eq!(status.round, Some(Round::new(1, 0).unwrap()));
    assert_eq!(status.round_number, 2);
    assert_eq!(game.discard_pile(), &[nine, ten]);
    assert!(game.table().unwrap().is_all_slots_free());
    assert_eq!(journals[0].borrow().rounds.len(), 2);
    assert!(game.history().contains(&GameEvent::RoundFinished {
        number: 1,
        outcome: RoundOutcome::BeatOff,
        cards: vec![nine, ten],
    }));
}

#[test]
fn defender_pass_picks_up_under_standard_rule() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let (mut game, _) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![nine, c(Rank::Six, Suit::Spades)],
            vec![c(Rank::Seven, Suit::Spades)],
        ],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    let status = game.submit(1, Intent::Pass).unwrap();
    // heads-up: the attacker attacks again
    assert_eq!(status.round, Some(Round::new(0, 1).unwrap()));
    assert!(game.player(1).unwrap().hand().contains(nine));
    assert!(game.discard_pile().is_empty());
}

#[test]
fn defender_pass_discards_under_legacy_rule() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let config = GameConfig {
        transition: TransitionRule::Legacy,
        ..GameConfig::default()
    };
    let (mut game, _) = game_with_hands(
        config,
        trump(),
        vec![
            vec![nine, c(Rank::Six, Suit::Spades)],
            vec![c(Rank::Seven, Suit::Spades)],
            vec![c(Rank::Eight, Suit::Spades)],
        ],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    let status = game.submit(1, Intent::Pass).unwrap();
    assert_eq!(status.round, Some(Round::new(0, 1).unwrap()));
    assert!(!game.player(1).unwrap().hand().contains(nine));
    assert_eq!(game.discard_pile(), &[nine]);
}

#[test]
fn standard_taken_moves_attack_past_the_defender() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let (mut game, _) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![nine, c(Rank::Six, Suit::Spades)],
            vec![c(Rank::Seven, Suit::Spades)],
            vec![c(Rank::Eight, Suit::Spades)],
        ],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    let status = game.submit(1, Intent::AcceptDefeat).unwrap();
    assert_eq!(status.round, Some(Round::new(2, 0).unwrap()));
}

#[test]
fn defender_cannot_pass_when_everything_is_covered() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let ten = c(Rank::Ten, Suit::Clubs);
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![nine, c(Rank::Six, Suit::Spades)],
            vec![ten, c(Rank::Seven, Suit::Spades)],
        ],
        0,
        1,
    );
    game.submit(1, Intent::Pass).unwrap();
    game.submit(1, Intent::AcceptDefeat).unwrap();
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    game.submit(1, Intent::Throw { card: ten, slot: 0 }).unwrap();
    game.submit(1, Intent::Pass).unwrap();
    assert_eq!(
        journals[1].borrow().rejections,
        vec![
            Rejection::DefenderCannotPass,
            Rejection::NothingToAccept,
            Rejection::DefenderCannotPass
        ]
    );
    assert_eq!(game.round_number(), 1);
}

#[test]
fn emptying_a_hand_wins_the_match() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let ten = c(Rank::Ten, Suit::Clubs);
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![vec![nine], vec![ten, c(Rank::Seven, Suit::Spades)]],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    game.submit(1, Intent::Throw { card: ten, slot: 0 }).unwrap();
    let status = game.submit(0, Intent::Pass).unwrap();

    assert_eq!(status.state, GameState::Ended);
    let result = game.result().unwrap();
    assert_eq!(result.winners, vec![0]);
    assert_eq!(result.loser, Some(1));
    assert_eq!(result.reason, EndReason::HandsEmptied);
    for j in &journals {
        assert_eq!(j.borrow().ended.as_ref(), Some(result));
    }
    assert_eq!(
        game.submit(1, Intent::Pass).unwrap_err(),
        GameError::GameOver
    );
}

#[test]
fn both_hands_empty_is_a_draw() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let ten = c(Rank::Ten, Suit::Clubs);
    let (mut game, _) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![vec![nine], vec![ten]],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    game.submit(1, Intent::Throw { card: ten, slot: 0 }).unwrap();
    game.submit(0, Intent::Pass).unwrap();
    let result = game.result().unwrap();
    assert!(result.is_draw());
    assert_eq!(result.winners, vec![0, 1]);
}

#[test]
fn round_limit_ends_without_loser() {
    let nine = c(Rank::Nine, Suit::Clubs);
    let config = GameConfig {
        max_rounds: 1,
        ..GameConfig::default()
    };
    let (mut game, _) = game_with_hands(
        config,
        trump(),
        vec![
            vec![nine, c(Rank::Six, Suit::Spades)],
            vec![c(Rank::Seven, Suit::Spades)],
        ],
        0,
        1,
    );
    game.submit(0, Intent::Throw { card: nine, slot: 0 }).unwrap();
    game.submit(1, Intent::Pass).unwrap();
    let result = game.result().unwrap();
    assert_eq!(result.reason, EndReason::RoundLimit);
    assert_eq!(result.loser, None);
    assert_eq!(result.rounds, 1);
}

#[test]
fn end_match_abandons_and_refuses_further_intents() {
    let (mut game, journals) = game_with_hands(
        GameConfig::default(),
        trump(),
        vec![
            vec![c(Rank::Nine, Suit::Clubs)],
            vec![c(Rank::Ten, Suit::Clubs)],
        ],
        0,
        1,
    );
    game.end_match();
    assert_eq!(game.state(), GameState::Disposed);
    assert_eq!(
        journals[0].borrow().ended.as_ref().map(|r| r.reason),
        Some(EndReason::Abandoned)
    );
    assert_eq!(
        game.submit(0, Intent::Pass).unwrap_err(),
        GameError::Disposed
    );
    assert_eq!(game.start().unwrap_err(), GameError::Disposed);
    // idempotent
    game.end_match();
    assert_eq!(game.state(), GameState::Disposed);
}

#[test]
fn scripted_players_answer_through_notifications() {
    use durak_engine::engine::{Deal, Game};
    use durak_engine::player::Player;
    use helpers::Puppet;

    let nine = c(Rank::Nine, Suit::Clubs);
    let ten = c(Rank::Ten, Suit::Clubs);
    let (attacker, aj) = Puppet::scripted(
        "attacker",
        [Intent::Throw { card: nine, slot: 0 }, Intent::Pass],
    );
    let (defender, _) = Puppet::scripted("defender", [Intent::Throw { card: ten, slot: 0 }]);
    let players: Vec<Box<dyn Player>> = vec![Box::new(attacker), Box::new(defender)];
    let mut game = Game::new(players, GameConfig::default()).unwrap();
    let status = game
        .start_with(Deal {
            trump: trump(),
            hands: vec![vec![nine], vec![ten, c(Rank::Ace, Suit::Spades)]],
            attacker: 0,
            defender: 1,
        })
        .unwrap();

    // throw, cover and pass all happen inside start_with
    assert_eq!(status.state, GameState::Ended);
    assert_eq!(game.result().unwrap().loser, Some(1));
    assert_eq!(aj.borrow().throws.len(), 2);
    assert_eq!(aj.borrow().start.as_ref().map(|s| s.seat), Some(0));
}
