use std::io::Cursor;

use durak_ai::create_bot;
use durak_cli::console::ConsolePlayer;
use durak_engine::cards::{Card, Rank, Suit};
use durak_engine::engine::{Deal, Game, GameConfig, GameState, GameStatus};
use durak_engine::player::Player;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

/// Console in seat 0, cheapest-cover bot in seat 1, console attacks first.
fn play(input: &str, hands: Vec<Vec<Card>>) -> (GameStatus, String) {
    let mut stdin = Cursor::new(input.to_string());
    let mut out = Vec::new();
    let status = {
        let console = ConsolePlayer::new("You", &mut stdin, &mut out);
        let bot = create_bot("cover", "Bot", 1).unwrap();
        let players: Vec<Box<dyn Player + '_>> = vec![Box::new(console), Box::new(bot)];
        let mut game = Game::new(players, GameConfig::default()).unwrap();
        game.start_with(Deal {
            trump: c(Rank::Six, Suit::Hearts),
            hands,
            attacker: 0,
            defender: 1,
        })
        .unwrap()
    };
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn attack_cover_pass_then_defend() {
    let (status, out) = play(
        "1\n0\n",
        vec![
            vec![c(Rank::Nine, Suit::Clubs), c(Rank::Six, Suit::Spades)],
            vec![c(Rank::Ten, Suit::Clubs), c(Rank::Seven, Suit::Spades)],
        ],
    );
    assert!(out.contains("Trump: Six of Hearts"));
    assert!(out.contains("Round 1\nRound started\nAttacker: You\nDefender: Bot\n"));
    assert!(out.contains("  1) Nine of Clubs"));
    assert!(out.contains("Attack (0 = pass, 1-2 choose card): "));
    assert!(out.contains("You threw Nine of Clubs to slot 1"));
    assert!(out.contains("Bot threw Ten of Clubs to slot 1"));
    assert!(out.contains("Round 2\nRound started\nAttacker: Bot\nDefender: You\n"));
    assert!(out.contains("Defend (0 = take, 1-1 choose card): "));
    // input ran out while defending
    assert_eq!(status.state, GameState::Playing);
    assert_eq!(status.round_number, 2);
}

#[test]
fn rejection_is_shown_and_prompt_repeats() {
    let (_, out) = play(
        "0\nq\n",
        vec![
            vec![c(Rank::Nine, Suit::Clubs)],
            vec![c(Rank::Ten, Suit::Clubs)],
        ],
    );
    assert!(out.contains("Rejected: Attacker can only pass once every attacking card is covered"));
    assert_eq!(out.matches("Attack (0 = pass").count(), 2);
}

#[test]
fn game_end_names_the_durak() {
    let (status, out) = play(
        "1\n0\n",
        vec![
            vec![c(Rank::Nine, Suit::Clubs)],
            vec![c(Rank::Ten, Suit::Clubs), c(Rank::Seven, Suit::Spades)],
        ],
    );
    assert_eq!(status.state, GameState::Ended);
    assert!(out.contains("Game over: Bot is the durak"));
    assert!(out.contains("Winners: You"));
}

#[test]
fn hand_listing_is_sorted_by_suit_then_rank() {
    let (_, out) = play(
        "q\n",
        vec![
            vec![c(Rank::Ace, Suit::Spades), c(Rank::Seven, Suit::Clubs)],
            vec![c(Rank::Ten, Suit::Clubs)],
        ],
    );
    assert!(out.contains("  1) Seven of Clubs"));
    assert!(out.contains("  2) Ace of Spades"));
}
