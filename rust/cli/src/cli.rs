//! Command-line definition.

use clap::{Parser, Subcommand, ValueEnum};
use durak_engine::round::TransitionRule;

#[derive(Parser, Debug)]
#[command(name = "durak", version, about = "Durak card game engine CLI")]
pub struct DurakCli {
    /// Log engine decisions (debug level) to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a match against a bot on the console
    Play {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        bot: Option<BotKind>,
        #[arg(long, value_enum)]
        rule: Option<Rule>,
        /// Write the match events as JSON lines to this file
        #[arg(long)]
        history: Option<String>,
    },
    /// Run bot-only matches and summarize the outcomes
    Sim {
        #[arg(long)]
        games: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long, value_enum)]
        bot: Option<BotKind>,
        #[arg(long, value_enum)]
        rule: Option<Rule>,
    },
    /// Show the trump and the hands a seed deals
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    Random,
    Cover,
}

impl BotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BotKind::Random => "random",
            BotKind::Cover => "cover",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Rule {
    Standard,
    Legacy,
}

impl From<Rule> for TransitionRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Standard => TransitionRule::Standard,
            Rule::Legacy => TransitionRule::Legacy,
        }
    }
}
