use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::Rejection;
use crate::player::{GameEndResult, Intent, PlayerId};
use crate::round::{Round, RoundOutcome, TransitionRule};

/// Everything that happened during a match, in order.
/// Kept in memory by the game and optionally written as JSON lines.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Setup finished: trump drawn and hands dealt
    Started {
        seed: Option<u64>,
        trump: Card,
        players: Vec<String>,
        rule: TransitionRule,
    },
    RoundStarted { number: u32, round: Round },
    CardThrown {
        seat: PlayerId,
        card: Card,
        slot: usize,
    },
    IntentRejected {
        seat: PlayerId,
        intent: Intent,
        reason: Rejection,
    },
    /// Round resolved; `cards` are the table cards that were picked up or discarded
    RoundFinished {
        number: u32,
        outcome: RoundOutcome,
        cards: Vec<Card>,
    },
    GameEnded { result: GameEndResult },
}

/// One line of the event log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based position within the match
    pub seq: u32,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    pub event: GameEvent,
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    seq: u32,
}

impl EventLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            seq: 0,
        })
    }

    /// Logger that only numbers records, writing nowhere.
    pub fn sink() -> Self {
        Self {
            writer: None,
            seq: 0,
        }
    }

    pub fn next_record(&mut self, event: &GameEvent) -> EventRecord {
        self.seq += 1;
        EventRecord {
            seq: self.seq,
            ts: None,
            event: event.clone(),
        }
    }

    pub fn write(&mut self, record: &EventRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }

    pub fn write_all(&mut self, events: &[GameEvent]) -> std::io::Result<()> {
        for event in events {
            let record = self.next_record(event);
            self.write(&record)?;
        }
        Ok(())
    }
}
