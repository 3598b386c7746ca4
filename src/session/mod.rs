// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A whole game: contestants, round sequencing, scoring, standings.
//!
//! This module provides:
//! - `ContestantCount` - how many are playing and which slots they hold
//! - `GameSession` - runs every song of a game through the round engine
//! - Score accumulation and ranking (`tally`)

pub mod tally;

pub use tally::{SlotTotals, Standings, Tally};

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use tracing::info;

use crate::audio::{AudioError, AudioPlayer};
use crate::library::{Game, Song};
use crate::matching::AcceptanceMode;
use crate::round::{
    AnswerCollector, RoundEngine, RoundOutcome, RoundResult, SignalBoard, SLOT_COUNT,
};

/// Default contestant names, picked at random for unnamed slots.
pub const DEFAULT_NAMES: [&str; 6] = [
    "Johann", "Wolfgang", "Ludwig", "Louis", "Elvis", "Michael",
];

/// How many contestants are playing.
///
/// The mapping to slots keeps buzzer keys apart on the keyboard: a lone
/// contestant gets the middle slot, two contestants get the outer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContestantCount {
    One,
    Two,
    #[default]
    Three,
}

impl ContestantCount {
    /// Which slots are active for this count.
    pub fn active_slots(self) -> [bool; SLOT_COUNT] {
        match self {
            ContestantCount::One => [false, true, false],
            ContestantCount::Two => [true, false, true],
            ContestantCount::Three => [true, true, true],
        }
    }

    pub fn count(self) -> usize {
        match self {
            ContestantCount::One => 1,
            ContestantCount::Two => 2,
            ContestantCount::Three => 3,
        }
    }
}

impl TryFrom<u8> for ContestantCount {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(ContestantCount::One),
            2 => Ok(ContestantCount::Two),
            3 => Ok(ContestantCount::Three),
            other => Err(format!("contestant count must be 1-3, got {}", other)),
        }
    }
}

impl FromStr for ContestantCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .parse()
            .map_err(|_| format!("contestant count must be 1-3, got {:?}", s))?;
        ContestantCount::try_from(n)
    }
}

impl fmt::Display for ContestantCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// One contestant slot: a name and whether it is playing.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestantSlot {
    pub name: String,
    pub active: bool,
}

/// Session-level presentation seam, on top of per-round notifications.
///
/// All methods default to no-ops.
pub trait SessionView: crate::round::RoundObserver {
    /// The next round is about to start.
    fn round_starting(&mut self, _index: usize, _total: usize, _song: &Song) {}
    /// Totals after a completed round.
    fn scoreboard(&mut self, _slots: &[ContestantSlot; SLOT_COUNT], _tally: &Tally) {}
    /// A song was skipped because its clip would not play.
    fn song_skipped(&mut self, _song: &Song, _err: &AudioError) {}
    /// Final standings after the last round.
    fn standings(&mut self, _slots: &[ContestantSlot; SLOT_COUNT], _standings: &Standings) {}
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEnd {
    /// Every song was played (or skipped); standings are final.
    Finished {
        outcomes: Vec<RoundOutcome>,
        standings: Standings,
    },
    /// Cancelled after `completed` rounds; no standings.
    Aborted { completed: usize },
}

/// Runs a game start to finish.
pub struct GameSession {
    game: Game,
    engine: RoundEngine,
    slots: [ContestantSlot; SLOT_COUNT],
    tally: Tally,
}

impl GameSession {
    /// Create a session over `game` with random default names assigned
    /// to the active slots.
    pub fn new(
        game: Game,
        mode: AcceptanceMode,
        contestants: ContestantCount,
        board: SignalBoard,
    ) -> Self {
        let active = contestants.active_slots();
        let names: Vec<String> = DEFAULT_NAMES
            .choose_multiple(&mut rand::thread_rng(), SLOT_COUNT)
            .map(|name| name.to_string())
            .collect();
        let slots = std::array::from_fn(|slot| ContestantSlot {
            name: names[slot].clone(),
            active: active[slot],
        });
        Self {
            game,
            engine: RoundEngine::new(board, mode, active),
            slots,
            tally: Tally::new(),
        }
    }

    /// Rename a slot's contestant.
    pub fn set_name(&mut self, slot: usize, name: String) {
        if slot < SLOT_COUNT && !name.trim().is_empty() {
            self.slots[slot].name = name;
        }
    }

    pub fn slots(&self) -> &[ContestantSlot; SLOT_COUNT] {
        &self.slots
    }

    pub fn active(&self) -> [bool; SLOT_COUNT] {
        self.engine.active()
    }

    pub fn board(&self) -> &SignalBoard {
        self.engine.board()
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Play every song in order.
    ///
    /// Cancellation between or during rounds aborts the session without
    /// standings; unplayable songs are skipped and do not score.
    pub fn run<V: SessionView>(
        &mut self,
        player: &mut dyn AudioPlayer,
        collector: &mut dyn AnswerCollector,
        view: &mut V,
    ) -> SessionEnd {
        let songs = self.game.songs().to_vec();
        let total = songs.len();
        let mut outcomes = Vec::new();

        info!(songs = total, contestants = ?self.active(), "session starting");

        for (index, song) in songs.iter().enumerate() {
            view.round_starting(index, total, song);
            match self.engine.play_round(song, player, collector, view) {
                RoundResult::Completed(outcome) => {
                    self.tally.apply(&outcome);
                    outcomes.push(outcome);
                    view.scoreboard(&self.slots, &self.tally);
                }
                RoundResult::Cancelled => {
                    info!(completed = outcomes.len(), "session cancelled");
                    return SessionEnd::Aborted {
                        completed: outcomes.len(),
                    };
                }
                RoundResult::Skipped(err) => {
                    view.song_skipped(song, &err);
                }
            }
        }

        let standings = self.tally.finalize(self.active());
        view.standings(&self.slots, &standings);
        SessionEnd::Finished {
            outcomes,
            standings,
        }
    }
}
