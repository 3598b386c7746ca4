// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One round of play: ready barrier, clip, buzz race, answer, grading.
//!
//! This module provides:
//! - `SignalBoard` (`signals`) - shared buzzer state and suspension points
//! - `RoundEngine` - drives a single song from barrier to graded outcome
//! - The seams the engine is driven through (`AnswerCollector`,
//!   `RoundObserver`)

pub mod signals;

pub use signals::{BuzzEvent, Cancelled, InputPhase, SignalBoard, SLOT_COUNT};

use tracing::{info, warn};

use crate::audio::{AudioError, AudioPlayer};
use crate::library::Song;
use crate::matching::{self, AcceptanceMode};

/// What happened in a completed round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// Slot that buzzed, or `None` for a pass.
    pub slot: Option<usize>,
    /// The guess as typed, absent on a pass.
    pub guess: Option<String>,
    /// Whether the guess was graded correct.
    pub correct: bool,
    /// Seconds of clip play before the buzz (or pass), capped at the
    /// excerpt's nominal duration.
    pub elapsed_secs: f64,
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundResult {
    /// The round ran to a graded outcome or a pass.
    Completed(RoundOutcome),
    /// The session was cancelled mid-round.
    Cancelled,
    /// The clip could not be played; the song was skipped unscored.
    Skipped(AudioError),
}

/// An answer obtained from the buzzing contestant.
///
/// Walking away from the prompt forfeits the round like a wrong answer;
/// only cancellation ends the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerResponse {
    Answer(String),
    Abandoned,
    Cancelled,
}

/// Collects the typed answer after a buzz.
pub trait AnswerCollector {
    fn collect(&mut self, slot: usize, song: &Song) -> AnswerResponse;
}

/// Receives round progress notifications.
///
/// All methods default to no-ops so front-ends implement only what they
/// present.
pub trait RoundObserver {
    /// The pre-round ready barrier is up for the given active slots.
    fn ready_check(&mut self, _active: [bool; SLOT_COUNT]) {}
    /// The clip has started playing.
    fn clip_started(&mut self, _song: &Song) {}
    /// A slot won the buzz race after `elapsed_secs` of clip.
    fn buzzed(&mut self, _slot: usize, _elapsed_secs: f64) {}
    /// The round reached its outcome.
    fn round_complete(&mut self, _song: &Song, _outcome: &RoundOutcome) {}
}

/// An observer that ignores everything.
#[derive(Debug, Default)]
pub struct NullObserver;

impl RoundObserver for NullObserver {}

/// Drives single rounds against a fixed set of active slots.
pub struct RoundEngine {
    board: SignalBoard,
    mode: AcceptanceMode,
    active: [bool; SLOT_COUNT],
}

impl RoundEngine {
    pub fn new(board: SignalBoard, mode: AcceptanceMode, active: [bool; SLOT_COUNT]) -> Self {
        Self {
            board,
            mode,
            active,
        }
    }

    /// The board this engine blocks on.
    pub fn board(&self) -> &SignalBoard {
        &self.board
    }

    /// Slots participating in the buzz race.
    pub fn active(&self) -> [bool; SLOT_COUNT] {
        self.active
    }

    /// Play one song through the full round sequence.
    ///
    /// Blocks on the ready barrier, starts playback, blocks on the buzz
    /// race, collects and grades the answer. Elapsed time is captured the
    /// moment the buzz resolves; answer typing never counts against the
    /// contestant.
    pub fn play_round(
        &self,
        song: &Song,
        player: &mut dyn AudioPlayer,
        collector: &mut dyn AnswerCollector,
        observer: &mut dyn RoundObserver,
    ) -> RoundResult {
        self.board.reset_round();
        self.board.set_phase(InputPhase::ReadyCheck);
        observer.ready_check(self.active);
        if self.board.wait_ready(self.active).is_err() {
            self.board.set_phase(InputPhase::Idle);
            return RoundResult::Cancelled;
        }

        let mut handle = match player.play(song) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(title = song.display_title(), %err, "clip failed, skipping song");
                self.board.set_phase(InputPhase::Idle);
                return RoundResult::Skipped(err);
            }
        };

        self.board.set_phase(InputPhase::Listening);
        observer.clip_started(song);

        let event = match self.board.wait_buzz(self.active) {
            Ok(event) => event,
            Err(Cancelled) => {
                handle.stop();
                self.board.set_phase(InputPhase::Idle);
                return RoundResult::Cancelled;
            }
        };
        let elapsed_secs = handle.elapsed_secs();
        handle.stop();

        let outcome = match event {
            BuzzEvent::Pass => RoundOutcome {
                slot: None,
                guess: None,
                correct: false,
                elapsed_secs,
            },
            BuzzEvent::Buzz(slot) => {
                observer.buzzed(slot, elapsed_secs);
                self.board.set_phase(InputPhase::Answer);
                let guess = match collector.collect(slot, song) {
                    AnswerResponse::Answer(guess) => Some(guess),
                    // Forfeit: graded as an incorrect round, not a fault.
                    AnswerResponse::Abandoned => None,
                    AnswerResponse::Cancelled => {
                        self.board.set_phase(InputPhase::Idle);
                        return RoundResult::Cancelled;
                    }
                };
                if self.board.is_cancelled() {
                    self.board.set_phase(InputPhase::Idle);
                    return RoundResult::Cancelled;
                }
                let correct = guess
                    .as_deref()
                    .is_some_and(|guess| matching::matches(song, guess, self.mode));
                RoundOutcome {
                    slot: Some(slot),
                    guess,
                    correct,
                    elapsed_secs,
                }
            }
        };

        info!(
            title = song.display_title(),
            slot = ?outcome.slot,
            correct = outcome.correct,
            elapsed_secs = outcome.elapsed_secs,
            "round complete"
        );
        observer.round_complete(song, &outcome);
        self.board.set_phase(InputPhase::Idle);
        RoundResult::Completed(outcome)
    }
}
