// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The signal board: shared buzzer state and its suspension points.
//!
//! Physical inputs (key presses) arrive asynchronously on one side of the
//! board; the round engine blocks on the other side until a predicate
//! holds - barrier satisfied, any active buzz set, or cancellation. Each
//! wait is a condvar loop; cancellation wakes every suspension point.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex};

/// Number of contestant slots (each bound to one physical buzz signal).
pub const SLOT_COUNT: usize = 3;

/// What the front-end should do with key input right now.
///
/// Published by the round engine so the same physical keys can act as
/// ready signals, buzzers, or text entry depending on the round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPhase {
    /// Between rounds; only cancellation is meaningful.
    #[default]
    Idle,
    /// Pre-round barrier: buzzer keys signal ready.
    ReadyCheck,
    /// Clip is playing: buzzer keys race, pass is available.
    Listening,
    /// A contestant is typing an answer.
    Answer,
}

/// Resolution of the buzz race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzEvent {
    /// The given slot buzzed first.
    Buzz(usize),
    /// The song was passed with no slot implicated.
    Pass,
}

/// The session was cancelled while a wait was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("session cancelled")
    }
}

impl Error for Cancelled {}

#[derive(Debug, Default)]
struct SignalState {
    ready: [bool; SLOT_COUNT],
    buzz: [bool; SLOT_COUNT],
    pass: bool,
    cancelled: bool,
    phase: InputPhase,
}

/// Shared buzzer state, cloneable across the input thread and the engine.
#[derive(Clone, Default)]
pub struct SignalBoard {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<SignalState>,
    cond: Condvar,
}

impl SignalBoard {
    /// Create a board with all signals clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a slot's ready signal. Idempotent.
    pub fn signal_ready(&self, slot: usize) {
        if slot >= SLOT_COUNT {
            return;
        }
        let mut state = self.lock();
        state.ready[slot] = true;
        self.inner.cond.notify_all();
    }

    /// Mark a slot's buzz signal. Idempotent; late signals after the
    /// first are resolved by slot priority when the engine wakes.
    pub fn signal_buzz(&self, slot: usize) {
        if slot >= SLOT_COUNT {
            return;
        }
        let mut state = self.lock();
        state.buzz[slot] = true;
        self.inner.cond.notify_all();
    }

    /// Signal a pass (no slot implicated).
    pub fn signal_pass(&self) {
        let mut state = self.lock();
        state.pass = true;
        self.inner.cond.notify_all();
    }

    /// Cancel the session, waking every suspension point.
    pub fn cancel(&self) {
        let mut state = self.lock();
        state.cancelled = true;
        self.inner.cond.notify_all();
    }

    /// Check whether the session has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Current input phase.
    pub fn phase(&self) -> InputPhase {
        self.lock().phase
    }

    /// Publish the input phase for the front-end.
    pub fn set_phase(&self, phase: InputPhase) {
        let mut state = self.lock();
        state.phase = phase;
        self.inner.cond.notify_all();
    }

    /// Clear per-round signals (buzz flags, pass, ready) between rounds.
    pub fn reset_round(&self) {
        let mut state = self.lock();
        state.ready = [false; SLOT_COUNT];
        state.buzz = [false; SLOT_COUNT];
        state.pass = false;
    }

    /// Block until every active slot has signaled ready, then clear all
    /// per-round flags. No timeout: blocks until satisfied or cancelled.
    pub fn wait_ready(&self, active: [bool; SLOT_COUNT]) -> Result<(), Cancelled> {
        let mut state = self.lock();
        loop {
            if state.cancelled {
                return Err(Cancelled);
            }
            let satisfied = active
                .iter()
                .zip(state.ready.iter())
                .all(|(&a, &r)| !a || r);
            if satisfied {
                state.ready = [false; SLOT_COUNT];
                state.buzz = [false; SLOT_COUNT];
                state.pass = false;
                return Ok(());
            }
            state = self.inner.cond.wait(state).unwrap();
        }
    }

    /// Block until one slot's ready signal is set, then clear it.
    ///
    /// Used by the front-end's per-contestant practice buzz.
    pub fn wait_slot_ready(&self, slot: usize) -> Result<(), Cancelled> {
        let mut state = self.lock();
        loop {
            if state.cancelled {
                return Err(Cancelled);
            }
            if slot < SLOT_COUNT && state.ready[slot] {
                state.ready[slot] = false;
                return Ok(());
            }
            state = self.inner.cond.wait(state).unwrap();
        }
    }

    /// Block until an active slot buzzes or the song is passed.
    ///
    /// When several buzz flags are set by the time the engine wakes, the
    /// winner is resolved deterministically by slot priority 0 > 1 > 2
    /// regardless of hardware arrival order. A buzz outranks a pass that
    /// arrived in the same tick. Inactive slots never win.
    pub fn wait_buzz(&self, active: [bool; SLOT_COUNT]) -> Result<BuzzEvent, Cancelled> {
        let mut state = self.lock();
        loop {
            if state.cancelled {
                return Err(Cancelled);
            }
            if let Some(slot) = (0..SLOT_COUNT).find(|&i| active[i] && state.buzz[i]) {
                return Ok(BuzzEvent::Buzz(slot));
            }
            if state.pass {
                return Ok(BuzzEvent::Pass);
            }
            state = self.inner.cond.wait(state).unwrap();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SignalState> {
        self.inner.state.lock().unwrap()
    }
}
