// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Running score and final standings.
//!
//! Each slot accumulates a score (+1 correct, -1 wrong) and the clip
//! seconds its buzzes consumed. Ranking divides score by accumulated
//! time, so a fast correct answer beats a slow one.

use crate::round::{RoundOutcome, SLOT_COUNT};

/// One slot's accumulated score and buzz time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotTotals {
    pub score: i64,
    pub time_secs: f64,
}

impl SlotTotals {
    /// Score per second of buzz time; zero while no time has accrued.
    pub fn rate(&self) -> f64 {
        if self.time_secs > 0.0 {
            self.score as f64 / self.time_secs
        } else {
            0.0
        }
    }
}

/// Final ranking over the active slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standings {
    /// Nobody finished with a positive rate.
    NoWinner,
    /// A single slot holds the best rate.
    Winner(usize),
    /// Exactly two slots share the best rate.
    TwoWayTie(usize, usize),
    /// Every active slot shares the best rate.
    FullTie,
}

/// Accumulates round outcomes into per-slot totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    totals: [SlotTotals; SLOT_COUNT],
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-slot totals, indexed by slot.
    pub fn totals(&self) -> &[SlotTotals; SLOT_COUNT] {
        &self.totals
    }

    /// Fold one round outcome into the totals.
    ///
    /// A pass (no slot) changes nothing. A buzz charges the elapsed clip
    /// time to the buzzing slot and moves its score one point up or down.
    pub fn apply(&mut self, outcome: &RoundOutcome) {
        let Some(slot) = outcome.slot else {
            return;
        };
        if slot >= SLOT_COUNT {
            return;
        }
        let totals = &mut self.totals[slot];
        totals.time_secs += outcome.elapsed_secs;
        totals.score += if outcome.correct { 1 } else { -1 };
    }

    /// Rank the active slots by rate.
    ///
    /// No winner unless the best rate is positive. Rates are compared
    /// exactly; identical accumulations tie.
    pub fn finalize(&self, active: [bool; SLOT_COUNT]) -> Standings {
        let rates: Vec<(usize, f64)> = (0..SLOT_COUNT)
            .filter(|&slot| active[slot])
            .map(|slot| (slot, self.totals[slot].rate()))
            .collect();
        let best = rates
            .iter()
            .map(|&(_, rate)| rate)
            .fold(f64::NEG_INFINITY, f64::max);
        if best <= 0.0 {
            return Standings::NoWinner;
        }

        let leaders: Vec<usize> = rates
            .iter()
            .filter(|&&(_, rate)| rate == best)
            .map(|&(slot, _)| slot)
            .collect();
        match leaders.as_slice() {
            [slot] => Standings::Winner(*slot),
            [a, b] => Standings::TwoWayTie(*a, *b),
            _ => Standings::FullTie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [bool; SLOT_COUNT] = [true, true, true];

    fn outcome(slot: usize, correct: bool, elapsed_secs: f64) -> RoundOutcome {
        RoundOutcome {
            slot: Some(slot),
            guess: Some(String::new()),
            correct,
            elapsed_secs,
        }
    }

    fn pass(elapsed_secs: f64) -> RoundOutcome {
        RoundOutcome {
            slot: None,
            guess: None,
            correct: false,
            elapsed_secs,
        }
    }

    #[test]
    fn test_fast_correct_beats_slow() {
        // Slot 0: +1 in 4s then -1 in 6s nets rate 0. Slot 1: +1 in 2s.
        let mut tally = Tally::new();
        tally.apply(&outcome(0, true, 4.0));
        tally.apply(&outcome(0, false, 6.0));
        tally.apply(&outcome(1, true, 2.0));

        assert_eq!(tally.totals()[0].score, 0);
        assert_eq!(tally.totals()[0].time_secs, 10.0);
        assert_eq!(tally.totals()[0].rate(), 0.0);
        assert_eq!(tally.totals()[1].rate(), 0.5);
        assert_eq!(tally.finalize(ALL), Standings::Winner(1));
    }

    #[test]
    fn test_pass_changes_nothing() {
        let mut tally = Tally::new();
        tally.apply(&pass(12.0));
        assert_eq!(tally, Tally::new());
        assert_eq!(tally.finalize(ALL), Standings::NoWinner);
    }

    #[test]
    fn test_no_winner_when_best_rate_not_positive() {
        let mut tally = Tally::new();
        tally.apply(&outcome(0, false, 3.0));
        tally.apply(&outcome(1, false, 5.0));
        assert_eq!(tally.finalize(ALL), Standings::NoWinner);

        // A slot that never buzzed has rate zero, still not a winner.
        assert_eq!(tally.totals()[2].rate(), 0.0);
    }

    #[test]
    fn test_two_way_tie() {
        let mut tally = Tally::new();
        tally.apply(&outcome(0, true, 4.0));
        tally.apply(&outcome(2, true, 4.0));
        assert_eq!(tally.finalize(ALL), Standings::TwoWayTie(0, 2));
    }

    #[test]
    fn test_full_tie() {
        let mut tally = Tally::new();
        tally.apply(&outcome(0, true, 5.0));
        tally.apply(&outcome(1, true, 5.0));
        tally.apply(&outcome(2, true, 5.0));
        assert_eq!(tally.finalize(ALL), Standings::FullTie);
    }

    #[test]
    fn test_inactive_slots_excluded() {
        let mut tally = Tally::new();
        tally.apply(&outcome(0, true, 2.0));
        tally.apply(&outcome(1, true, 1.0));
        // Slot 1 has the best rate but only slots 0 and 2 are playing.
        assert_eq!(
            tally.finalize([true, false, true]),
            Standings::Winner(0)
        );
    }

    #[test]
    fn test_negative_score_keeps_accumulating() {
        let mut tally = Tally::new();
        tally.apply(&outcome(1, false, 2.0));
        tally.apply(&outcome(1, false, 2.0));
        tally.apply(&outcome(1, true, 2.0));
        assert_eq!(tally.totals()[1].score, -1);
        assert_eq!(tally.totals()[1].time_secs, 6.0);
    }
}
