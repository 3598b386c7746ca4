// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The console front-end.
//!
//! This module provides:
//! - Key bindings (`keys`) and the raw-mode input thread (`input`)
//! - `ConsolePrompt` - collects typed answers after a buzz
//! - `ConsoleView` - narrates rounds, scores, and standings
//! - `play` - wires a loaded game to the terminal and runs it

pub mod input;
pub mod keys;

pub use input::{AnswerEntry, ConsoleInput};
pub use keys::{KeyAction, KeyMap};

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::audio::{AudioError, AudioPlayer};
use crate::library::{Game, Song};
use crate::matching::AcceptanceMode;
use crate::round::{
    AnswerCollector, AnswerResponse, Cancelled, InputPhase, RoundObserver, RoundOutcome,
    SignalBoard, SLOT_COUNT,
};
use crate::session::{
    ContestantCount, ContestantSlot, GameSession, SessionEnd, SessionView, Standings, Tally,
};

/// Print a line. Raw mode needs an explicit carriage return.
pub fn say(text: &str) {
    let mut out = io::stdout();
    let _ = out.write_all(text.as_bytes());
    let _ = out.write_all(b"\r\n");
    let _ = out.flush();
}

/// Print a prompt without ending the line.
fn ask(text: &str) {
    let mut out = io::stdout();
    let _ = out.write_all(text.as_bytes());
    let _ = out.flush();
}

/// Collects answers by prompting the buzzing contestant at the terminal.
pub struct ConsolePrompt {
    board: SignalBoard,
    entry: AnswerEntry,
    names: [String; SLOT_COUNT],
}

impl ConsolePrompt {
    pub fn new(board: SignalBoard, entry: AnswerEntry, names: [String; SLOT_COUNT]) -> Self {
        Self {
            board,
            entry,
            names,
        }
    }
}

impl AnswerCollector for ConsolePrompt {
    fn collect(&mut self, slot: usize, _song: &Song) -> AnswerResponse {
        self.entry.clear();
        ask(&format!("{}, name that tune: ", self.names[slot]));
        match self.entry.take(&self.board) {
            Ok(Some(line)) => AnswerResponse::Answer(line),
            Ok(None) => AnswerResponse::Abandoned,
            Err(Cancelled) => AnswerResponse::Cancelled,
        }
    }
}

/// Narrates the game at the terminal.
pub struct ConsoleView {
    names: [String; SLOT_COUNT],
}

impl ConsoleView {
    pub fn new(names: [String; SLOT_COUNT]) -> Self {
        Self { names }
    }
}

impl RoundObserver for ConsoleView {
    fn ready_check(&mut self, _active: [bool; SLOT_COUNT]) {
        say("");
        say("Press your buzzer when you are ready for the next song.");
    }

    fn clip_started(&mut self, song: &Song) {
        if song.hint().is_empty() {
            say("Listen...");
        } else {
            say(&format!("Hint: {}", song.hint()));
        }
    }

    fn buzzed(&mut self, slot: usize, elapsed_secs: f64) {
        say(&format!(
            "{} buzzed in at {:.1} seconds!",
            self.names[slot], elapsed_secs
        ));
    }

    fn round_complete(&mut self, song: &Song, outcome: &RoundOutcome) {
        let reveal = format!("{} by {}", song.display_title(), song.artist());
        match (outcome.slot, outcome.correct) {
            (None, _) => say(&format!("Passed. That was {}.", reveal)),
            (Some(_), true) => say(&format!("Correct! That was {}.", reveal)),
            (Some(_), false) => say(&format!("Sorry, no. That was {}.", reveal)),
        }
    }
}

impl SessionView for ConsoleView {
    fn round_starting(&mut self, index: usize, total: usize, _song: &Song) {
        say(&format!("--- Song {} of {} ---", index + 1, total));
    }

    fn scoreboard(&mut self, slots: &[ContestantSlot; SLOT_COUNT], tally: &Tally) {
        say("Scores:");
        for (slot, contestant) in slots.iter().enumerate() {
            if !contestant.active {
                continue;
            }
            let totals = tally.totals()[slot];
            say(&format!(
                "  {}: {} point{} in {:.1}s",
                contestant.name,
                totals.score,
                if totals.score == 1 { "" } else { "s" },
                totals.time_secs
            ));
        }
    }

    fn song_skipped(&mut self, song: &Song, err: &AudioError) {
        say(&format!(
            "Could not play {} ({}); skipping.",
            song.display_title(),
            err
        ));
    }

    fn standings(&mut self, slots: &[ContestantSlot; SLOT_COUNT], standings: &Standings) {
        say("");
        match standings {
            Standings::NoWinner => say("No winner this time."),
            Standings::Winner(slot) => say(&format!("{} wins!", slots[*slot].name)),
            Standings::TwoWayTie(a, b) => say(&format!(
                "It's a tie between {} and {}!",
                slots[*a].name, slots[*b].name
            )),
            Standings::FullTie => say("Everyone ties!"),
        }
        // Leave the result on screen before the terminal is restored.
        thread::sleep(Duration::from_secs(3));
    }
}

/// Show the active bindings before play starts.
fn show_keys(keys: &KeyMap, active: [bool; SLOT_COUNT]) {
    for slot in 0..SLOT_COUNT {
        if active[slot] {
            say(&format!(
                "Buzzer {}: {}",
                slot + 1,
                keys::format_key(keys.buzzers[slot])
            ));
        }
    }
    say(&format!(
        "Pass: {}   Cancel: Esc",
        keys::format_key(keys.pass)
    ));
}

/// Check each contestant in: a practice buzz, then their name.
fn collect_names(session: &mut GameSession, entry: &AnswerEntry) -> std::result::Result<(), Cancelled> {
    let board = session.board().clone();
    let active = session.active();
    for slot in 0..SLOT_COUNT {
        if !active[slot] {
            continue;
        }
        board.set_phase(InputPhase::ReadyCheck);
        say(&format!(
            "Contestant at buzzer {}: press your buzzer to check in.",
            slot + 1
        ));
        board.wait_slot_ready(slot)?;
        board.set_phase(InputPhase::Answer);
        entry.clear();
        ask("Type your name and press Enter: ");
        // Escape keeps the default name.
        if let Some(name) = entry.take(&board)? {
            session.set_name(slot, name.trim().to_string());
        }
        say(&format!("Welcome, {}!", session.slots()[slot].name));
    }
    board.set_phase(InputPhase::Idle);
    Ok(())
}

/// Run a loaded game at the terminal.
pub fn play(
    game: Game,
    mode: AcceptanceMode,
    contestants: ContestantCount,
    keys: KeyMap,
    player: &mut dyn AudioPlayer,
) -> Result<()> {
    let board = SignalBoard::new();
    let entry = AnswerEntry::new();
    let mut session = GameSession::new(game, mode, contestants, board.clone());
    let input = ConsoleInput::start(keys.clone(), board.clone(), entry.clone())
        .context("Failed to take over the terminal")?;

    say(&format!("Acceptance mode: {}.", mode));
    show_keys(&keys, session.active());

    if collect_names(&mut session, &entry).is_err() {
        say("Cancelled.");
        drop(input);
        return Ok(());
    }

    let names: [String; SLOT_COUNT] =
        std::array::from_fn(|slot| session.slots()[slot].name.clone());
    let mut view = ConsoleView::new(names.clone());
    let mut prompt = ConsolePrompt::new(board, entry, names);

    match session.run(player, &mut prompt, &mut view) {
        SessionEnd::Finished { .. } => {}
        SessionEnd::Aborted { completed } => {
            say(&format!("Game cancelled after {} rounds.", completed));
        }
    }

    drop(input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn names() -> [String; SLOT_COUNT] {
        ["Ada".to_string(), "Ben".to_string(), "Cal".to_string()]
    }

    fn song() -> Song {
        Song::new(
            vec!["Test".to_string()],
            "Artist".to_string(),
            String::new(),
            PathBuf::from("clip.wav"),
            0.0,
            1000,
        )
    }

    #[test]
    fn test_prompt_returns_submitted_answer() {
        let board = SignalBoard::new();
        let entry = AnswerEntry::new();
        let mut prompt = ConsolePrompt::new(board.clone(), entry.clone(), names());

        // Simulates the input thread typing a line after the prompt.
        let feeder = entry.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            for c in "hey jude".chars() {
                feeder.push_char(c);
            }
            feeder.submit();
        });
        let response = prompt.collect(1, &song());
        handle.join().unwrap();
        assert_eq!(response, AnswerResponse::Answer("hey jude".to_string()));
    }

    #[test]
    fn test_prompt_abandoned() {
        let board = SignalBoard::new();
        let entry = AnswerEntry::new();
        let mut prompt = ConsolePrompt::new(board.clone(), entry.clone(), names());

        let feeder = entry.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            feeder.push_char('h');
            feeder.abandon();
        });
        let response = prompt.collect(1, &song());
        handle.join().unwrap();
        assert_eq!(response, AnswerResponse::Abandoned);
    }

    #[test]
    fn test_prompt_cancelled() {
        let board = SignalBoard::new();
        let entry = AnswerEntry::new();
        let mut prompt = ConsolePrompt::new(board.clone(), entry, names());
        board.cancel();
        assert_eq!(prompt.collect(0, &song()), AnswerResponse::Cancelled);
    }
}
