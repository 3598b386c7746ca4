// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The keyboard input thread.
//!
//! Reads raw key events and routes them by the published input phase:
//! buzzer keys become ready or buzz signals, pass goes to the host, and
//! during answer entry keys feed the shared line buffer. Ctrl+C cancels
//! the session from any phase; Escape does too, except during answer
//! entry, where it abandons the prompt instead.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::debug;

use super::keys::{KeyAction, KeyMap};
use crate::round::{Cancelled, InputPhase, SignalBoard};

/// The answer line buffer, shared between the input thread (which types
/// into it) and the round engine (which waits for submission).
#[derive(Clone, Default)]
pub struct AnswerEntry {
    inner: Arc<EntryInner>,
}

#[derive(Default)]
struct EntryInner {
    state: Mutex<EntryState>,
    cond: Condvar,
}

#[derive(Default)]
struct EntryState {
    buffer: String,
    submitted: Option<String>,
    abandoned: bool,
}

impl AnswerEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any buffered or submitted text.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.buffer.clear();
        state.submitted = None;
        state.abandoned = false;
    }

    pub(crate) fn push_char(&self, c: char) {
        self.inner.state.lock().unwrap().buffer.push(c);
    }

    /// Remove the last buffered character; false if there was none.
    pub(crate) fn backspace(&self) -> bool {
        self.inner.state.lock().unwrap().buffer.pop().is_some()
    }

    pub(crate) fn submit(&self) {
        let mut state = self.inner.state.lock().unwrap();
        let line = std::mem::take(&mut state.buffer);
        state.submitted = Some(line);
        self.inner.cond.notify_all();
    }

    /// Give up on the line, forfeiting the answer.
    pub(crate) fn abandon(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.buffer.clear();
        state.abandoned = true;
        self.inner.cond.notify_all();
    }

    /// Block until a line is submitted (`Some`), the prompt is abandoned
    /// (`None`), or the session is cancelled.
    ///
    /// Cancellation lives on the signal board, so the wait wakes
    /// periodically to check it.
    pub fn take(&self, board: &SignalBoard) -> Result<Option<String>, Cancelled> {
        let mut state = self.inner.state.lock().unwrap();
        loop {
            if let Some(line) = state.submitted.take() {
                return Ok(Some(line));
            }
            if state.abandoned {
                state.abandoned = false;
                return Ok(None);
            }
            if board.is_cancelled() {
                return Err(Cancelled);
            }
            let (next, _) = self
                .inner
                .cond
                .wait_timeout(state, Duration::from_millis(50))
                .unwrap();
            state = next;
        }
    }
}

/// Owns the raw-mode terminal and the key-reading thread.
///
/// Raw mode is enabled for the lifetime of this value and restored on
/// drop, after the thread has been joined.
pub struct ConsoleInput {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ConsoleInput {
    /// Enable raw mode and start routing key events.
    pub fn start(keys: KeyMap, board: SignalBoard, entry: AnswerEntry) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let handle = thread::spawn(move || input_loop(keys, board, entry, flag));
        Ok(Self {
            running,
            handle: Some(handle),
        })
    }
}

impl Drop for ConsoleInput {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let _ = terminal::disable_raw_mode();
    }
}

fn input_loop(keys: KeyMap, board: SignalBoard, entry: AnswerEntry, running: Arc<AtomicBool>) {
    while running.load(Ordering::SeqCst) {
        if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
            continue;
        }
        let Ok(Event::Key(key)) = event::read() else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("cancel requested from keyboard");
            board.cancel();
            continue;
        }
        // Escape forfeits an answer in progress; anywhere else it
        // cancels the session.
        if key.code == KeyCode::Esc {
            if board.phase() == InputPhase::Answer {
                echo("\r\n");
                entry.abandon();
            } else {
                debug!("cancel requested from keyboard");
                board.cancel();
            }
            continue;
        }

        match board.phase() {
            InputPhase::ReadyCheck => {
                if let Some(KeyAction::Buzz(slot)) = keys.action(key.code) {
                    board.signal_ready(slot);
                }
            }
            InputPhase::Listening => match keys.action(key.code) {
                Some(KeyAction::Buzz(slot)) => board.signal_buzz(slot),
                Some(KeyAction::Pass) => board.signal_pass(),
                None => {}
            },
            InputPhase::Answer => match key.code {
                KeyCode::Enter => {
                    echo("\r\n");
                    entry.submit();
                }
                KeyCode::Backspace => {
                    if entry.backspace() {
                        echo("\x08 \x08");
                    }
                }
                KeyCode::Char(c) => {
                    entry.push_char(c);
                    let mut buf = [0u8; 4];
                    echo(c.encode_utf8(&mut buf));
                }
                _ => {}
            },
            InputPhase::Idle => {}
        }
    }
}

/// Echo typed text; raw mode does not echo for us.
fn echo(text: &str) {
    let mut out = io::stdout();
    let _ = out.write_all(text.as_bytes());
    let _ = out.flush();
}
