// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! ENCORE - a terminal "name that tune" buzzer quiz.
//!
//! An audio clip plays, up to three contestants race to buzz in, and the
//! fastest contestant's guess is graded against the song's known titles
//! under a configurable acceptance mode.
//!
//! Core pieces:
//! - `matching` - title normalization and fuzzy guess grading
//! - `library` - songs, games, and the persisted game-file format
//! - `round` - the per-song buzz-in state machine and its signal board
//! - `session` - game orchestration, per-contestant tally, final ranking
//! - `audio` - clip excerpt playback (cpal output, symphonia decoding)
//! - `console` - terminal front-end: buzzer keys, answer prompt, scoreboard
//! - `config` - optional YAML settings (mode, contestant count, key bindings)

pub mod audio;
pub mod config;
pub mod console;
pub mod library;
pub mod matching;
pub mod round;
pub mod session;
