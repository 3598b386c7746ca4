// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song and game data model.
//!
//! This module provides:
//! - `Song` - an audio excerpt plus the title variants a guess is graded
//!   against (immutable once constructed)
//! - `Game` - an ordered sequence of songs with edit operations
//! - The persisted game-file format (`format`)

pub mod format;

pub use format::{
    format_record, load_game, parse_game, save_game, unique_save_path, LibraryError, LoadedGame,
};

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::matching::normalize;

/// One song in a game: a clip reference and the data used to grade guesses.
///
/// The title list keeps the display title first; every further entry is a
/// normalized variant, including a variant with a single well-formed
/// parenthetical clause removed (so "(Sittin' On) The Dock of the Bay" can
/// be guessed as "the dock of the bay"). Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    titles: Vec<String>,
    artist: String,
    hint: String,
    clip: PathBuf,
    start_ms: f64,
    duration_ms: u64,
}

impl Song {
    /// Create a song, expanding the supplied titles into the variant list.
    ///
    /// `titles` holds the display title first, optionally followed by
    /// alternate titles (or previously expanded variants when reloading a
    /// saved game). Duplicate variants are collapsed.
    pub fn new(
        titles: Vec<String>,
        artist: String,
        hint: String,
        clip: PathBuf,
        start_ms: f64,
        duration_ms: u64,
    ) -> Self {
        let display = titles.first().cloned().unwrap_or_default();
        let mut expanded = vec![display];
        for title in &titles {
            if let Some(stripped) = deparenthesized(title) {
                push_unique(&mut expanded, normalize(&stripped));
            }
            push_unique(&mut expanded, normalize(title));
        }
        Self {
            titles: expanded,
            artist,
            hint,
            clip,
            start_ms,
            duration_ms,
        }
    }

    /// Display title (the first, unnormalized entry).
    pub fn display_title(&self) -> &str {
        &self.titles[0]
    }

    /// All title variants, display title first.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Artist display string (graded against in loose mode only).
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Hint shown while the clip plays.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Opaque reference to the audio clip.
    pub fn clip(&self) -> &Path {
        &self.clip
    }

    /// Excerpt start offset in milliseconds (fractional).
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    /// Excerpt duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Nominal excerpt duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

/// Remove a single well-formed `(...)` clause from a title.
///
/// The clause text is dropped but the closing parenthesis is kept; it
/// disappears during normalization. Returns `None` when the title has no
/// `(` before a later `)`.
fn deparenthesized(title: &str) -> Option<String> {
    let open = title.find('(')?;
    let close = title.find(')')?;
    if open < close {
        Some(format!("{}{}", &title[..open], &title[close..]))
    } else {
        None
    }
}

fn push_unique(variants: &mut Vec<String>, variant: String) {
    if !variants.contains(&variant) {
        variants.push(variant);
    }
}

/// An ordered sequence of songs.
///
/// Mutable while a game is being composed; read-only during play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    songs: Vec<Song>,
}

impl Game {
    /// Create an empty game.
    pub fn new() -> Self {
        Self { songs: Vec::new() }
    }

    /// Create a game from an existing song list.
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Songs in play order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the game has no songs.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Append a song.
    pub fn push(&mut self, song: Song) {
        self.songs.push(song);
    }

    /// Remove the song at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Song> {
        if index < self.songs.len() {
            Some(self.songs.remove(index))
        } else {
            None
        }
    }

    /// Move the song at `index` to the front of the play order.
    pub fn move_to_front(&mut self, index: usize) {
        if index < self.songs.len() {
            let song = self.songs.remove(index);
            self.songs.insert(0, song);
        }
    }

    /// Swap the song at `index` with its predecessor.
    pub fn raise(&mut self, index: usize) {
        if index > 0 && index < self.songs.len() {
            self.songs.swap(index - 1, index);
        }
    }

    /// Swap the song at `index` with its successor.
    pub fn lower(&mut self, index: usize) {
        if index + 1 < self.songs.len() {
            self.songs.swap(index, index + 1);
        }
    }

    /// Shuffle the play order.
    pub fn shuffle(&mut self) {
        self.songs.shuffle(&mut rand::thread_rng());
    }
}
