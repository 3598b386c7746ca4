// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The persisted game-file format.
//!
//! A game file is a sequence of fixed six-line song records:
//!
//! ```text
//! clip path
//! |-joined title variants
//! artist
//! hint
//! start offset (fractional milliseconds)
//! duration (integer milliseconds)
//! ```
//!
//! The shape is load-bearing: existing saved games must keep loading, and
//! saved output must round-trip bit-for-bit.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use super::{Game, Song};

/// Errors reading or writing a game file.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The file does not divide into six-line records.
    #[error("game file is truncated: record starting at line {line} is incomplete")]
    TruncatedRecord { line: usize },
    /// The start-offset line did not parse as a number.
    #[error("invalid start offset {value:?} at line {line}")]
    InvalidStart { line: usize, value: String },
    /// The duration line did not parse as an integer.
    #[error("invalid duration {value:?} at line {line}")]
    InvalidDuration { line: usize, value: String },
    /// Underlying file IO failed.
    #[error("failed to read or write game file")]
    Io(#[from] std::io::Error),
}

/// Result of loading a game file.
///
/// Songs whose clip file is missing are excluded from the game and listed
/// in `missing` so the caller can report them; they are never dropped
/// silently.
#[derive(Debug)]
pub struct LoadedGame {
    /// The playable game.
    pub game: Game,
    /// Display title and clip path of each excluded song.
    pub missing: Vec<(String, PathBuf)>,
}

/// Load a game file, validating each song's clip path.
pub fn load_game<P: AsRef<Path>>(path: P) -> Result<LoadedGame, LibraryError> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_game(&contents)
}

/// Parse game-file contents.
pub fn parse_game(contents: &str) -> Result<LoadedGame, LibraryError> {
    let lines: Vec<&str> = contents.lines().collect();
    let mut game = Game::new();
    let mut missing = Vec::new();

    let mut index = 0;
    while index < lines.len() {
        let record = &lines[index..];
        // A trailing run of blank lines is tolerated; anything else short
        // of six lines is a truncated record.
        if record.len() < 6 {
            if record.iter().all(|l| l.trim().is_empty()) {
                break;
            }
            return Err(LibraryError::TruncatedRecord { line: index + 1 });
        }

        let clip = PathBuf::from(record[0]);
        let titles: Vec<String> = record[1].split('|').map(str::to_string).collect();
        let artist = record[2].to_string();
        let hint = record[3].to_string();
        let start_ms: f64 = record[4]
            .trim()
            .parse()
            .map_err(|_| LibraryError::InvalidStart {
                line: index + 5,
                value: record[4].to_string(),
            })?;
        let duration_ms: u64 = record[5]
            .trim()
            .parse()
            .map_err(|_| LibraryError::InvalidDuration {
                line: index + 6,
                value: record[5].to_string(),
            })?;

        let song = Song::new(titles, artist, hint, clip, start_ms, duration_ms);
        if song.clip().is_file() {
            game.push(song);
        } else {
            warn!(
                title = song.display_title(),
                clip = %song.clip().display(),
                "clip file missing, song excluded from play"
            );
            missing.push((song.display_title().to_string(), song.clip().to_path_buf()));
        }

        index += 6;
    }

    Ok(LoadedGame { game, missing })
}

/// Save a game to the six-line record format.
pub fn save_game<P: AsRef<Path>>(game: &Game, path: P) -> Result<(), LibraryError> {
    let mut out = String::new();
    for song in game.songs() {
        out.push_str(&format_record(song));
        out.push('\n');
    }
    fs::write(path.as_ref(), out)?;
    Ok(())
}

/// Format one song as its six-line record (no trailing newline).
pub fn format_record(song: &Song) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        song.clip().display(),
        song.titles().join("|"),
        song.artist(),
        song.hint(),
        format_start(song.start_ms()),
        song.duration_ms()
    )
}

/// Format a start offset the way existing files carry it: shortest
/// representation with a decimal point ("0.0", "1234.5").
fn format_start(start_ms: f64) -> String {
    format!("{:?}", start_ms)
}

/// Pick a path under `dir` for `name` that does not collide with an
/// existing file, appending " (n)" as needed.
pub fn unique_save_path(dir: &Path, name: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.txt", name));
    let mut attempt = 0;
    while candidate.is_file() {
        attempt += 1;
        candidate = dir.join(format!("{} ({}).txt", name, attempt));
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn make_song(dir: &Path, title: &str) -> Song {
        let clip = dir.join(format!("{}.wav", title));
        File::create(&clip).unwrap();
        Song::new(
            vec![title.to_string()],
            "Artist".to_string(),
            "A hint".to_string(),
            clip,
            1234.5,
            3000,
        )
    }

    #[test]
    fn test_record_shape() {
        let dir = tempfile::tempdir().unwrap();
        let song = make_song(dir.path(), "Hey Jude");
        let record = format_record(&song);
        let lines: Vec<&str> = record.split('\n').collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Hey Jude|hey jude");
        assert_eq!(lines[2], "Artist");
        assert_eq!(lines[3], "A hint");
        assert_eq!(lines[4], "1234.5");
        assert_eq!(lines[5], "3000");
    }

    #[test]
    fn test_start_offset_formatting() {
        assert_eq!(format_start(0.0), "0.0");
        assert_eq!(format_start(1234.5), "1234.5");
        assert_eq!(format_start(1000.0), "1000.0");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = Game::new();
        game.push(make_song(dir.path(), "First"));
        game.push(make_song(dir.path(), "Second"));

        let path = dir.path().join("game.txt");
        save_game(&game, &path).unwrap();
        let loaded = load_game(&path).unwrap();

        assert!(loaded.missing.is_empty());
        assert_eq!(loaded.game, game);

        // Saving the reloaded game reproduces the file bit-for-bit.
        let path2 = dir.path().join("game2.txt");
        save_game(&loaded.game, &path2).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            fs::read_to_string(&path2).unwrap()
        );
    }

    #[test]
    fn test_missing_clip_excluded_with_notice() {
        let dir = tempfile::tempdir().unwrap();
        let present = make_song(dir.path(), "Present");
        let absent = Song::new(
            vec!["Absent".to_string()],
            "Artist".to_string(),
            String::new(),
            dir.path().join("nope.wav"),
            0.0,
            500,
        );
        let mut game = Game::new();
        game.push(present);
        game.push(absent);

        let path = dir.path().join("game.txt");
        save_game(&game, &path).unwrap();
        let loaded = load_game(&path).unwrap();

        assert_eq!(loaded.game.len(), 1);
        assert_eq!(loaded.game.songs()[0].display_title(), "Present");
        assert_eq!(loaded.missing.len(), 1);
        assert_eq!(loaded.missing[0].0, "Absent");
    }

    #[test]
    fn test_truncated_record_rejected() {
        let contents = "clip.wav\nTitle|title\nArtist\nHint\n0.0\n";
        // Only five lines: duration is missing.
        let err = parse_game(contents).unwrap_err();
        assert!(matches!(err, LibraryError::TruncatedRecord { line: 1 }));
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let contents = "clip.wav\nTitle\nArtist\nHint\nsoon\n3000\n";
        assert!(matches!(
            parse_game(contents).unwrap_err(),
            LibraryError::InvalidStart { .. }
        ));

        let contents = "clip.wav\nTitle\nArtist\nHint\n0.0\nlong\n";
        assert!(matches!(
            parse_game(contents).unwrap_err(),
            LibraryError::InvalidDuration { .. }
        ));
    }

    #[test]
    fn test_trailing_blank_lines_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let song = make_song(dir.path(), "Only");
        let mut contents = format_record(&song);
        contents.push_str("\n\n\n");
        let loaded = parse_game(&contents).unwrap();
        assert_eq!(loaded.game.len(), 1);
    }

    #[test]
    fn test_unique_save_path() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_save_path(dir.path(), "Friday Night");
        assert_eq!(first, dir.path().join("Friday Night.txt"));

        File::create(&first).unwrap();
        let second = unique_save_path(dir.path(), "Friday Night");
        assert_eq!(second, dir.path().join("Friday Night (1).txt"));
    }
}
