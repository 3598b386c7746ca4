// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio playback for song excerpts.
//!
//! This module provides:
//! - `AudioPlayer` - the playback seam the round engine drives
//! - `ClipPlayer` (`output`) - real playback through cpal
//! - `TimerPlayer` - a silent stand-in that only keeps time
//! - Excerpt decoding (`clip`)

pub mod clip;
pub mod output;

pub use clip::ClipData;
pub use output::ClipPlayer;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::library::Song;

/// Errors from opening, decoding, or playing a clip.
///
/// Carried inside round results, so kept cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    /// The clip file could not be opened.
    #[error("could not open clip {path}: {detail}")]
    Open { path: PathBuf, detail: String },
    /// The clip file could not be decoded.
    #[error("could not decode clip {path}: {detail}")]
    Decode { path: PathBuf, detail: String },
    /// The requested excerpt lies outside the decoded audio.
    #[error("excerpt is empty for clip {path}")]
    EmptyExcerpt { path: PathBuf },
    /// No audio output device is available.
    #[error("no audio output device available")]
    NoDevice,
    /// The output stream could not be created or started.
    #[error("audio output failed: {detail}")]
    Stream { detail: String },
}

/// A clip in flight: tracks elapsed play time and stops playback.
///
/// Elapsed time is capped at the excerpt's nominal duration, so a buzz
/// after the clip has finished reports the full clip length.
pub struct PlaybackHandle {
    started: Instant,
    nominal: Duration,
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl PlaybackHandle {
    /// A handle that only keeps time.
    pub fn new(nominal: Duration) -> Self {
        Self {
            started: Instant::now(),
            nominal,
            stop: None,
        }
    }

    /// A handle that runs `stop` when stopped or dropped.
    pub fn with_stop(nominal: Duration, stop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            started: Instant::now(),
            nominal,
            stop: Some(Box::new(stop)),
        }
    }

    /// Seconds since playback started, capped at the nominal duration.
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().min(self.nominal).as_secs_f64()
    }

    /// Stop playback. Idempotent.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The playback seam between the round engine and the audio stack.
pub trait AudioPlayer {
    /// Start playing the song's excerpt, returning a handle that tracks
    /// elapsed time and can stop playback early.
    fn play(&mut self, song: &Song) -> Result<PlaybackHandle, AudioError>;
}

/// A player that produces no sound and only keeps time.
///
/// Used when no output device is available, and by tests.
#[derive(Debug, Default)]
pub struct TimerPlayer;

impl TimerPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl AudioPlayer for TimerPlayer {
    fn play(&mut self, song: &Song) -> Result<PlaybackHandle, AudioError> {
        Ok(PlaybackHandle::new(Duration::from_millis(song.duration_ms())))
    }
}
