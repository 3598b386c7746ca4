// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Excerpt decoding.
//!
//! Decodes a song's clip file with symphonia and slices out the excerpt
//! the song names (start offset plus duration), as interleaved f32
//! samples ready for the output stream.

use std::fs::File;
use std::io::ErrorKind;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use super::AudioError;
use crate::library::Song;

/// A decoded excerpt: interleaved f32 samples plus their layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipData {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl ClipData {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    /// Excerpt length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate.max(1) as f64
    }
}

/// Decode the song's clip and slice out its excerpt.
///
/// The whole file is decoded and the excerpt cut by frame index; a start
/// offset or duration that runs past the end of the audio is clamped.
pub fn load_excerpt(song: &Song) -> Result<ClipData, AudioError> {
    let path = song.clip().to_path_buf();
    let file = File::open(&path).map_err(|err| AudioError::Open {
        path: path.clone(),
        detail: err.to_string(),
    })?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| AudioError::Decode {
            path: path.clone(),
            detail: err.to_string(),
        })?;
    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| AudioError::Decode {
        path: path.clone(),
        detail: "no default audio track".to_string(),
    })?;
    let track_id = track.id;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|err| AudioError::Decode {
            path: path.clone(),
            detail: err.to_string(),
        })?;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44_100);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(2);
    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(err) => {
                return Err(AudioError::Decode {
                    path,
                    detail: err.to_string(),
                })
            }
        };
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_buf.is_none() {
                    let spec = *decoded.spec();
                    sample_rate = spec.rate;
                    channels = spec.channels.count() as u16;
                    sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
                }
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buf.samples());
                }
            }
            // Malformed packets are skipped; the stream may recover.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(err) => {
                return Err(AudioError::Decode {
                    path,
                    detail: err.to_string(),
                })
            }
        }
    }

    let frame = channels.max(1) as usize;
    let start_frame = (song.start_ms() / 1000.0 * sample_rate as f64) as usize;
    let excerpt_frames = (song.duration_ms() as f64 / 1000.0 * sample_rate as f64) as usize;
    let start = (start_frame * frame).min(samples.len());
    let end = (start + excerpt_frames * frame).min(samples.len());
    let excerpt = samples[start..end].to_vec();
    if excerpt.is_empty() {
        return Err(AudioError::EmptyExcerpt { path });
    }

    debug!(
        clip = %path.display(),
        frames = excerpt.len() / frame,
        channels,
        sample_rate,
        "decoded excerpt"
    );

    Ok(ClipData {
        samples: excerpt,
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    const RATE: u32 = 8000;

    /// Write a minimal mono 16-bit PCM WAV file.
    fn write_wav(path: &Path, samples: &[i16]) {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&RATE.to_le_bytes());
        out.extend_from_slice(&(RATE * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        let mut file = File::create(path).unwrap();
        file.write_all(&out).unwrap();
    }

    fn song_for(clip: PathBuf, start_ms: f64, duration_ms: u64) -> Song {
        Song::new(
            vec!["Test".to_string()],
            "Artist".to_string(),
            String::new(),
            clip,
            start_ms,
            duration_ms,
        )
    }

    #[test]
    fn test_excerpt_sliced_by_offset_and_duration() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("tone.wav");
        // One second of audio.
        let samples: Vec<i16> = (0..RATE).map(|i| (i % 100) as i16 * 100).collect();
        write_wav(&clip, &samples);

        // 250 ms starting at 500 ms.
        let song = song_for(clip, 500.0, 250);
        let data = load_excerpt(&song).unwrap();
        assert_eq!(data.channels, 1);
        assert_eq!(data.sample_rate, RATE);
        assert_eq!(data.frames(), (RATE / 4) as usize);
        assert!((data.duration_secs() - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_excerpt_clamped_to_clip_end() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("short.wav");
        let samples: Vec<i16> = vec![0; (RATE / 2) as usize]; // half a second
        write_wav(&clip, &samples);

        // Asks for a full second starting at 250 ms; only 250 ms exists.
        let song = song_for(clip, 250.0, 1000);
        let data = load_excerpt(&song).unwrap();
        assert_eq!(data.frames(), (RATE / 4) as usize);
    }

    #[test]
    fn test_excerpt_past_end_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("short.wav");
        write_wav(&clip, &vec![0; 100]);

        let song = song_for(clip, 60_000.0, 1000);
        assert!(matches!(
            load_excerpt(&song).unwrap_err(),
            AudioError::EmptyExcerpt { .. }
        ));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let song = song_for(PathBuf::from("/nonexistent/clip.wav"), 0.0, 1000);
        assert!(matches!(
            load_excerpt(&song).unwrap_err(),
            AudioError::Open { .. }
        ));
    }

    #[test]
    fn test_garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("noise.wav");
        std::fs::write(&clip, b"this is not audio").unwrap();

        let song = song_for(clip, 0.0, 1000);
        assert!(matches!(
            load_excerpt(&song).unwrap_err(),
            AudioError::Decode { .. }
        ));
    }
}
