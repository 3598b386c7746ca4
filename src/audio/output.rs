// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio output via cpal.
//!
//! One output stream is opened at startup and kept running for the whole
//! session; the callback renders whatever clip is currently installed in
//! the shared slot and silence otherwise. Starting a clip installs it,
//! stopping one clears the slot.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use tracing::{error, info};

use super::{AudioError, AudioPlayer, ClipData, PlaybackHandle};
use crate::library::Song;

/// The clip currently being rendered.
struct ActiveClip {
    data: ClipData,
    /// Fractional source frame position.
    pos: f64,
    /// Source frames advanced per device frame (rate conversion).
    step: f64,
}

type ClipSlot = Arc<Mutex<Option<ActiveClip>>>;

/// Render one callback buffer from the active clip.
///
/// Channel counts are reconciled by repeating the clip's last channel;
/// rate mismatches by nearest-frame stepping. Returns true once the clip
/// is exhausted so the caller can clear the slot.
fn render(active: &mut ActiveClip, out: &mut [f32], device_channels: usize) -> bool {
    let clip_channels = active.data.channels.max(1) as usize;
    let frames = active.data.frames();
    let mut finished = false;

    for frame in out.chunks_mut(device_channels) {
        let src_frame = active.pos as usize;
        if src_frame >= frames {
            finished = true;
            break;
        }
        for (ch, sample) in frame.iter_mut().enumerate() {
            let src_ch = ch.min(clip_channels - 1);
            *sample = active.data.samples[src_frame * clip_channels + src_ch];
        }
        active.pos += active.step;
    }

    finished
}

/// Real excerpt playback through the default output device.
pub struct ClipPlayer {
    _stream: Stream,
    _device: Device,
    slot: ClipSlot,
    device_rate: u32,
}

impl ClipPlayer {
    /// Open the default output device and start the (silent) stream.
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = device.default_output_config().map_err(|err| {
            AudioError::Stream {
                detail: format!("failed to get default config: {}", err),
            }
        })?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(AudioError::Stream {
                detail: format!(
                    "unsupported device sample format {:?}",
                    supported.sample_format()
                ),
            });
        }
        let config: StreamConfig = supported.into();
        let device_rate = config.sample_rate.0;
        let device_channels = config.channels as usize;

        let slot: ClipSlot = Arc::new(Mutex::new(None));
        let callback_slot = slot.clone();

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = 0.0;
                    }
                    let mut slot = callback_slot.lock().unwrap();
                    if let Some(active) = slot.as_mut() {
                        if render(active, data, device_channels) {
                            *slot = None;
                        }
                    }
                },
                move |err| {
                    error!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|err| AudioError::Stream {
                detail: format!("failed to build stream: {}", err),
            })?;

        stream.play().map_err(|err| AudioError::Stream {
            detail: format!("failed to start stream: {}", err),
        })?;

        info!(
            device = device.name().unwrap_or_else(|_| "unknown".to_string()),
            rate = device_rate,
            channels = device_channels,
            "audio output opened"
        );

        Ok(Self {
            _stream: stream,
            _device: device,
            slot,
            device_rate,
        })
    }
}

impl AudioPlayer for ClipPlayer {
    fn play(&mut self, song: &Song) -> Result<PlaybackHandle, AudioError> {
        let data = super::clip::load_excerpt(song)?;
        let step = data.sample_rate as f64 / self.device_rate.max(1) as f64;
        *self.slot.lock().unwrap() = Some(ActiveClip {
            data,
            pos: 0.0,
            step,
        });

        let stop_slot = self.slot.clone();
        Ok(PlaybackHandle::with_stop(
            Duration::from_millis(song.duration_ms()),
            move || {
                *stop_slot.lock().unwrap() = None;
            },
        ))
    }
}
