//! Synthesized sound on the default output device
//!
//! Every cue is rendered once at startup with fundsp and replayed from memory
//! through rodio. Nothing is loaded from disk.

use fundsp::audiounit::AudioUnit;
use fundsp::prelude::{lfo, saw, sine, triangle};
use fundsp::wave::Wave;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

use super::{AudioSink, SoundEffect};

pub const SAMPLE_RATE: u32 = 44_100;

const JUMP_SECS: f32 = 0.15;
const HIT_SECS: f32 = 0.5;
const ARPEGGIO_NOTE_SECS: f32 = 0.09;
const ARPEGGIO: [f32; 3] = [523.25, 659.25, 783.99];
const MELODY_NOTE_SECS: f32 = 0.25;
/// Minor-key loop, one note per beat
const MELODY: [f32; 16] = [
    220.00, 261.63, 329.63, 261.63, 196.00, 246.94, 293.66, 246.94, 174.61, 220.00, 261.63,
    220.00, 164.81, 207.65, 246.94, 329.63,
];

/// Output device could not be opened
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output: {0}")]
    Output(#[from] rodio::StreamError),
}

/// Mono sample buffers for every cue
#[derive(Debug, Clone)]
pub struct SoundBank {
    pub jump: Vec<f32>,
    pub hit: Vec<f32>,
    pub level_up: Vec<f32>,
    /// One full pass of the background loop
    pub music: Vec<f32>,
}

impl SoundBank {
    pub fn render() -> Self {
        // Quick upward chirp
        let jump = render(
            &mut (lfo(|t: f32| 320.0 + 1800.0 * t) >> sine::<f32>()),
            JUMP_SECS,
            |t| 0.8 * (1.0 - t / JUMP_SECS).max(0.0),
        );

        // Falling saw, 400Hz down to 80Hz
        let hit = render(
            &mut (lfo(|t: f32| 400.0 - 320.0 * (t / 0.4).min(1.0)) >> saw()),
            HIT_SECS,
            |t| 0.6 * (1.0 - t / HIT_SECS).max(0.0),
        );

        // Rising major triad
        let arpeggio_secs = ARPEGGIO_NOTE_SECS * ARPEGGIO.len() as f32;
        let level_up = render(
            &mut (lfo(|t: f32| {
                ARPEGGIO[((t / ARPEGGIO_NOTE_SECS) as usize).min(ARPEGGIO.len() - 1)]
            }) >> triangle()),
            arpeggio_secs,
            |t| pluck(t, ARPEGGIO_NOTE_SECS),
        );

        let melody_secs = MELODY_NOTE_SECS * MELODY.len() as f32;
        let music = render(
            &mut (lfo(|t: f32| MELODY[(t / MELODY_NOTE_SECS) as usize % MELODY.len()])
                >> triangle()),
            melody_secs,
            |t| pluck(t, MELODY_NOTE_SECS),
        );

        Self {
            jump,
            hit,
            level_up,
            music,
        }
    }

    pub fn effect(&self, effect: SoundEffect) -> &[f32] {
        match effect {
            SoundEffect::Jump => &self.jump,
            SoundEffect::Hit => &self.hit,
            SoundEffect::LevelUp => &self.level_up,
        }
    }
}

/// Per-note decay that restarts on every note boundary
fn pluck(t: f32, note_secs: f32) -> f32 {
    let phase = (t % note_secs) / note_secs;
    0.4 + 0.5 * (1.0 - phase)
}

/// Render a mono generator for `seconds`, shaped by `gain(t)`
fn render(node: &mut dyn AudioUnit, seconds: f32, gain: impl Fn(f32) -> f32) -> Vec<f32> {
    let wave = Wave::render(SAMPLE_RATE as f64, seconds as f64, node);
    (0..wave.len())
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (wave.at(0, i) * gain(t)).clamp(-1.0, 1.0)
        })
        .collect()
}

fn buffer(samples: &[f32]) -> SamplesBuffer<f32> {
    SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec())
}

/// Plays the sound bank on the default output device
pub struct SynthSink {
    // Dropping the stream silences everything
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
    music: Option<Sink>,
}

impl SynthSink {
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let bank = SoundBank::render();
        log::info!(
            "Audio ready ({} Hz, {} samples of music)",
            SAMPLE_RATE,
            bank.music.len()
        );
        Ok(Self {
            _stream: stream,
            handle,
            bank,
            music: None,
        })
    }

    fn new_sink(&self) -> Option<Sink> {
        match Sink::try_new(&self.handle) {
            Ok(sink) => Some(sink),
            Err(e) => {
                log::warn!("Audio playback failed: {}", e);
                None
            }
        }
    }
}

impl AudioSink for SynthSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if let Some(sink) = self.new_sink() {
            sink.set_volume(volume);
            sink.append(buffer(self.bank.effect(effect)));
            sink.detach();
        }
    }

    fn start_music(&mut self, volume: f32) {
        self.stop_music();
        if let Some(sink) = self.new_sink() {
            sink.set_volume(volume);
            sink.append(buffer(&self.bank.music).repeat_infinite());
            self.music = Some(sink);
        }
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}
