//! Single note events and how they turn into sound.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::envelope::ADSR;
use super::oscillator;
use crate::error::{Error, Result};
use crate::note::Pitch;
use crate::wave::SampleBuffer;

/// Volume of a note when none is given.
pub const DEFAULT_VOLUME: f64 = 0.1;

/// The timbre of a note.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Waveform {
    /// Pulse wave, high for the `duty_cycle` fraction of each period.
    Square { duty_cycle: f64 },
    /// Tiled half sine cycle.
    Sine,
    /// Tiled rising ramp.
    Sawtooth,
    /// White noise, ignoring the pitch.
    Noise,
}

impl Waveform {
    /// A symmetric square wave.
    pub fn square() -> Waveform {
        Waveform::Square {
            duty_cycle: oscillator::DEFAULT_DUTY_CYCLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Square { .. } => "square",
            Waveform::Sine => "sine",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Noise => "noise",
        }
    }

    /// Generate the raw, unshaped waveform for a note.
    pub fn generate<R: Rng>(
        self,
        frequency: f64,
        duration: f64,
        sample_rate: u32,
        volume: f64,
        rng: &mut R,
    ) -> SampleBuffer {
        match self {
            Waveform::Square { duty_cycle } => {
                oscillator::square(frequency, duration, sample_rate, volume, duty_cycle)
            }
            Waveform::Sine => oscillator::custom(
                &oscillator::half_sine_shape(oscillator::SINE_SHAPE_STEPS),
                frequency,
                duration,
                sample_rate,
                volume,
            ),
            Waveform::Sawtooth => oscillator::custom(
                &oscillator::SAWTOOTH_SHAPE,
                frequency,
                duration,
                sample_rate,
                volume,
            ),
            Waveform::Noise => oscillator::noise(duration, sample_rate, volume, rng),
        }
    }
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::square()
    }
}

/// Parse a waveform by name. `"square"` is the symmetric square wave.
///
/// ```
/// use chipboy::synth::event::Waveform;
///
/// assert_eq!("sawtooth".parse::<Waveform>().unwrap(), Waveform::Sawtooth);
/// assert!("triangle".parse::<Waveform>().is_err());
/// ```
impl FromStr for Waveform {
    type Err = Error;

    fn from_str(name: &str) -> Result<Waveform> {
        match name {
            "square" => Ok(Waveform::square()),
            "sine" => Ok(Waveform::Sine),
            "sawtooth" => Ok(Waveform::Sawtooth),
            "noise" => Ok(Waveform::Noise),
            _ => Err(Error::UnknownWaveform {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sound in a track: which pitch, when, how long, how loud and with which timbre.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteEvent {
    pitch: Pitch,
    frequency: f64,
    start_beat: f64,
    duration_beats: f64,
    volume: f64,
    waveform: Waveform,
}

/// A note turned into samples, positioned at `start_time` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedNote {
    pub start_time: f64,
    pub samples: SampleBuffer,
}

impl NoteEvent {
    pub fn new(
        pitch: Pitch,
        start_beat: f64,
        duration_beats: f64,
        volume: f64,
        waveform: Waveform,
    ) -> NoteEvent {
        NoteEvent {
            pitch,
            frequency: pitch.frequency(),
            start_beat,
            duration_beats,
            volume,
            waveform,
        }
    }

    /// Build a note from textual pitch and waveform names, as typed into the editor.
    ///
    /// # Examples
    ///
    /// ```
    /// use chipboy::synth::event::*;
    ///
    /// let note = NoteEvent::parse("A4", 0.0, 1.0, 0.1, "sine").unwrap();
    /// assert_eq!(note.frequency(), 440.0);
    /// assert!(NoteEvent::parse("A4", 0.0, 1.0, 0.1, "organ").is_err());
    /// assert!(NoteEvent::parse("A9", 0.0, 1.0, 0.1, "sine").is_err());
    /// ```
    pub fn parse(
        pitch: &str,
        start_beat: f64,
        duration_beats: f64,
        volume: f64,
        waveform: &str,
    ) -> Result<NoteEvent> {
        Ok(NoteEvent::new(
            pitch.parse()?,
            start_beat,
            duration_beats,
            volume,
            waveform.parse()?,
        ))
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn start_beat(&self) -> f64 {
        self.start_beat
    }

    pub fn duration_beats(&self) -> f64 {
        self.duration_beats
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// The same note, played `beat_offset` beats later.
    pub fn copy_with_offset_beats(&self, beat_offset: f64) -> NoteEvent {
        NoteEvent {
            start_beat: self.start_beat + beat_offset,
            ..self.clone()
        }
    }

    /// Synthesize this note at the given tempo.
    ///
    /// Only noise draws from `rng`; all other waveforms are fully determined by the note.
    pub fn render<R: Rng>(
        &self,
        bpm: f64,
        sample_rate: u32,
        envelope: &ADSR,
        rng: &mut R,
    ) -> RenderedNote {
        let seconds_per_beat = 60.0 / bpm;
        let start_time = self.start_beat * seconds_per_beat;
        let duration = self.duration_beats * seconds_per_beat;

        let wave = self
            .waveform
            .generate(self.frequency, duration, sample_rate, self.volume, rng);
        RenderedNote {
            start_time,
            samples: envelope.shape(wave, sample_rate),
        }
    }
}
