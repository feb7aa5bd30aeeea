// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a pitch is, and which frequency it sounds at.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Lowest octave present in the frequency table.
pub const MIN_OCTAVE: u8 = 0;
/// Highest octave present in the frequency table.
pub const MAX_OCTAVE: u8 = 8;

/// Frequencies in Hz, indexed by octave and then by `PitchClass::index`.
const FREQUENCY_TABLE: [[f64; 12]; 9] = [
    [16.35, 17.32, 18.35, 19.45, 20.60, 21.83, 23.12, 24.50, 25.96, 27.50, 29.14, 30.87],
    [32.70, 34.65, 36.71, 38.89, 41.20, 43.65, 46.25, 49.00, 51.91, 55.00, 58.27, 61.74],
    [65.41, 69.30, 73.42, 77.78, 82.41, 87.31, 92.50, 98.00, 103.83, 110.00, 116.54, 123.47],
    [130.81, 138.59, 146.83, 155.56, 164.81, 174.61, 185.00, 196.00, 207.65, 220.00, 233.08, 246.94],
    [261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.00, 415.30, 440.00, 466.16, 493.88],
    [523.25, 554.37, 587.33, 622.25, 659.25, 698.46, 739.99, 783.99, 830.61, 880.00, 932.33, 987.77],
    [1046.50, 1108.73, 1174.66, 1244.51, 1318.51, 1396.91, 1479.98, 1567.98, 1661.22, 1760.00, 1864.66, 1975.53],
    [2093.00, 2217.46, 2349.32, 2489.02, 2637.02, 2793.83, 2959.96, 3135.96, 3322.44, 3520.00, 3729.31, 3951.07],
    [4186.01, 4434.92, 4698.63, 4978.03, 5274.04, 5587.65, 5919.91, 6271.93, 6644.88, 7040.00, 7458.62, 7902.13],
];

/// The twelve names of the chromatic scale, spelled with sharps only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in ascending order, starting at C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitones above C.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    fn from_name(name: &str) -> Option<PitchClass> {
        PitchClass::ALL.iter().copied().find(|class| class.name() == name)
    }
}

/// A pitch from the frequency table, e.g. the A in the fourth octave.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pitch {
    class: PitchClass,
    octave: u8,
}

impl Pitch {
    /// Returns `None` if the octave is not part of the frequency table.
    pub fn try_new(class: PitchClass, octave: u8) -> Option<Pitch> {
        if octave <= MAX_OCTAVE {
            Some(Pitch { class, octave })
        } else {
            None
        }
    }

    pub fn class(self) -> PitchClass {
        self.class
    }

    pub fn octave(self) -> u8 {
        self.octave
    }

    /// The frequency of this pitch in Hz.
    ///
    /// # Examples
    ///
    /// ```
    /// use chipboy::note::*;
    ///
    /// let a4: Pitch = "A 4".parse().unwrap();
    /// assert_eq!(a4.frequency(), 440.0);
    /// ```
    pub fn frequency(self) -> f64 {
        FREQUENCY_TABLE[self.octave as usize][self.class.index()]
    }

    /// Move one semitone up (`direction > 0`) or down (`direction < 0`).
    /// Crossing B/C changes the octave; the octave stays within the table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chipboy::note::*;
    ///
    /// let b4: Pitch = "B 4".parse().unwrap();
    /// assert_eq!(b4.step(1).to_string(), "C 5");
    /// assert_eq!(b4.step(1).step(-1), b4);
    /// ```
    pub fn step(self, direction: i32) -> Pitch {
        let mut index = self.class.index() as i32 + direction.signum();
        let mut octave = self.octave as i32;
        if index >= 12 {
            index = 0;
            octave += 1;
        } else if index < 0 {
            index = 11;
            octave -= 1;
        }
        Pitch {
            class: PitchClass::ALL[index as usize],
            octave: clamp_octave(octave),
        }
    }

    /// Move one octave up or down, clamped to the table.
    pub fn shift_octave(self, direction: i32) -> Pitch {
        Pitch {
            class: self.class,
            octave: clamp_octave(self.octave as i32 + direction.signum()),
        }
    }
}

fn clamp_octave(octave: i32) -> u8 {
    octave.max(MIN_OCTAVE as i32).min(MAX_OCTAVE as i32) as u8
}

/// Blank cells in the pattern editor start out at middle C.
impl Default for Pitch {
    fn default() -> Self {
        Pitch {
            class: PitchClass::C,
            octave: 4,
        }
    }
}

/// Parse the name of a pitch, either in the editor spelling `"C# 4"` or
/// in the compact spelling `"C#4"`.
///
/// # Examples
///
/// ```
/// # use chipboy::note::*;
///
/// assert_eq!("C# 4".parse::<Pitch>().unwrap(), "C#4".parse::<Pitch>().unwrap());
/// assert!("H 4".parse::<Pitch>().is_err());
/// assert!("C 9".parse::<Pitch>().is_err());
/// assert!("E# 2".parse::<Pitch>().is_err());
/// ```
impl FromStr for Pitch {
    type Err = Error;

    fn from_str(name: &str) -> Result<Pitch> {
        parse_pitch(name).ok_or_else(|| Error::UnknownPitch {
            name: name.to_string(),
        })
    }
}

fn parse_pitch(name: &str) -> Option<Pitch> {
    let class_len = name.find(|ch: char| ch == ' ' || ch.is_ascii_digit())?;
    let class = PitchClass::from_name(&name[..class_len])?;
    let rest = &name[class_len..];
    let octave_str = rest.strip_prefix(' ').unwrap_or(rest);
    if octave_str.is_empty() || !octave_str.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Pitch::try_new(class, octave_str.parse().ok()?)
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.class.name(), self.octave)
    }
}

/// Look up the frequency for a pitch name.
pub fn frequency(name: &str) -> Result<f64> {
    name.parse::<Pitch>().map(Pitch::frequency)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_lookup() {
        assert_eq!(frequency("C 0").unwrap(), 16.35);
        assert_eq!(frequency("C4").unwrap(), 261.63);
        assert_eq!(frequency("G5").unwrap(), 783.99);
        assert_eq!(frequency("B 8").unwrap(), 7902.13);
    }

    #[test]
    fn table_is_ascending() {
        let all: Vec<f64> = FREQUENCY_TABLE.iter().flatten().copied().collect();
        assert_eq!(all.len(), 108);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unknown_names() {
        for name in &["", "C", "c4", "C  4", "Db4", "C#", "C -1", "A 10", "A4 "] {
            assert_eq!(
                frequency(name),
                Err(Error::UnknownPitch {
                    name: name.to_string()
                }),
                "{:?}",
                name
            );
        }
    }

    #[test]
    fn display_round_trips_editor_spelling() {
        let pitch: Pitch = "F# 3".parse().unwrap();
        assert_eq!(pitch.to_string(), "F# 3");
        assert_eq!(pitch.to_string().parse::<Pitch>().unwrap(), pitch);
    }

    #[test]
    fn stepping_clamps_at_table_edges() {
        let lowest: Pitch = "C 0".parse().unwrap();
        assert_eq!(lowest.step(-1).to_string(), "B 0");
        assert_eq!(lowest.shift_octave(-1), lowest);

        let highest: Pitch = "B 8".parse().unwrap();
        assert_eq!(highest.step(1).to_string(), "C 8");
        assert_eq!(highest.shift_octave(1), highest);
    }

    #[test]
    fn octave_shift() {
        let a4: Pitch = "A 4".parse().unwrap();
        assert_eq!(a4.shift_octave(1).frequency(), 880.0);
        assert_eq!(a4.shift_octave(-1).frequency(), 220.0);
        assert_eq!(Pitch::default().to_string(), "C 4");
    }
}
