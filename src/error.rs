// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Configuration errors reported while assembling a song.

use snafu::Snafu;

/// Mistakes in the description of a song.
///
/// These are never substituted with defaults: an unknown pitch or waveform
/// means the song was written wrong.
#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("Unknown pitch {:?}, expected e.g. \"C# 4\" or \"A4\"", name))]
    UnknownPitch { name: String },
    #[snafu(display(
        "Unknown waveform {:?}, expected one of square, sine, sawtooth, noise",
        name
    ))]
    UnknownWaveform { name: String },
    #[snafu(display("Invalid tempo {} bpm, must be positive", bpm))]
    InvalidTempo { bpm: f64 },
    #[snafu(display("Sample rate must not be zero"))]
    InvalidSampleRate,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
