// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! A track is the part of a song played by one instrument.

use log::trace;
use rand::Rng;

use crate::synth::envelope::ADSR;
use crate::synth::NoteEvent;
use crate::wave::{self, SampleBuffer};

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    name: String,
    notes: Vec<NoteEvent>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Track {
            name: name.into(),
            notes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_note(&mut self, note: NoteEvent) {
        self.notes.push(note);
    }

    /// The notes of this track in the order they were added.
    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    /// Render all notes into a buffer of `round(duration * sample_rate)` samples.
    ///
    /// Notes are added onto each other. Anything sounding past the end of the buffer is cut off.
    pub fn render<R: Rng>(
        &self,
        bpm: f64,
        duration: f64,
        sample_rate: u32,
        envelope: &ADSR,
        rng: &mut R,
    ) -> SampleBuffer {
        let mut output = SampleBuffer::zeroed(wave::sample_count(duration, sample_rate));

        for note in self.notes.iter() {
            let rendered = note.render(bpm, sample_rate, envelope, rng);
            let start_index = wave::sample_count(rendered.start_time, sample_rate);
            let mixed = output.mix_at(start_index, &rendered.samples);
            if mixed < rendered.samples.len() {
                trace!(
                    "{}: {} at sample {} cut off by {} samples",
                    self.name,
                    note.pitch(),
                    start_index,
                    rendered.samples.len() - mixed
                );
            }
        }

        output
    }

    /// Repeat the current notes so that the phrase is played `num_of_loops` times in total,
    /// each repetition starting `phrase_duration_beats` after the previous one.
    ///
    /// # Example
    ///
    /// ```
    /// use chipboy::synth::*;
    /// use chipboy::track::Track;
    ///
    /// let mut hats = Track::new("hats");
    /// hats.add_note(NoteEvent::parse("C4", 0.0, 0.25, 0.1, "noise").unwrap());
    /// hats.add_note(NoteEvent::parse("C4", 2.0, 0.25, 0.1, "noise").unwrap());
    /// hats.loop_track(2, 4.0);
    /// let starts: Vec<f64> = hats.notes().iter().map(|n| n.start_beat()).collect();
    /// assert_eq!(starts, vec![0.0, 2.0, 4.0, 6.0]);
    /// ```
    pub fn loop_track(&mut self, num_of_loops: usize, phrase_duration_beats: f64) {
        let phrase_len = self.notes.len();
        for i in 1..num_of_loops {
            let beat_offset = i as f64 * phrase_duration_beats;
            for n in 0..phrase_len {
                let copy = self.notes[n].copy_with_offset_beats(beat_offset);
                self.notes.push(copy);
            }
        }
    }
}
