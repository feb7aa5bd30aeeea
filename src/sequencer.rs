// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Mixing all tracks of a song into one playable buffer.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::synth::envelope::ADSR;
use crate::track::Track;
use crate::wave::{self, SampleBuffer};

/// Default tempo in beats per minute.
pub const DEFAULT_BPM: f64 = 120.0;
/// Default number of samples per second.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Silence appended after the song so that playback does not stop abruptly.
pub const DEFAULT_TAIL_SECONDS: f64 = 0.2;

/// Owns the tempo and the tracks of a song and renders them together.
pub struct Sequencer {
    /// The speed of the song measured in beats per minute.
    bpm: f64,
    sample_rate: u32,
    /// The tracks of the song, playing simultaneously.
    tracks: Vec<Track>,
    /// Envelope every note is shaped with.
    envelope: ADSR,
    tail_seconds: f64,
    /// Source for noise.
    rng: StdRng,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::unchecked(DEFAULT_BPM, DEFAULT_SAMPLE_RATE)
    }
}

impl Sequencer {
    /// A sequencer without tracks, drawing noise from an OS-seeded generator.
    ///
    /// The tempo must be a positive, finite number and the sample rate must not be zero.
    ///
    /// ```
    /// use chipboy::sequencer::Sequencer;
    ///
    /// assert!(Sequencer::new(140.0, 22050).is_ok());
    /// assert!(Sequencer::new(0.0, 44100).is_err());
    /// assert!(Sequencer::new(120.0, 0).is_err());
    /// ```
    pub fn new(bpm: f64, sample_rate: u32) -> Result<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(Error::InvalidTempo { bpm });
        }
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }
        Ok(Self::unchecked(bpm, sample_rate))
    }

    fn unchecked(bpm: f64, sample_rate: u32) -> Self {
        Sequencer {
            bpm,
            sample_rate,
            tracks: Vec::new(),
            envelope: ADSR::default(),
            tail_seconds: DEFAULT_TAIL_SECONDS,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Make noise reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_tail(mut self, tail_seconds: f64) -> Self {
        self.tail_seconds = tail_seconds.max(0.0);
        self
    }

    pub fn with_envelope(mut self, envelope: ADSR) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn beats_to_seconds(&self, beats: f64) -> f64 {
        beats * 60.0 / self.bpm
    }

    /// Render `total_duration_beats` of every track and add them up.
    ///
    /// Each track is cut off at the end of the song on its own before mixing.
    /// The result is not normalized and may exceed the range `[-1, 1]`.
    pub fn render_combined(&mut self, total_duration_beats: f64) -> SampleBuffer {
        let duration = self.beats_to_seconds(total_duration_beats);
        let mut combined = SampleBuffer::zeroed(wave::sample_count(duration, self.sample_rate));
        info!(
            "rendering {} tracks at {} bpm, {} Hz: {} samples ({:.2} seconds)",
            self.tracks.len(),
            self.bpm,
            self.sample_rate,
            combined.len(),
            duration
        );

        for track in self.tracks.iter() {
            let rendered = track.render(
                self.bpm,
                duration,
                self.sample_rate,
                &self.envelope,
                &mut self.rng,
            );
            debug!(
                "track {:?}: {} notes, peak {:.3}",
                track.name(),
                track.notes().len(),
                rendered.peak()
            );
            combined.mix_at(0, &rendered);
        }

        combined
    }

    /// Scale the buffer down so that its loudest sample is exactly at full volume.
    /// Buffers that do not clip are returned unchanged.
    ///
    /// ```
    /// use chipboy::sequencer::Sequencer;
    /// use chipboy::wave::SampleBuffer;
    ///
    /// let loud = Sequencer::normalize(SampleBuffer::from(vec![0.5, -2.0, 1.0]));
    /// assert_eq!(loud.samples(), &[0.25, -1.0, 0.5]);
    /// let quiet = Sequencer::normalize(SampleBuffer::from(vec![0.5, -0.25]));
    /// assert_eq!(quiet.samples(), &[0.5, -0.25]);
    /// ```
    pub fn normalize(buffer: SampleBuffer) -> SampleBuffer {
        let peak = buffer.peak();
        if peak > 1.0 {
            debug!("normalizing peak {:.3}", peak);
            buffer.into_inner().into_iter().map(|s| s / peak).collect()
        } else {
            buffer
        }
    }

    /// Play a finished buffer `num_of_loops` more times and close it with the silence tail.
    pub fn loop_and_extend(&self, buffer: SampleBuffer, num_of_loops: usize) -> SampleBuffer {
        let tail = wave::sample_count(self.tail_seconds, self.sample_rate);
        let mut extended = buffer.clone();
        for _ in 0..num_of_loops {
            extended.append(&buffer);
        }
        extended.extend_silence(tail);
        extended
    }

    /// Render the song, normalize it and repeat it for playback.
    /// With `num_of_loops == 0`, the song is played once.
    pub fn render_looped(&mut self, total_duration_beats: f64, num_of_loops: usize) -> SampleBuffer {
        let combined = Self::normalize(self.render_combined(total_duration_beats));
        let looped = self.loop_and_extend(combined, num_of_loops);
        info!(
            "{} repetitions, {} samples in total",
            num_of_loops + 1,
            looped.len()
        );
        looped
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::synth::{NoteEvent, Waveform};

    fn track(name: &str, notes: &[(&str, f64, f64, f64, &str)]) -> Track {
        let mut track = Track::new(name);
        for &(pitch, start, duration, volume, waveform) in notes {
            track.add_note(NoteEvent::parse(pitch, start, duration, volume, waveform).unwrap());
        }
        track
    }

    #[test]
    fn combined_length_follows_tempo() {
        let mut seq = Sequencer::new(120.0, 44100).unwrap().with_seed(0);
        assert_eq!(seq.render_combined(4.0).len(), 88200);
        let mut seq = Sequencer::new(90.0, 8000).unwrap().with_seed(0);
        assert_eq!(seq.render_combined(3.0).len(), 16000);
    }

    #[test]
    fn tracks_are_summed() {
        let lead = track("lead", &[("A4", 0.0, 1.0, 0.3, "square")]);
        let bass = track("bass", &[("A2", 0.5, 1.0, 0.3, "sawtooth")]);

        let mut seq = Sequencer::default().with_seed(0);
        seq.add_track(lead.clone());
        seq.add_track(bass.clone());
        let combined = seq.render_combined(2.0);

        let duration = seq.beats_to_seconds(2.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut expected = lead.render(120.0, duration, 44100, &ADSR::default(), &mut rng);
        expected.mix_at(0, &bass.render(120.0, duration, 44100, &ADSR::default(), &mut rng));
        assert_eq!(combined, expected);
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let hats = track("hats", &[("C4", 0.0, 0.25, 0.1, "noise")]);
        let mut a = Sequencer::default().with_seed(42);
        let mut b = Sequencer::default().with_seed(42);
        a.add_track(hats.clone());
        b.add_track(hats);
        assert_eq!(a.render_combined(1.0), b.render_combined(1.0));
    }

    #[test]
    fn clipping_mix_is_normalized() {
        let loud = track(
            "loud",
            &[
                ("A4", 0.0, 1.0, 0.8, "square"),
                ("A4", 0.0, 1.0, 0.8, "square"),
            ],
        );
        let mut seq = Sequencer::default().with_seed(0);
        seq.add_track(loud);
        let combined = seq.render_combined(1.0);
        assert!(combined.peak() > 1.0);
        assert_eq!(Sequencer::normalize(combined).peak(), 1.0);
    }

    #[test]
    fn quiet_mix_is_untouched() {
        let quiet = track("quiet", &[("A4", 0.0, 1.0, 0.1, "sine")]);
        let mut seq = Sequencer::default().with_seed(0);
        seq.add_track(quiet);
        let combined = seq.render_combined(1.0);
        assert_eq!(Sequencer::normalize(combined.clone()), combined);
    }

    #[test]
    fn rejects_unplayable_settings() {
        for &bpm in &[0.0, -120.0, std::f64::INFINITY] {
            assert_eq!(
                Sequencer::new(bpm, 44100).err(),
                Some(Error::InvalidTempo { bpm })
            );
        }
        match Sequencer::new(std::f64::NAN, 44100) {
            Err(Error::InvalidTempo { bpm }) => assert!(bpm.is_nan()),
            other => panic!("unexpected {:?}", other.map(|seq| seq.bpm())),
        }
        assert_eq!(
            Sequencer::new(120.0, 0).err(),
            Some(Error::InvalidSampleRate)
        );
    }

    #[test]
    fn loop_and_extend_repeats_audio() {
        let seq = Sequencer::new(120.0, 1000).unwrap();
        let buf = SampleBuffer::from(vec![0.5, -1.0, 0.25]);
        let looped = seq.loop_and_extend(buf.clone(), 2);
        // three copies and 0.2 seconds of silence
        assert_eq!(looped.len(), 3 * 3 + 200);
        for copy in looped.samples()[..9].chunks(3) {
            assert_eq!(copy, buf.samples());
        }
        assert!(looped.samples()[9..].iter().all(|&s| s == 0.0));

        let once = seq.loop_and_extend(buf.clone(), 0);
        assert_eq!(once.len(), 3 + 200);
    }

    #[test]
    fn configurable_tail() {
        let seq = Sequencer::new(120.0, 1000).unwrap().with_tail(0.0);
        let buf = SampleBuffer::from(vec![0.5]);
        assert_eq!(seq.loop_and_extend(buf, 1).samples(), &[0.5, 0.5]);
    }

    #[test]
    fn looped_render() {
        let mut seq = Sequencer::new(120.0, 44100).unwrap().with_seed(1);
        seq.add_track(track(
            "drums",
            &[
                ("C4", 0.0, 0.25, 0.1, "noise"),
                ("C4", 1.0, 0.25, 0.1, "noise"),
            ],
        ));
        let out = seq.render_looped(2.0, 2);
        assert_eq!(out.len(), 3 * 44100 + 8820);
        assert_eq!(&out.samples()[..44100], &out.samples()[44100..88200]);
        assert!(out.peak() <= 1.0);
    }
}
