// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

/// Number of samples covering `seconds` at the given sample rate, rounded to the nearest sample.
/// Negative and non-finite durations cover no samples.
///
/// ```
/// use chipboy::wave::sample_count;
///
/// assert_eq!(sample_count(0.5, 44100), 22050);
/// assert_eq!(sample_count(1.0 / 3.0, 10), 3);
/// assert_eq!(sample_count(std::f64::INFINITY, 44100), 0);
/// ```
pub fn sample_count(seconds: f64, sample_rate: u32) -> usize {
    let samples = (seconds * sample_rate as f64).round();
    if samples.is_finite() {
        samples.max(0.0) as usize
    } else {
        0
    }
}

/// A mono buffer holding floating point audio data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
}

impl SampleBuffer {
    /// A buffer of `sample_count` samples of silence.
    pub fn zeroed(sample_count: usize) -> Self {
        Self {
            samples: vec![0.0; sample_count],
        }
    }

    /// Size of the buffer in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Size of the buffer in bytes when streamed as `f64`.
    pub fn byte_len(&self) -> usize {
        self.len() * std::mem::size_of::<f64>()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.samples
    }

    /// Largest absolute sample value, zero for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| peak.max(s.abs()))
    }

    /// Add `other` onto this buffer, starting at sample `offset`.
    ///
    /// Whatever does not fit into this buffer is dropped.
    /// Returns the number of samples that were actually mixed in.
    ///
    /// ```
    /// use chipboy::wave::SampleBuffer;
    ///
    /// let mut out = SampleBuffer::from(vec![1.0; 4]);
    /// let mixed = out.mix_at(2, &SampleBuffer::from(vec![0.5; 3]));
    /// assert_eq!(mixed, 2);
    /// assert_eq!(out.samples(), &[1.0, 1.0, 1.5, 1.5]);
    /// ```
    pub fn mix_at(&mut self, offset: usize, other: &SampleBuffer) -> usize {
        if offset >= self.samples.len() {
            return 0;
        }
        let target = &mut self.samples[offset..];
        let mut mixed = 0;
        for (out, sample) in target.iter_mut().zip(other.samples.iter()) {
            *out += sample;
            mixed += 1;
        }
        mixed
    }

    /// Append a copy of `other` at the end of this buffer.
    pub fn append(&mut self, other: &SampleBuffer) {
        self.samples.extend_from_slice(&other.samples);
    }

    /// Append `sample_count` samples of silence.
    pub fn extend_silence(&mut self, sample_count: usize) {
        self.samples.resize(self.samples.len() + sample_count, 0.0);
    }

    /// Copy the `f64` samples to little-endian bytes.
    ///
    /// Returns the number of samples that were actually copied.
    /// Might be less than the number of input samples if the output buffer was not large enough.
    pub fn copy_bytes_to(&self, bytes: &mut [u8]) -> usize {
        let mut processed = 0;
        for (sample, target) in self.samples.iter().zip(bytes.chunks_exact_mut(8)) {
            target.copy_from_slice(&sample.to_le_bytes());
            processed += 1;
        }
        processed
    }
}

impl From<Vec<f64>> for SampleBuffer {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

impl std::iter::FromIterator<f64> for SampleBuffer {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mix_past_the_end_is_dropped() {
        let mut out = SampleBuffer::zeroed(3);
        assert_eq!(out.mix_at(3, &SampleBuffer::from(vec![1.0])), 0);
        assert_eq!(out.mix_at(10, &SampleBuffer::from(vec![1.0])), 0);
        assert_eq!(out, SampleBuffer::zeroed(3));
    }

    #[test]
    fn peak_is_absolute() {
        assert_eq!(SampleBuffer::default().peak(), 0.0);
        assert_eq!(SampleBuffer::from(vec![0.25, -2.0, 1.5]).peak(), 2.0);
    }

    #[test]
    fn silence_and_append() {
        let mut buf = SampleBuffer::from(vec![0.5, -0.5]);
        let copy = buf.clone();
        buf.append(&copy);
        buf.extend_silence(2);
        assert_eq!(buf.samples(), &[0.5, -0.5, 0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn bytes_are_little_endian() {
        let buf = SampleBuffer::from(vec![1.0, -0.5]);
        let mut bytes = vec![0u8; buf.byte_len()];
        assert_eq!(buf.copy_bytes_to(&mut bytes), 2);
        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[8..16], &(-0.5f64).to_le_bytes());
    }
}
