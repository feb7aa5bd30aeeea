// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Generators producing a whole note worth of raw waveform at once.
//!
//! Square and noise generators return `floor(sample_rate * duration)` samples.
//! Cyclic waveforms are built from whole cycles only and may come out shorter
//! than that; callers must use the length of the returned buffer.

use rand::Rng;

use crate::wave::SampleBuffer;

/// Duty cycle of a symmetric square wave.
pub const DEFAULT_DUTY_CYCLE: f64 = 0.5;

/// Number of steps used for sampling the sine shape.
pub const SINE_SHAPE_STEPS: usize = 120;

/// One cycle of the sawtooth shape: a rising ramp.
pub const SAWTOOTH_SHAPE: [f64; 4] = [0.0, 0.33, 0.66, 1.0];

fn nominal_len(duration: f64, sample_rate: u32) -> usize {
    (sample_rate as f64 * duration).floor().max(0.0) as usize
}

/// A square wave alternating between `volume` and `-volume`.
/// It stays high for the first `duty_cycle` fraction of every period.
///
/// # Example
///
/// ```
/// use chipboy::synth::oscillator::*;
///
/// let wave = square(1.0, 1.0, 4, 0.5, DEFAULT_DUTY_CYCLE);
/// assert_eq!(wave.samples(), &[0.5, 0.5, -0.5, -0.5]);
/// ```
pub fn square(
    frequency: f64,
    duration: f64,
    sample_rate: u32,
    volume: f64,
    duty_cycle: f64,
) -> SampleBuffer {
    let len = nominal_len(duration, sample_rate);
    if len == 0 {
        return SampleBuffer::default();
    }
    // Sample times are spread evenly over `[0, duration)`.
    let dt = duration / len as f64;
    (0..len)
        .map(|i| {
            let phase = (i as f64 * dt * frequency).fract();
            if phase < duty_cycle {
                volume
            } else {
                -volume
            }
        })
        .collect()
}

/// White noise, uniformly distributed in `[-volume, volume]`.
pub fn noise<R: Rng>(
    duration: f64,
    sample_rate: u32,
    volume: f64,
    rng: &mut R,
) -> SampleBuffer {
    (0..nominal_len(duration, sample_rate))
        .map(|_| rng.random_range(-1.0..=1.0) * volume)
        .collect()
}

/// Tile a custom waveform cycle over the duration of a note.
///
/// `shape` describes one cycle. It is scaled so that its peak is exactly one,
/// linearly resampled to `floor(sample_rate / frequency)` samples and then
/// repeated for `floor(duration * frequency)` whole cycles.
///
/// # Example
///
/// ```
/// use chipboy::synth::oscillator::*;
///
/// // 4 samples per cycle, 2 whole cycles
/// let wave = custom(&[0.0, 2.0], 2.0, 1.2, 8, 1.0);
/// assert_eq!(wave.samples(), &[0.0, 0.5, 1.0, 1.0, 0.0, 0.5, 1.0, 1.0]);
/// ```
pub fn custom(
    shape: &[f64],
    frequency: f64,
    duration: f64,
    sample_rate: u32,
    volume: f64,
) -> SampleBuffer {
    if shape.is_empty() || frequency <= 0.0 {
        return SampleBuffer::default();
    }
    let cycle_len = (sample_rate as f64 / frequency).floor() as usize;
    if cycle_len == 0 {
        return SampleBuffer::default();
    }
    let cycle = resample_cycle(&normalize_shape(shape), cycle_len);
    let cycles = (duration * frequency).floor().max(0.0) as usize;

    let mut samples = Vec::with_capacity(cycle.len() * cycles);
    for _ in 0..cycles {
        samples.extend(cycle.iter().map(|s| s * volume));
    }
    SampleBuffer::from(samples)
}

/// Scale a shape so that its largest absolute value is one.
/// A silent shape stays silent.
fn normalize_shape(shape: &[f64]) -> Vec<f64> {
    let peak = shape.iter().fold(0.0f64, |peak, s| peak.max(s.abs()));
    if peak == 0.0 {
        return shape.to_vec();
    }
    shape.iter().map(|s| s / peak).collect()
}

/// Linearly interpolate `shape` at `len` evenly spaced points covering `[0, shape.len())`.
/// Points past the last shape value hold that value.
fn resample_cycle(shape: &[f64], len: usize) -> Vec<f64> {
    let last = shape.len() - 1;
    let step = shape.len() as f64 / len as f64;
    (0..len)
        .map(|j| {
            let x = j as f64 * step;
            let i = x.floor() as usize;
            if i >= last {
                shape[last]
            } else {
                let frac = x - i as f64;
                shape[i] + (shape[i + 1] - shape[i]) * frac
            }
        })
        .collect()
}

/// The sine shape: the rising half of a sine cycle from 0 to π in `steps` steps,
/// closed off with a final zero.
///
/// This is only half a period, so tiling it gives a rectified tone rather than a pure sine.
pub fn half_sine_shape(steps: usize) -> Vec<f64> {
    use std::f64::consts::PI;
    let step = PI / steps as f64;
    (0..steps)
        .map(|i| (i as f64 * step).sin())
        .chain(std::iter::once(0.0))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn nominal_lengths() {
        let mut rng = StdRng::seed_from_u64(0);
        for &(duration, rate) in &[(0.5, 44100), (0.3, 44100), (1.0 / 3.0, 8000), (0.0, 44100)] {
            let expected = (rate as f64 * duration).floor() as usize;
            assert_eq!(square(440.0, duration, rate, 0.1, 0.5).len(), expected);
            assert_eq!(noise(duration, rate, 0.1, &mut rng).len(), expected);
        }
    }

    #[test]
    fn custom_never_exceeds_nominal_length() {
        for &freq in &[55.0, 261.63, 440.0, 783.99, 3951.07] {
            for &duration in &[0.125, 0.25, 0.5, 2.0] {
                let wave = custom(&SAWTOOTH_SHAPE, freq, duration, 44100, 0.3);
                let cycle = (44100.0 / freq).floor() as usize;
                let cycles = (duration * freq).floor() as usize;
                assert_eq!(wave.len(), cycle * cycles);
                assert!(wave.len() <= (44100.0 * duration).floor() as usize);
            }
        }
    }

    #[test]
    fn square_duty_cycle_balance() {
        // 128 samples per period, 8 whole periods
        let wave = square(8.0, 1.0, 1024, 0.2, DEFAULT_DUTY_CYCLE);
        assert_eq!(wave.len(), 1024);
        let high = wave.iter().filter(|&&s| s == 0.2).count();
        let low = wave.iter().filter(|&&s| s == -0.2).count();
        assert_eq!(high + low, 1024);
        assert!((high as i64 - low as i64).abs() <= 1);
    }

    #[test]
    fn square_asymmetric_duty() {
        let wave = square(1.0, 1.0, 8, 1.0, 0.25);
        assert_eq!(wave.samples(), &[1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn noise_is_bounded_and_seedable() {
        let a = noise(0.1, 44100, 0.3, &mut StdRng::seed_from_u64(7));
        let b = noise(0.1, 44100, 0.3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.abs() <= 0.3));
        assert!(a.peak() > 0.0);
    }

    #[test]
    fn custom_shape_is_normalized() {
        let wave = custom(&[0.0, 0.5, -0.25], 100.0, 0.05, 44100, 0.5);
        assert!((wave.peak() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn silent_shape_stays_silent() {
        let wave = custom(&[0.0, 0.0], 100.0, 0.05, 44100, 0.5);
        assert!(!wave.is_empty());
        assert_eq!(wave.peak(), 0.0);
    }

    #[test]
    fn half_sine_shape_is_non_negative() {
        let shape = half_sine_shape(SINE_SHAPE_STEPS);
        assert_eq!(shape.len(), SINE_SHAPE_STEPS + 1);
        assert_eq!(shape[0], 0.0);
        assert_eq!(*shape.last().unwrap(), 0.0);
        assert!((shape[SINE_SHAPE_STEPS / 2] - 1.0).abs() < 1e-12);
        assert!(shape.iter().all(|&s| s >= 0.0));
    }
}
