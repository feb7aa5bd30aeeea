use crate::wave::SampleBuffer;

/// An Attack-Decay-Sustain-Release envelope applied to a whole rendered note.
/// The amplitude first rises from zero to one over `attack` seconds,
/// then decays over an additional `decay` seconds to the `sustain` level where it is held
/// until the last `release` seconds of the note, in which it falls back to zero.
///
/// Segment lengths are truncated to whole samples. The release always occupies the last
/// `release` seconds of the note, so the curve ends at zero. When attack, decay and release
/// do not fit into the note together, there is no sustain phase and the release cuts into
/// the decay, or even the attack. Notes shorter than the release are cut off instead.
///
/// # Example
///
/// ```
/// use chipboy::synth::envelope::*;
/// let e = ADSR {
///     attack: 0.5,
///     decay: 0.5,
///     sustain: 0.5,
///     release: 0.75,
/// };
/// // 4 samples per second
/// assert_eq!(e.curve(8, 4), vec![0.0, 1.0, 1.0, 0.5, 0.5, 0.5, 0.25, 0.0]);
/// // Too short for a sustain phase
/// assert_eq!(e.curve(6, 4), vec![0.0, 1.0, 1.0, 0.5, 0.25, 0.0]);
/// // Only the release fits
/// assert_eq!(e.curve(3, 4), vec![0.5, 0.25, 0.0]);
/// // Shorter than the release
/// assert_eq!(e.curve(2, 4), vec![0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ADSR {
    /// Time in seconds to go from 0.0 to 1.0
    pub attack: f64,
    /// Time in seconds to go from 1.0 to `sustain`.
    pub decay: f64,
    /// Constant amplitude between decay and release.
    pub sustain: f64,
    /// Time in seconds to go from `sustain` to 0.0.
    pub release: f64,
}

/// The short percussive envelope every note is played with.
impl Default for ADSR {
    fn default() -> Self {
        ADSR {
            attack: 0.01,
            decay: 0.1,
            sustain: 1.0,
            release: 0.1,
        }
    }
}

impl ADSR {
    /// The gain for each of `len` samples.
    pub fn curve(&self, len: usize, sample_rate: u32) -> Vec<f64> {
        let samples = |seconds: f64| (seconds * sample_rate as f64).floor().max(0.0) as usize;
        let attack_len = samples(self.attack);
        let decay_len = samples(self.decay);
        let release_len = samples(self.release);
        let sustain_len = len.saturating_sub(attack_len + decay_len + release_len);

        let mut curve = Vec::with_capacity(attack_len + decay_len + sustain_len + release_len);
        curve.extend(linspace(0.0, 1.0, attack_len));
        curve.extend(linspace(1.0, self.sustain, decay_len));
        curve.extend(std::iter::repeat(self.sustain).take(sustain_len));
        if let Some(release_start) = len.checked_sub(release_len) {
            // The release is pinned to the end of the note.
            curve.resize(release_start, 0.0);
            curve.extend(linspace(self.sustain, 0.0, release_len));
        } else {
            curve.extend(linspace(self.sustain, 0.0, release_len));
            curve.truncate(len);
        }
        curve
    }

    /// Multiply the buffer with the envelope curve. The length of the buffer is unchanged.
    pub fn shape(&self, buffer: SampleBuffer, sample_rate: u32) -> SampleBuffer {
        let curve = self.curve(buffer.len(), sample_rate);
        buffer
            .into_inner()
            .into_iter()
            .zip(curve)
            .map(|(sample, gain)| sample * gain)
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `stop`, both inclusive.
/// A single value is just `start`.
fn linspace(start: f64, stop: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (stop - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| if i + 1 == n && n > 1 { stop } else { start + step * i as f64 })
}
