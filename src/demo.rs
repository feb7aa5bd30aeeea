//! A short built-in tune for trying out the sequencer.

use crate::error::Result;
use crate::sequencer::Sequencer;
use crate::synth::{NoteEvent, DEFAULT_VOLUME};
use crate::track::Track;

/// Length of the demo song in beats.
pub const LENGTH_BEATS: f64 = 12.0;

/// How many more times the demo is repeated after the first play-through.
pub const EXTRA_LOOPS: usize = 1;

fn track(name: &str, notes: &[(&str, f64, f64, f64, &str)]) -> Result<Track> {
    let mut track = Track::new(name);
    for &(pitch, start, duration, volume, waveform) in notes {
        track.add_note(NoteEvent::parse(pitch, start, duration, volume, waveform)?);
    }
    Ok(track)
}

/// Melody, bass line and hi-hats.
pub fn tracks() -> Result<Vec<Track>> {
    let melody = track(
        "melody",
        &[
            ("G5", 0.0, 4.0, 0.05, "sawtooth"),
            ("G5", 4.0, 1.0, 0.05, "sawtooth"),
            ("F5", 5.0, 3.0, 0.05, "sawtooth"),
            ("F5", 8.0, 1.0, 0.05, "sawtooth"),
            ("G5", 9.0, 3.0, 0.05, "sawtooth"),
        ],
    )?;

    let mut bass = track(
        "bass",
        &[
            ("C2", 0.0, 0.5, 0.3, "sawtooth"),
            ("C2", 0.5, 0.5, 0.3, "sawtooth"),
            ("E2", 1.0, 0.5, 0.3, "sawtooth"),
            ("E2", 1.5, 0.5, 0.3, "sawtooth"),
            ("C2", 2.0, 0.5, 0.3, "sawtooth"),
            ("C2", 2.5, 0.5, 0.3, "sawtooth"),
            ("B2", 3.0, 0.5, 0.3, "sawtooth"),
            ("B2", 3.5, 0.5, 0.3, "sawtooth"),
        ],
    )?;
    bass.loop_track(3, 4.0);

    let mut drums = track(
        "drums",
        &[
            ("C4", 0.0, 0.25, DEFAULT_VOLUME, "noise"),
            ("C4", 1.0, 0.25, DEFAULT_VOLUME, "noise"),
            ("C4", 2.0, 0.25, DEFAULT_VOLUME, "noise"),
            ("C4", 3.0, 0.25, DEFAULT_VOLUME, "noise"),
        ],
    )?;
    drums.loop_track(3, 4.0);

    Ok(vec![melody, bass, drums])
}

/// The demo tracks loaded into a sequencer.
pub fn song(bpm: f64, sample_rate: u32) -> Result<Sequencer> {
    let mut seq = Sequencer::new(bpm, sample_rate)?;
    for track in tracks()? {
        seq.add_track(track);
    }
    Ok(seq)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn phrases_are_looped() {
        let tracks = tracks().unwrap();
        let counts: Vec<usize> = tracks.iter().map(|t| t.notes().len()).collect();
        assert_eq!(counts, vec![5, 24, 12]);
        let last_hat = tracks[2].notes().last().unwrap();
        assert_eq!(last_hat.start_beat(), 11.0);
    }

    #[test]
    fn renders_whole_song() {
        let mut seq = song(120.0, 8000).unwrap().with_seed(5);
        let out = seq.render_looped(LENGTH_BEATS, EXTRA_LOOPS);
        // 6 seconds, played twice, plus the tail
        assert_eq!(out.len(), 2 * 48000 + 1600);
        assert!(out.peak() > 0.0 && out.peak() <= 1.0);
        assert_eq!(&out.samples()[..48000], &out.samples()[48000..96000]);
    }

    #[test]
    fn invalid_tempo_is_reported() {
        assert!(song(0.0, 44100).is_err());
        assert!(song(120.0, 0).is_err());
    }
}
