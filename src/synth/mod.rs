//! This namespace contains all the parts converting from note data to wave data.

pub mod envelope;
pub mod event;
pub mod oscillator;

// Notes and waveforms are what songs are written in.
pub use event::*;
