pub mod error;
pub mod note;
pub mod output;
pub mod synth;
pub mod wave;

// Building songs
pub mod demo;
pub mod sequencer;
pub mod track;

pub use error::{Error, Result};
