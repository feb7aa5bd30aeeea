//! Getting rendered audio out of the program.

pub mod sox;
pub mod wav;

use std::io::{self, Write};
use std::path::Path;

use log::info;

use crate::wave::SampleBuffer;

/// Play the buffer on the default speakers, or write it to `outfile` if given.
pub fn play(buffer: &SampleBuffer, sample_rate: u32, outfile: Option<&Path>) -> io::Result<()> {
    match outfile {
        Some(path) => {
            info!("writing {} samples to {}", buffer.len(), path.display());
            wav::write_wav(path, buffer, sample_rate)
        }
        None => {
            info!(
                "playing {:.2} seconds at {} Hz",
                buffer.len() as f64 / sample_rate as f64,
                sample_rate
            );
            sox::with_sox_player(sample_rate, |audio_stream| {
                let mut bytes = vec![0u8; buffer.byte_len()];
                let n = buffer.copy_bytes_to(&mut bytes);
                debug_assert_eq!(n, buffer.len());
                audio_stream.write_all(&bytes)
            })
        }
    }
}
