//! Exporting rendered songs as WAV files.

use std::io;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::wave::SampleBuffer;

/// Write the buffer as a mono 32 bit float WAV file.
pub fn write_wav(path: &Path, buffer: &SampleBuffer, sample_rate: u32) -> io::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).map_err(into_io)?;
    for &sample in buffer.iter() {
        writer.write_sample(sample as f32).map_err(into_io)?;
    }
    writer.finalize().map_err(into_io)
}

fn into_io(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(err) => err,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}
