//! Easy interface for getting sound to play using a sox subprocess.
use std::io;
use std::process::{Command, Stdio};

/// Spawn the sox `play` command reading mono little-endian `f64` samples from stdin,
/// let `callback` write the audio and wait until playback has finished.
pub fn with_sox_player<R, F: FnOnce(&mut dyn io::Write) -> io::Result<R>>(
    sample_rate: u32,
    callback: F,
) -> io::Result<R> {
    let mut player = Command::new("play")
        .arg("--channels")
        .arg("1")
        .arg("--rate")
        .arg(format!("{}", sample_rate))
        .arg("--type")
        .arg("f64")
        .arg("/dev/stdin")
        .stdin(Stdio::piped())
        .spawn()?;

    let mut audio_stream = player
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "sox has no stdin"))?;

    let result = callback(&mut audio_stream);

    drop(audio_stream);
    let status = player.wait()?;
    if !status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sox exited with {}", status),
        ));
    }

    result
}
