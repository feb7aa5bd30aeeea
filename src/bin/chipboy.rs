// chipboy -- a chiptune sequencer
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `chipboy` renders the built-in demo tune and plays it, or writes it to a WAV file.

use std::io;
use std::path::PathBuf;

use log::debug;
use structopt::StructOpt;

use chipboy::{demo, output};

#[derive(Debug, StructOpt)]
#[structopt(name = "chipboy", about = "A tiny chiptune sequencer")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Output WAV file. Music is played directly through sox if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Tempo in beats per minute.
    #[structopt(long, default_value = "120")]
    bpm: f64,

    /// Samples per second.
    #[structopt(long, default_value = "44100")]
    rate: u32,

    /// How many more times the rendered song is repeated.
    #[structopt(long, default_value = "1")]
    loops: usize,

    /// Length of the rendered song in beats.
    #[structopt(long)]
    beats: Option<f64>,

    /// Seed for the noise generator, for reproducible output.
    #[structopt(long)]
    seed: Option<u64>,

    /// Seconds of silence after the song.
    #[structopt(long, default_value = "0.2")]
    tail: f64,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    debug!("{:?}", opt);

    let mut seq = demo::song(opt.bpm, opt.rate)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .with_tail(opt.tail);
    if let Some(seed) = opt.seed {
        seq = seq.with_seed(seed);
    }

    let beats = opt.beats.unwrap_or(demo::LENGTH_BEATS);
    let audio = seq.render_looped(beats, opt.loops);
    output::play(&audio, seq.sample_rate(), opt.output.as_deref())
}
