//! Ticker Client — a console stand-in for the rotating display device. It polls the
//! frames server (or renders a saved provider snapshot offline), then shows each frame in
//! turn for a fixed dwell time, exactly as the device would cycle through them.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_client --url http://192.168.0.10:8080/frames --interval-secs 30
//! ticker_client --snapshot ./captured.json --symbols AAPL,TSLA --once
//! ```
#![warn(missing_docs)]
mod args;
mod display;
mod error;
mod poller;

use crate::args::Args;
use crate::display::frame_line;
use crate::error::Result;
use crate::poller::FrameSource;
use chrono::Local;
use clap::Parser;
use log::{error, info};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};
use ticker_common::{DisplayConfig, Symbol};

/// Granularity of shutdown checks while sleeping.
const TICK: Duration = Duration::from_millis(100);

/// Sleep for `duration`, waking early when `shutdown` is set.
fn sleep_unless_shutdown(duration: Duration, shutdown: &AtomicBool) {
    let deadline = Instant::now() + duration;
    while !shutdown.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(TICK.min(deadline - now));
    }
}

fn build_source(args: &Args) -> Result<FrameSource> {
    match &args.snapshot {
        Some(path) => {
            let symbols = match &args.symbols {
                Some(list) => Symbol::parse_list(list)?,
                None => Symbol::defaults(),
            };
            let config = DisplayConfig {
                symbols,
                max_frame_text_length: args.max_text_length,
                ..DisplayConfig::default()
            };
            config.validate()?;
            info!("Rendering snapshot file {}", path.display());
            Ok(FrameSource::offline(path.clone(), config))
        }
        None => {
            info!("Polling {}", args.url);
            FrameSource::remote(&args.url)
        }
    }
}

/// Show one rotation of frames, honouring shutdown between frames.
fn show_rotation(source: &FrameSource, args: &Args, shutdown: &AtomicBool) {
    match source.next_frames() {
        Ok(response) => {
            for frame in &response.frames {
                if shutdown.load(Ordering::Relaxed) {
                    return;
                }
                println!("{}", frame_line(frame, Local::now()));
                sleep_unless_shutdown(args.dwell(), shutdown);
            }
        }
        Err(e) => error!("Failed to get frames: {}", e),
    }
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })?;
    }

    let source = build_source(&args)?;
    info!("Client is running. Press Ctrl+C to exit.");

    while !shutdown.load(Ordering::Relaxed) {
        let started = Instant::now();
        show_rotation(&source, &args, &shutdown);
        if args.once {
            break;
        }
        sleep_unless_shutdown(args.interval().saturating_sub(started.elapsed()), &shutdown);
    }
    info!("Client stopping...");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
