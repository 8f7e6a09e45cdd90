//! Headless stand-in for the hardware layer: drives the sequencer from a
//! simulated clock and prints the resulting pattern.

mod args;

use std::fs::File;
use std::time::Duration;

use eventseq_core::commands::SeqFeedback;
use eventseq_core::config::Config;
use eventseq_core::engine::SequenceEngine;
use eventseq_core::handle::SequencerHandle;
use eventseq_core::output::LogOutput;
use eventseq_types::{SequencerAction, StepParam};

use args::SimArgs;

fn init_logging(verbose: bool) {
    use simplelog::{LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("eventseq")
        .join("eventseq.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(_) => match File::create(std::env::temp_dir().join("eventseq.log")) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("logging disabled: {}", e);
                return;
            }
        },
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("logging disabled: {}", e);
        return;
    }

    log::info!("eventseq-sim starting (log level: {:?})", log_level);
}

fn main() {
    let args = match SimArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, args::USAGE);
            std::process::exit(2);
        }
    };
    if args.help {
        println!("{}", args::USAGE);
        return;
    }
    init_logging(args.verbose);

    let config = Config::load();
    let mut defaults = config.sequence();
    if let Some(length) = args.length {
        defaults.length = length;
    }
    if let Some(direction) = args.direction {
        defaults.direction = direction;
    }

    let engine = match SequenceEngine::from_defaults(&defaults) {
        Ok(engine) => engine.with_output(Box::new(LogOutput)),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let interval = if args.realtime {
        config.clock().tick_interval()
    } else {
        Duration::ZERO
    };

    let mut handle = SequencerHandle::spawn(engine);
    for tick in 0..args.ticks {
        if let Err(e) = handle.tick() {
            log::error!("tick {} failed: {}", tick, e);
            break;
        }
        // Record a ramp on the first lap so the output shows per-step storage.
        if tick < u32::from(defaults.length) {
            let value = ((tick + 1) * 100).min(u32::from(u16::MAX)) as u16;
            handle.send(SequencerAction::SetParam(StepParam::Sync, value));
            if tick % 2 == 0 {
                handle.send(SequencerAction::AddNote(36 + (tick % 24) as u8));
            }
        }
        for fb in handle.drain_feedback() {
            match fb {
                SeqFeedback::StepChanged { index, bank } => {
                    log::debug!("step {} bank {:?}", index, bank)
                }
                SeqFeedback::Error(e) => log::warn!("sequencer error: {}", e),
            }
        }
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    match handle.snapshot() {
        Ok(snapshot) => {
            if args.json {
                match snapshot.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("error: {}", e),
                }
            } else {
                let cursor = snapshot
                    .cursor
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "length={} steps={} cursor={} bank={:?} direction={}",
                    snapshot.length,
                    snapshot.steps.len(),
                    cursor,
                    snapshot.bank,
                    snapshot.direction.name()
                );
                println!("sync: {:?}", snapshot.lane(StepParam::Sync));
            }
        }
        Err(e) => eprintln!("error: {}", e),
    }
    handle.shutdown();
}
