mod input;

use anyhow::{Context, Result};
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use countdown_timeline::{BrushSelection, JenksBreaks, ScreenPoint, Timeline, WheelGesture, build_curve};
use input::Gesture;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "countdown")]
#[command(about = "Countdown timeline geometry from an event log")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// JSON file holding the event array
    #[arg(long, conflicts_with = "segment")]
    events: Option<PathBuf>,

    /// Base64 encoded event array, as carried in a timeline URL
    #[arg(long)]
    segment: Option<String>,

    /// Present time as RFC 3339 (defaults to the system clock)
    #[arg(long)]
    now: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the countdown curve
    Curve {
        #[command(flatten)]
        args: InputArgs,
    },
    /// Replay gestures and print the resulting frame
    Frame {
        #[command(flatten)]
        args: InputArgs,

        /// TOML configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Brush selection on the overview strip, `y0:y1`
        #[arg(long, value_parser = input::parse_brush, allow_hyphen_values = true)]
        brush: Vec<BrushSelection>,

        /// Wheel tick, `dy` to pan or `dy:mod` to zoom
        #[arg(long, value_parser = input::parse_wheel, allow_hyphen_values = true)]
        wheel: Vec<WheelGesture>,

        /// Pointer position in chart pixels, `x:y`
        #[arg(long, value_parser = input::parse_pointer, allow_hyphen_values = true)]
        pointer: Option<ScreenPoint>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if let Err(e) = run(cli, &matches) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> Result<()> {
    match cli.command {
        Commands::Curve { args } => {
            let events = input::load_events(args.events.as_deref(), args.segment.as_deref())?;
            let now = input::parse_now(args.now.as_deref())?;
            let curve = build_curve(&events, now);
            print_json(&curve)
        }
        Commands::Frame {
            args,
            config,
            brush,
            wheel,
            pointer,
        } => {
            let events = input::load_events(args.events.as_deref(), args.segment.as_deref())?;
            let now = input::parse_now(args.now.as_deref())?;
            let config = input::load_config(config.as_deref())?;
            let mut timeline = Timeline::new(events, now, config);

            let positions = |name: &str| -> Vec<usize> {
                matches
                    .subcommand_matches("frame")
                    .and_then(|frame| frame.indices_of(name))
                    .map(|indices| indices.collect())
                    .unwrap_or_default()
            };
            let gestures = input::interleave(brush, positions("brush"), wheel, positions("wheel"));

            for gesture in &gestures {
                let applied = match *gesture {
                    Gesture::Brush(selection) => timeline.apply_brush(selection),
                    Gesture::Wheel(wheel) => timeline.apply_wheel(wheel),
                };
                if !applied {
                    log::warn!("gesture {:?} had no effect", gesture);
                }
            }
            log::info!("replayed {} gestures", gestures.len());

            let frame = timeline.frame(pointer, &JenksBreaks);
            print_json(&frame)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
