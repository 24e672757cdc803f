mod loader;
mod play;
mod reports;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use dirdle_game::{Director, GameEngine, SUGGESTION_DISPLAY_LIMIT, ShareMarks, parse_day, today};
use std::io::{Write, stdin, stdout};
use std::path::PathBuf;

use loader::{load_engine, load_share_marks};
use reports::{
    ReportFormat, ReportSink, SessionReport, write_schedule_report, write_session_report,
    write_suggestion_report,
};

const MAX_SCHEDULE_DAYS: i64 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Play today's puzzle interactively on stdin
    Play,
    /// Submit a comma-separated list of guesses and report the outcome
    Replay,
    /// List directors matching a prefix
    Suggest,
    /// Show upcoming targets (operator view, contains spoilers)
    Schedule,
}

#[derive(Debug, Parser)]
#[command(name = "dirdle", version)]
#[command(about = "Guess the director of the day - terminal front-end and operator tools")]
struct Args {
    /// What to do
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Puzzle day as YYYY-MM-DD (defaults to today in America/Chicago)
    #[arg(long)]
    date: Option<String>,

    /// JSON catalog to use instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Guesses to submit, comma or newline separated (replay mode)
    #[arg(long, default_value = "")]
    guesses: String,

    /// Text to match against director names (suggest mode)
    #[arg(long, default_value = "")]
    prefix: String,

    /// Maximum suggestions to show
    #[arg(long, default_value_t = SUGGESTION_DISPLAY_LIMIT)]
    limit: usize,

    /// Number of days to list (schedule mode, at most ten years)
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=MAX_SCHEDULE_DAYS))]
    days: u32,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// JSON file overriding share marks and wording
    #[arg(long)]
    share_config: Option<PathBuf>,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let engine = load_engine(args.catalog.as_deref())?;
    let marks = load_share_marks(args.share_config.as_deref())?;
    let day = resolve_day(args.date.as_deref())?;
    log::debug!("puzzle day {day}");

    let mut sink = ReportSink::open(args.output.as_deref())?;
    match args.mode {
        Mode::Play => run_play(&args, &engine, &marks, day, &mut sink)?,
        Mode::Replay => run_replay(&args, &engine, &marks, day, &mut sink)?,
        Mode::Suggest => run_suggest(&args, &engine, &mut sink)?,
        Mode::Schedule => {
            let picks = engine.schedule(day, args.days)?;
            write_schedule_report(sink.writer(), &picks, args.report)?;
        }
    }
    sink.finish()
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn resolve_day(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(text) => parse_day(text).context("bad --date"),
        None => Ok(today()),
    }
}

fn run_play(
    args: &Args,
    engine: &GameEngine,
    marks: &ShareMarks,
    day: NaiveDate,
    sink: &mut ReportSink,
) -> Result<()> {
    let mut session = engine.session_for(day)?;
    println!("{}", format!("🎬 Dirdle {}", dirdle_game::day_key(day)).bright_cyan().bold());

    let mut console = stdout().lock();
    let rejected = play::play(
        &mut session,
        stdin().lock(),
        &mut console,
        marks,
        args.limit,
    )?;
    console.flush()?;

    // The interactive transcript already covers the console view.
    if args.output.is_some() || args.report != ReportFormat::Console {
        let report = SessionReport {
            day,
            snapshot: session.snapshot(),
            share: session.share_text(marks),
            rejected,
        };
        write_session_report(sink.writer(), &report, args.report)?;
    }
    Ok(())
}

fn run_replay(
    args: &Args,
    engine: &GameEngine,
    marks: &ShareMarks,
    day: NaiveDate,
    sink: &mut ReportSink,
) -> Result<()> {
    let guesses = play::split_guesses(&args.guesses);
    if guesses.is_empty() {
        log::warn!("replay mode without --guesses; reporting an untouched session");
    }
    let mut session = engine.session_for(day)?;
    let rejected = play::replay(&mut session, &guesses);
    let report = SessionReport {
        day,
        snapshot: session.snapshot(),
        share: session.share_text(marks),
        rejected,
    };
    write_session_report(sink.writer(), &report, args.report)
}

fn run_suggest(args: &Args, engine: &GameEngine, sink: &mut ReportSink) -> Result<()> {
    let suggestions: Vec<&Director> = engine
        .catalog()
        .suggestions(&args.prefix)
        .take(args.limit)
        .collect();
    write_suggestion_report(sink.writer(), &args.prefix, &suggestions, args.report)
}
