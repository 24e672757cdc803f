use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use colored::Colorize;
use dirdle_game::{DailyPick, Director, GameStatus, SessionSnapshot, day_key};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use crate::play::RejectedGuess;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable, coloured when attached to a terminal
    Console,
    /// Pretty-printed JSON
    Json,
    /// Markdown suitable for pasting into an issue
    Markdown,
}

/// Where reports go: stdout, or the `--output` file.
pub struct ReportSink {
    out: BufWriter<Box<dyn Write>>,
    path: Option<PathBuf>,
}

impl ReportSink {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let out: Box<dyn Write> = match path {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            ),
            None => Box::new(stdout()),
        };
        Ok(Self {
            out: BufWriter::new(out),
            path: path.map(Path::to_path_buf),
        })
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    /// Flush buffered output, naming the file on failure.
    pub fn finish(mut self) -> Result<()> {
        let flushed = self.out.flush();
        match &self.path {
            Some(path) => flushed.with_context(|| format!("failed to write {}", path.display())),
            None => flushed.context("failed to write report to stdout"),
        }
    }
}

/// Everything worth reporting about one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub day: NaiveDate,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedGuess>,
}

fn status_label(status: GameStatus) -> colored::ColoredString {
    match status {
        GameStatus::InProgress => "IN PROGRESS".yellow(),
        GameStatus::Won => "WON".green(),
        GameStatus::Lost => "LOST".red(),
    }
}

fn yes_no(matched: bool) -> &'static str {
    if matched { "yes" } else { "no" }
}

pub fn write_session_report(
    out: &mut dyn Write,
    report: &SessionReport,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        ReportFormat::Markdown => generate_markdown_session(out, report)?,
        ReportFormat::Console => generate_console_session(out, report)?,
    }
    Ok(())
}

fn generate_console_session(out: &mut dyn Write, report: &SessionReport) -> Result<()> {
    let snapshot = &report.snapshot;
    writeln!(out, "{}", format!("📅 Dirdle {}", day_key(report.day)).bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;
    writeln!(out, "Status: {}", status_label(snapshot.status))?;
    writeln!(
        out,
        "Guesses: {} used, {} left",
        snapshot.guesses_used, snapshot.remaining_guesses
    )?;
    if let Some(target) = &snapshot.target {
        writeln!(out, "Target: {}", target.bold())?;
    }
    writeln!(out)?;

    for row in &snapshot.history {
        writeln!(
            out,
            "#{} {} ({}, {})  name {}  grad {}  flag {}",
            row.sequence,
            row.name,
            row.grad_date,
            row.flag,
            yes_no(row.name_match),
            yes_no(row.grad_date_match),
            yes_no(row.flag_match)
        )?;
    }

    if !report.rejected.is_empty() {
        writeln!(out)?;
        writeln!(out, "Refused input:")?;
        for rejected in &report.rejected {
            writeln!(out, "  • {:?}: {}", rejected.input, rejected.reason.red())?;
        }
    }

    if let Some(share) = &report.share {
        writeln!(out)?;
        writeln!(out, "{share}")?;
    }
    Ok(())
}

fn generate_markdown_session(out: &mut dyn Write, report: &SessionReport) -> Result<()> {
    let snapshot = &report.snapshot;
    writeln!(out, "# Dirdle {}\n", day_key(report.day))?;
    writeln!(out, "- **Status**: {}", snapshot.status)?;
    writeln!(out, "- **Guesses used**: {}", snapshot.guesses_used)?;
    writeln!(out, "- **Guesses left**: {}", snapshot.remaining_guesses)?;
    if let Some(target) = &snapshot.target {
        writeln!(out, "- **Target**: {target}")?;
    }
    writeln!(out)?;

    if !snapshot.history.is_empty() {
        writeln!(out, "| # | Director | Grad | Flag | Name | Grad | Flag |")?;
        writeln!(out, "|---|---|---|---|---|---|---|")?;
        for row in &snapshot.history {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} |",
                row.sequence,
                row.name,
                row.grad_date,
                row.flag,
                yes_no(row.name_match),
                yes_no(row.grad_date_match),
                yes_no(row.flag_match)
            )?;
        }
        writeln!(out)?;
    }

    if !report.rejected.is_empty() {
        writeln!(out, "## Refused input\n")?;
        for rejected in &report.rejected {
            writeln!(out, "- `{}`: {}", rejected.input, rejected.reason)?;
        }
        writeln!(out)?;
    }

    if let Some(share) = &report.share {
        writeln!(out, "## Share\n\n```\n{share}\n```")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ScheduleRow<'a> {
    day: String,
    index: usize,
    name: &'a str,
    grad_date: &'a str,
    flag: &'a str,
}

impl<'a> From<&DailyPick<'a>> for ScheduleRow<'a> {
    fn from(pick: &DailyPick<'a>) -> Self {
        Self {
            day: day_key(pick.day),
            index: pick.index,
            name: &pick.director.name,
            grad_date: &pick.director.grad_date,
            flag: &pick.director.flag,
        }
    }
}

pub fn write_schedule_report(
    out: &mut dyn Write,
    picks: &[DailyPick<'_>],
    format: ReportFormat,
) -> Result<()> {
    let rows: Vec<ScheduleRow<'_>> = picks.iter().map(ScheduleRow::from).collect();
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
        ReportFormat::Markdown => {
            writeln!(out, "# Dirdle target schedule\n")?;
            writeln!(out, "| Day | Index | Director | Grad | Flag |")?;
            writeln!(out, "|---|---|---|---|---|")?;
            for row in &rows {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} |",
                    row.day, row.index, row.name, row.grad_date, row.flag
                )?;
            }
        }
        ReportFormat::Console => {
            writeln!(out, "{}", "🗓  Target schedule".bright_yellow().bold())?;
            writeln!(out, "{}", "==================".yellow())?;
            for row in &rows {
                writeln!(
                    out,
                    "{}  [{:>3}]  {} ({}, {})",
                    row.day, row.index, row.name, row.grad_date, row.flag
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_suggestion_report(
    out: &mut dyn Write,
    prefix: &str,
    suggestions: &[&Director],
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, suggestions)?;
            writeln!(out)?;
        }
        ReportFormat::Markdown => {
            writeln!(out, "# Directors matching `{prefix}`\n")?;
            for director in suggestions {
                writeln!(out, "- {} ({})", director.name, director.grad_date)?;
            }
        }
        ReportFormat::Console => {
            if suggestions.is_empty() {
                writeln!(out, "{}", format!("No directors match {prefix:?}").yellow())?;
            }
            for director in suggestions {
                writeln!(out, "{} ({})", director.name, director.grad_date)?;
            }
        }
    }
    Ok(())
}
