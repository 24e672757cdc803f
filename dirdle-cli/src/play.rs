use anyhow::Result;
use colored::Colorize;
use dirdle_game::{GameSession, GuessError, GuessResult, ShareMarks, flag_emoji};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Input the session refused, kept for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedGuess {
    pub input: String,
    pub reason: String,
}

impl RejectedGuess {
    fn new(input: &str, err: &GuessError) -> Self {
        Self {
            input: input.trim().to_string(),
            reason: err.to_string(),
        }
    }
}

fn check_mark(matched: bool) -> colored::ColoredString {
    if matched { "✔".green() } else { "✘".red() }
}

/// One console line describing a guess and its three comparisons.
pub fn format_guess_row(result: &GuessResult<'_>) -> String {
    let director = result.director;
    let flag = flag_emoji(&director.flag).unwrap_or_else(|| director.flag.clone());
    format!(
        "#{} {} ({}) {}  name {}  grad {}  flag {}",
        result.sequence,
        director.name.bold(),
        director.grad_date,
        flag,
        check_mark(result.name_match),
        check_mark(result.grad_date_match),
        check_mark(result.flag_match),
    )
}

/// Autocomplete lines for `prefix`, capped at `limit`.
pub fn suggestion_lines(session: &GameSession<'_>, prefix: &str, limit: usize) -> Vec<String> {
    session
        .suggestions_for(prefix)
        .take(limit)
        .map(|d| format!("{} ({})", d.name, d.grad_date))
        .collect()
}

/// Guesses from a `--guesses` list: comma or newline separated, blanks dropped.
pub fn split_guesses(list: &str) -> Vec<String> {
    list.split([',', '\n'])
        .map(str::trim)
        .filter(|guess| !guess.is_empty())
        .map(str::to_string)
        .collect()
}

/// Submit each guess in order, recording refusals instead of stopping.
pub fn replay(session: &mut GameSession<'_>, guesses: &[String]) -> Vec<RejectedGuess> {
    let mut rejected = Vec::new();
    for guess in guesses {
        if let Err(err) = session.submit_guess(guess) {
            log::warn!("replay guess {guess:?} refused: {err}");
            rejected.push(RejectedGuess::new(guess, &err));
        }
    }
    rejected
}

/// Interactive loop. Lines starting with `?` list suggestions; anything else
/// is a guess. Ends when the game is over or input runs out.
pub fn play<R, W>(
    session: &mut GameSession<'_>,
    input: R,
    out: &mut W,
    marks: &ShareMarks,
    suggestion_limit: usize,
) -> Result<Vec<RejectedGuess>>
where
    R: BufRead,
    W: Write,
{
    let mut rejected = Vec::new();
    let mut lines = input.lines();

    writeln!(
        out,
        "Guess today's director. Type {} for suggestions.",
        "?<text>".cyan()
    )?;

    while !session.is_over() {
        write!(
            out,
            "Guess {} ({} left): ",
            session.guesses_used() + 1,
            session.remaining_guesses()
        )?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        if let Some(prefix) = line.trim_start().strip_prefix('?') {
            let suggestions = suggestion_lines(session, prefix.trim(), suggestion_limit);
            if suggestions.is_empty() {
                writeln!(out, "  {}", "no matching directors".yellow())?;
            }
            for suggestion in suggestions {
                writeln!(out, "  {suggestion}")?;
            }
            continue;
        }

        match session.submit_guess(&line) {
            Ok(result) => writeln!(out, "{}", format_guess_row(&result))?,
            Err(err) if err.is_user_facing() => {
                writeln!(out, "  {}", err.to_string().yellow())?;
                rejected.push(RejectedGuess::new(&line, &err));
            }
            Err(err) => {
                rejected.push(RejectedGuess::new(&line, &err));
                break;
            }
        }
    }

    write_ending(session, out, marks)?;
    Ok(rejected)
}

fn write_ending<W: Write>(
    session: &GameSession<'_>,
    out: &mut W,
    marks: &ShareMarks,
) -> Result<()> {
    let Some(target) = session.revealed_target() else {
        writeln!(out, "{}", "Game left unfinished.".yellow())?;
        return Ok(());
    };
    writeln!(out)?;
    writeln!(out, "The director was {}.", target.name.bold())?;
    if let Some(share) = session.share_text(marks) {
        writeln!(out, "{share}")?;
    }
    Ok(())
}
