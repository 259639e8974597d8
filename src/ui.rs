//! Terminal front-end for an evaluation session.
//!
//! Rendering glue only: everything shown here is read through the session's
//! accessors and every mutation goes through `advance`/`retreat`. The loop
//! owns the decision of when to re-render and when to persist (on observing
//! the completing transition).

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::error;

use crate::results::{self, SavedRecord};
use crate::session::{RatingInput, Session, SessionError, Transition};

const INSTRUCTIONS: &str = "\
Text-to-Reverb Subjective Evaluation
====================================
1. Listen carefully to both audio samples.
2. Read the text description thoroughly.
3. Rate the overall reverb quality and how well the reverb matches the
   text description.

Rating scale: 1 = Very Poor/No Match, 2 = Poor, 3 = Acceptable,
              4 = Good, 5 = Excellent

At each item, enter two scores (`<quality> <match>`) and press Enter to
continue. Press Enter on an empty line to keep the shown scores. Enter
`p` (optionally with scores) to go back to the previous item.";

enum Command {
    Advance(RatingInput),
    Retreat(RatingInput),
}

/// Drive `session` to completion over stdin/stdout and persist the result.
pub fn run(session: &mut Session, results_dir: &Path) -> io::Result<Option<SavedRecord>> {
    let stdin = io::stdin();
    run_with_io(session, results_dir, &mut stdin.lock(), &mut io::stdout())
}

fn run_with_io<R: BufRead, W: Write>(
    session: &mut Session,
    results_dir: &Path,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<SavedRecord>> {
    writeln!(out, "{INSTRUCTIONS}")?;

    while !session.is_complete() {
        render_current(session, out)?;
        let Some(line) = read_line(input)? else {
            writeln!(out, "\nInput closed before completion; nothing was saved.")?;
            return Ok(None);
        };

        let command = match parse_command(&line, session.current_scores()) {
            Ok(cmd) => cmd,
            Err(msg) => {
                writeln!(out, "  ! {msg}")?;
                continue;
            }
        };

        let result = match command {
            Command::Advance(scores) => session.advance(scores),
            Command::Retreat(scores) => {
                if !session.can_retreat() {
                    writeln!(out, "  ! already at the first item")?;
                    continue;
                }
                session.retreat(scores)
            }
        };
        match result {
            Ok(Transition::Completed) => break,
            Ok(_) => {}
            Err(err @ SessionError::InvalidRating { .. }) => {
                writeln!(out, "  ! {err}")?;
            }
        }
    }

    finish(session, results_dir, out)
}

fn render_current<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let Some(sample) = session.current_sample() else {
        return Ok(());
    };
    let (cursor, total) = session.progress();
    let scores = session.current_scores();

    writeln!(out, "\n--- Sample {}/{} ---", cursor + 1, total)?;
    writeln!(out, "Text description: {}", sample.text_prompt)?;
    writeln!(out, "Dry audio:        {}", sample.dry_audio.display())?;
    writeln!(out, "With reverb:      {}", sample.wet_audio.display())?;
    writeln!(
        out,
        "Current scores:   quality={} match={}",
        scores.quality, scores.text_match
    )?;
    write!(out, "> ")?;
    out.flush()
}

/// On completion, flush the record and show the citation reference. A failed
/// write leaves the session complete but unsaved, and says so.
fn finish<W: Write>(
    session: &Session,
    results_dir: &Path,
    out: &mut W,
) -> io::Result<Option<SavedRecord>> {
    writeln!(out, "\nEvaluation complete. Thank you for your participation.")?;
    match results::persist_session(results_dir, session.ratings()) {
        Ok(saved) => {
            writeln!(
                out,
                "Your responses have been saved. Reference ID: {}",
                saved.reference
            )?;
            Ok(Some(saved))
        }
        Err(err) => {
            error!("failed to persist session record: {err}");
            writeln!(
                out,
                "WARNING: your responses could NOT be saved ({err}).\n\
                 The session is complete but unsaved; do not close this \
                 terminal before exporting the ratings."
            )?;
            Ok(None)
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// An empty line advances with the displayed scores; `p` retreats; one or two
/// leading tokens override the scores. Range checking happens in the session,
/// not here.
fn parse_command(line: &str, shown: RatingInput) -> Result<Command, String> {
    let mut tokens = line.split_whitespace().peekable();

    let retreat = matches!(tokens.peek(), Some(&"p") | Some(&"prev"));
    if retreat {
        tokens.next();
    }

    let scores = match (tokens.next(), tokens.next()) {
        (None, _) => shown,
        (Some(q), Some(m)) => RatingInput {
            quality: parse_score(q)?,
            text_match: parse_score(m)?,
        },
        (Some(_), None) => return Err("enter both scores: <quality> <match>".to_string()),
    };
    if tokens.next().is_some() {
        return Err("too many values; expected <quality> <match>".to_string());
    }

    if retreat {
        Ok(Command::Retreat(scores))
    } else {
        Ok(Command::Advance(scores))
    }
}

fn parse_score(token: &str) -> Result<i32, String> {
    token
        .parse()
        .map_err(|_| format!("not a number: {token:?}"))
}

#[cfg(test)]
#[path = "../tests/src_inline/ui.rs"]
mod tests;
