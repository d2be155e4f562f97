/// The interactive ranking loop.
///
/// Shows whatever the session is asking, reads one command per line, applies
/// it, and reports the resulting events. Engine errors are printed and the
/// loop carries on; only IO errors end it.
use pairrank_core::{Prompt, RankError, SessionEvent, Session};
use std::io::{self, BufRead, Write};

use crate::output::render_table;
use crate::parse::{Command, HELP, parse_command};
use crate::prompt::{describe_event, render_comparison, render_matchup};

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The queue ran dry.
    Finished,
    /// The user typed quit.
    Quit,
    /// Input ended before the session finished.
    EndOfInput,
}

fn show_prompt<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    match session.prompt() {
        Prompt::Matchup { a, b } => writeln!(out, "\n{}", render_matchup(a, b)),
        Prompt::Compare { target, opponent, opponent_rank, ticket } => writeln!(
            out,
            "\n{}",
            render_comparison(target, opponent, opponent_rank, session.ranked().len(), ticket.sequence + 1)
        ),
        Prompt::Paused { next } => {
            let next = next.map(|i| i.name.as_str()).unwrap_or("nothing");
            writeln!(out, "\nPaused. Next up: {next}. Type r to resume or p <name> to pick an item.")
        }
        Prompt::NotStarted | Prompt::Complete => Ok(()),
    }
}

fn report<W: Write>(result: pairrank_core::Result<Vec<SessionEvent>>, out: &mut W) -> io::Result<()> {
    match result {
        Ok(events) => {
            for event in &events {
                if let Some(line) = describe_event(event) {
                    writeln!(out, "  {line}")?;
                }
            }
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "command rejected");
            writeln!(out, "  ! {}", user_message(&e))
        }
    }
}

fn user_message(e: &RankError) -> String {
    match e {
        RankError::UnknownItem(name) => format!("\"{name}\" isn't waiting to be ranked"),
        other => other.to_string(),
    }
}

fn pick<W: Write>(session: &mut Session, left: bool, out: &mut W) -> io::Result<()> {
    let result = match session.prompt() {
        Prompt::Matchup { .. } => session.bootstrap(left),
        Prompt::Compare { ticket, .. } => session.answer(ticket, left),
        _ => {
            return writeln!(out, "  ! Nothing to choose right now");
        }
    };
    report(result, out)
}

fn list<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let scored = session.scores();
    if scored.is_empty() {
        return writeln!(out, "  Nothing ranked yet.");
    }
    let rows: Vec<_> = scored.iter().map(|r| (r.rank, r.score, r.item)).collect();
    let progress = session.progress();
    write!(out, "{}", render_table(&rows))?;
    writeln!(out, "  {} of {} ranked, {} waiting", progress.ranked, progress.total, session.queue().len())
}

/// Drive `session` from `input` until it completes, the user quits, or input ends.
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> io::Result<Exit> {
    report(Ok(session.begin()), out)?;
    let mut lines = input.lines();

    loop {
        if session.is_complete() {
            return Ok(Exit::Finished);
        }
        show_prompt(session, out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(Exit::EndOfInput);
        };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "  ! {msg}")?;
                continue;
            }
        };

        match command {
            Command::PickLeft => pick(session, true, out)?,
            Command::PickRight => pick(session, false, out)?,
            Command::Skip => report(session.skip(), out)?,
            Command::Cancel => report(session.cancel(), out)?,
            Command::Resume => report(session.resume(), out)?,
            Command::Prioritize(name) => report(session.prioritize(&name), out)?,
            Command::Remove(rank) => report(session.remove(rank), out)?,
            Command::List => list(session, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Exit::Quit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairrank_core::{Category, Item, SessionConfig};
    use std::io::Cursor;

    fn session(names: &[&str]) -> Session {
        let pool = names.iter().map(|n| Item::new(*n, "Goose", Category::Original, 1)).collect();
        Session::new(pool, SessionConfig::default()).unwrap()
    }

    fn ranked(session: &Session) -> Vec<&str> {
        session.ranked().iter().map(|i| i.id()).collect()
    }

    fn drive(session: &mut Session, script: &str) -> (Exit, String) {
        let mut out = Vec::new();
        let exit = run(session, Cursor::new(script.to_string()), &mut out).unwrap();
        (exit, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_full_run() {
        let mut s = session(&["A", "B", "C", "D", "E"]);
        // Always preferring the ranked item keeps pool order: 1 matchup + 2 + 2 + 3 comparisons.
        let (exit, out) = drive(&mut s, "1\n2\n2\n2\n2\n2\n2\n2\n");
        assert_eq!(exit, Exit::Finished);
        assert_eq!(ranked(&s), vec!["A", "B", "C", "D", "E"]);
        assert!(out.contains("#1 A, #2 B"));
        assert!(out.contains("All done: 5 ranked"));
    }

    #[test]
    fn test_quit_and_end_of_input() {
        let mut s = session(&["A", "B", "C"]);
        let (exit, _) = drive(&mut s, "q\n");
        assert_eq!(exit, Exit::Quit);

        let mut s = session(&["A", "B", "C"]);
        let (exit, _) = drive(&mut s, "1\n");
        assert_eq!(exit, Exit::EndOfInput);
        assert_eq!(ranked(&s), vec!["A", "B"]);
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let mut s = session(&["A", "B", "C"]);
        let (exit, out) = drive(&mut s, "huh\nr\np Nope\n1\n1\n");
        assert_eq!(exit, Exit::Finished);
        assert!(out.contains("Unknown command"));
        assert!(out.contains("session is not paused"));
        assert!(out.contains("\"Nope\" isn't waiting to be ranked"));
        assert_eq!(ranked(&s), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_cancel_resume_and_skip() {
        let mut s = session(&["A", "B", "C", "D"]);
        let (exit, out) = drive(&mut s, "1\nc\nr\ns\n");
        assert_eq!(exit, Exit::EndOfInput);
        assert!(out.contains("Stopped ranking C"));
        assert!(out.contains("Paused. Next up: C."));
        assert!(out.contains("Skipped C"));
        let queue: Vec<&str> = s.queue().iter().map(|i| i.id()).collect();
        assert_eq!(queue, vec!["D", "C"]);
    }

    #[test]
    fn test_list_and_remove() {
        let mut s = session(&["A", "B", "C"]);
        let (_, out) = drive(&mut s, "1\nl\nd 1\n");
        assert!(out.contains("2 of 3 ranked, 1 waiting"));
        assert!(out.contains("Removed A from #1"));
        assert_eq!(ranked(&s), vec!["B"]);
    }
}
