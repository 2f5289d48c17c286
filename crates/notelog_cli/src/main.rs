//! CLI smoke and replay entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notelog_core` linkage.
//! - Replay newline-delimited command arrays from stdin through one session
//!   and print every publication, for quick local checks of UI traffic.
//!
//! Each stdin line is a JSON array of strings, e.g.
//! `["UpdateNoteCommand","id:number","1","text","hi"]`. Blank lines are skipped.

use notelog_core::{NoteSession, SessionConfig};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("notelog_core ping={}", notelog_core::ping());
    println!("notelog_core version={}", notelog_core::core_version());

    let publisher = |log: &[String]| {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "publish events={}", log.len());
        for event in log {
            let _ = writeln!(stdout, "  {event}");
        }
    };
    let mut session = match NoteSession::new(SessionConfig::default(), publisher) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("session start failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut rejected = 0usize;
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line_no = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("stdin read failed at line {line_no}: {err}");
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let tokens = match serde_json::from_str::<Vec<String>>(&line) {
            Ok(tokens) => tokens,
            Err(err) => {
                rejected += 1;
                eprintln!("line {line_no}: not a JSON string array: {err}");
                continue;
            }
        };

        match session.dispatch_raw(tokens.as_slice()) {
            Ok(outcome) => {
                if let Some(delay) = outcome.focus_delay() {
                    println!("focus note-editor after={}ms", delay.as_millis());
                }
            }
            Err(err) => {
                rejected += 1;
                eprintln!("line {line_no}: {err}");
            }
        }
    }

    println!(
        "session={} events={} rejected={}",
        session.id(),
        session.events().len(),
        rejected
    );
    ExitCode::SUCCESS
}
