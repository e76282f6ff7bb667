//! Interactive session on stdin.
//!
//! Every plain line is treated as a finalized utterance. Lines starting with
//! `:` stand in for the buttons a graphical front end would offer.

use anyhow::Result;
use basket_core::{
    AssistantConfig, Catalog, Dispatcher, Locale, Session, SpeechEvent, StatusMessage,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const HELP: &str = "\
Say a command, e.g. \"add 2 apples\", \"remove milk\", \"find toothpaste under 5\".
Controls:
  :start | :stop          toggle listening
  :interim <text>         show interim text without running it
  :add <name>             add one (as if picking a suggestion)
  :inc <n> | :dec <n>     +1 / -1 on list entry n
  :qty <n> <value>        type a quantity for entry n
  :rm <n>                 remove entry n
  :locale <tag>           switch locale (en-IN, en-US, hi-IN)
  :error <code>           simulate a recognizer error
  :clear                  clear the transcript
  :help | :quit";

pub fn run(config: &AssistantConfig, catalog: Catalog) -> Result<()> {
    let dispatcher = Dispatcher::new(Arc::new(catalog));
    let mut session = Session::from_config(config);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    writeln!(out, "{}", HELP)?;
    render(&mut out, &session)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let status = match line.strip_prefix(':') {
            Some(control) => match handle_control(&dispatcher, &mut session, control) {
                Control::Status(status) => status,
                Control::Quit => break,
                Control::Help => {
                    writeln!(out, "{}", HELP)?;
                    continue;
                }
            },
            None => dispatcher.handle_speech(&mut session, &[SpeechEvent::finalized(line)]),
        };

        if let Some(status) = status {
            let tag = if status.is_error() { "!!" } else { "ok" };
            writeln!(out, "[{}] {}", tag, status)?;
        }
        render(&mut out, &session)?;
    }

    Ok(())
}

enum Control {
    Status(Option<StatusMessage>),
    Help,
    Quit,
}

fn handle_control(dispatcher: &Dispatcher, session: &mut Session, control: &str) -> Control {
    let (verb, arg) = control
        .split_once(char::is_whitespace)
        .map(|(v, a)| (v, a.trim()))
        .unwrap_or((control, ""));
    tracing::debug!(verb, arg, "repl control");

    let status = match verb {
        "quit" | "q" => return Control::Quit,
        "help" => return Control::Help,
        "start" => session.start_listening(),
        "stop" => session.stop_listening(),
        "clear" => {
            session.clear_transcript();
            None
        }
        // Interim text only reaches the transcript.
        "interim" => dispatcher.handle_speech(session, &[SpeechEvent::interim(arg)]),
        "add" => Some(session.add_item(arg)),
        "error" => Some(session.speech_error(arg)),
        "locale" => match arg.parse::<Locale>() {
            Ok(locale) => session.set_locale(locale),
            Err(e) => Some(StatusMessage::error(e.to_string())),
        },
        "inc" | "dec" | "rm" => match entry_index(arg) {
            Some(index) => {
                let result = match verb {
                    "inc" => session.increment(index),
                    "dec" => session.decrement(index),
                    _ => session.remove_at(index),
                };
                Some(result.unwrap_or_else(|e| StatusMessage::error(e.to_string())))
            }
            None => Some(StatusMessage::error(format!("Not an entry number: {}", arg))),
        },
        "qty" => {
            let (n, value) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
            match entry_index(n) {
                Some(index) => match session.set_quantity_from_input(index, value) {
                    Ok(_) => None,
                    Err(e) => Some(StatusMessage::error(e.to_string())),
                },
                None => Some(StatusMessage::error(format!("Not an entry number: {}", n))),
            }
        }
        other => Some(StatusMessage::error(format!("Unknown control :{}", other))),
    };

    Control::Status(status)
}

/// Entries are shown numbered from 1.
fn entry_index(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok()?.checked_sub(1)
}

fn render(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let state = if session.is_listening() {
        "Listening..."
    } else {
        "Ready"
    };
    writeln!(
        out,
        "--- {} | {} ({})",
        state,
        session.locale().display_name(),
        session.locale()
    )?;

    if !session.transcript().is_empty() {
        writeln!(out, "Transcript: {}", session.transcript().text())?;
    }

    if session.list().is_empty() {
        writeln!(out, "Your list is empty.")?;
    }
    for (i, entry) in session.list().entries().iter().enumerate() {
        writeln!(
            out,
            "  {}. {} x{} [{}]",
            i + 1,
            entry.name,
            entry.qty,
            entry.category
        )?;
    }

    writeln!(out, "Suggestions: {}", session.suggestions().join(", "))?;

    if !session.search_results().is_empty() {
        writeln!(out, "Results:")?;
        for product in session.search_results() {
            writeln!(
                out,
                "  {} ({}) ${:.2}",
                product.name, product.brand, product.price
            )?;
        }
    }

    Ok(())
}
