use std::io::{BufRead, Write};
use std::path::Path;

use chrono::Local;
use tracing::{debug, warn};

use crate::error::Result;
use crate::session::{ChatSession, Feedback, Message, Sender};
use crate::transcript::{Transcript, save_transcript};

const TYPING: &str = "Asistente está escribiendo...";
const HELP: &str = "Comandos: /ask N (envía la pregunta sugerida N), /like N, /dislike N, \
    /clear, /save RUTA, /quit";

enum Line<'a> {
    Quit,
    Clear,
    Help,
    Ask(usize),
    Rate(u64, Feedback),
    Save(&'a Path),
    Text(&'a str),
    Invalid(&'a str),
}

fn parse_line(line: &str) -> Line<'_> {
    let Some(command) = line.trim().strip_prefix('/') else {
        return Line::Text(line);
    };
    let mut parts = command.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "quit" | "salir" => Line::Quit,
        "clear" => Line::Clear,
        "help" => Line::Help,
        "ask" => arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map_or(Line::Invalid(line), Line::Ask),
        "like" | "dislike" => {
            let feedback = if name == "like" {
                Feedback::Like
            } else {
                Feedback::Dislike
            };
            arg.parse::<u64>()
                .map_or(Line::Invalid(line), |id| Line::Rate(id, feedback))
        }
        "save" if !arg.is_empty() => Line::Save(Path::new(arg)),
        _ => Line::Invalid(line),
    }
}

/// Drives a session from line input until EOF or `/quit`.
///
/// Replies are awaited in real time, so the configured delay is honoured.
pub fn run_chat(session: &mut ChatSession, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    session.open(Local::now());
    for message in session.messages() {
        print_message(out, message)?;
    }
    print_suggestions(out, session)?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Line::Quit => break,
            Line::Help => writeln!(out, "{HELP}")?,
            Line::Clear => {
                session.clear(Local::now());
                for message in session.messages() {
                    print_message(out, message)?;
                }
                print_suggestions(out, session)?;
            }
            Line::Ask(index) => match session.pick_suggestion(index).map(str::to_string) {
                Some(question) => exchange(session, &question, out)?,
                None => writeln!(out, "No existe la sugerencia {}", index + 1)?,
            },
            Line::Rate(id, feedback) => match session.rate(id, feedback) {
                Ok(()) => writeln!(out, "¡Gracias por tu valoración!")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Line::Save(path) => {
                save_transcript(path, &Transcript::from_session(session))?;
                writeln!(out, "Conversación guardada en {}", path.display())?;
            }
            Line::Text(text) if text.trim().is_empty() => continue,
            Line::Text(text) => exchange(session, text, out)?,
            Line::Invalid(raw) => {
                warn!(command = raw, "unknown chat command");
                writeln!(out, "{HELP}")?;
            }
        }
    }

    session.close();
    Ok(())
}

fn exchange(session: &mut ChatSession, text: &str, out: &mut impl Write) -> Result<()> {
    let Some(id) = session.submit(text, Local::now()) else {
        return Ok(());
    };
    if let Some(message) = session.messages().iter().find(|m| m.id == id) {
        print_message(out, message)?;
    }

    writeln!(out, "{TYPING}")?;
    out.flush()?;
    while session.is_typing() {
        if let Some(due) = session.next_due() {
            let wait = (due - Local::now()).to_std().unwrap_or_default();
            if !wait.is_zero() {
                debug!(wait_ms = wait.as_millis() as u64, "waiting for reply");
                std::thread::sleep(wait);
            }
        }
        for reply in session.poll(Local::now()) {
            print_message(out, &reply)?;
        }
    }

    print_suggestions(out, session)
}

fn print_message(out: &mut impl Write, message: &Message) -> Result<()> {
    match (message.sender, message.reply_to) {
        (Sender::User, _) => writeln!(out, "[{}] Tú: {}", message.time, message.content)?,
        (Sender::Bot, None) => writeln!(out, "[{}] Asistente: {}", message.time, message.content)?,
        (Sender::Bot, Some(_)) => writeln!(
            out,
            "[{}] Asistente (#{}): {}",
            message.time, message.id, message.content
        )?,
    }
    Ok(())
}

fn print_suggestions(out: &mut impl Write, session: &ChatSession) -> Result<()> {
    if !session.suggestions_visible() {
        return Ok(());
    }
    writeln!(out, "Preguntas frecuentes:")?;
    for (n, entry) in session.suggestions().iter().enumerate() {
        writeln!(out, "  {}. {} {}", n + 1, entry.icon, entry.question)?;
    }
    out.flush()?;
    Ok(())
}
