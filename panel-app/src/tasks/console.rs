// Konsolen-Thread - liest Benutzereingaben und sendet Kommandos
//
// Läuft als normaler std::thread, weil stdin und der HTTP Client blockieren.
// Der Thread fasst die Simulation nie an: er schickt nur bestätigte
// Kommandos über den Channel an den Panel-Task.

use std::io::{self, BufRead, Write};

use embassy_futures::block_on;
use log::{info, warn};
use panel_core::{Command, DurationError, FlashDurations};
use thiserror::Error;

use crate::OutcomeSender;
use crate::web::CommandTransport;

/// Hilfetext für `help`
pub const HELP_TEXT: &str = "\
Commands:
  toggle | t                  toggle the LED
  flash  | f [<on> <off>]     start flashing (durations in ms)
  stop   | s                  stop flashing
  help   | h | ?              show this help
  quit   | q | exit           leave the panel";

/// Eine geparste Eingabezeile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Kommando an den Geräte-Service senden
    Send(Command),
    Help,
    Quit,
}

/// Ungültige Eingabe, wird vor jedem Request abgelehnt
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: flash <on-ms> <off-ms>")]
    Usage,

    #[error("please enter valid positive numbers for durations ({0})")]
    Duration(#[from] DurationError),
}

/// Parst eine Eingabezeile
///
/// Leere Zeilen liefern `Ok(None)`. `flash` ohne Argumente nutzt `defaults`.
pub fn parse_line(
    line: &str,
    defaults: FlashDurations,
) -> Result<Option<ConsoleAction>, InputError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let action = match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("toggle" | "t", []) => ConsoleAction::Send(Command::Toggle),
        ("stop" | "s", []) => ConsoleAction::Send(Command::StopFlash),
        ("flash" | "f", []) => ConsoleAction::Send(Command::StartFlash(defaults)),
        ("flash" | "f", [on, off]) => {
            ConsoleAction::Send(Command::StartFlash(FlashDurations::parse(on, off)?))
        }
        ("flash" | "f", _) => return Err(InputError::Usage),
        ("help" | "h" | "?", _) => ConsoleAction::Help,
        ("quit" | "q" | "exit", _) => ConsoleAction::Quit,
        _ => return Err(InputError::Unknown(line.trim().to_string())),
    };
    Ok(Some(action))
}

/// Konsolen-Schleife
///
/// Liest Zeilen bis `quit` oder EOF. Pro Zeile höchstens ein Request.
/// Fehler werden als Hinweis nach `out` geschrieben und geloggt, aber nie
/// an den Panel-Task weitergegeben.
///
/// # Parameter
/// - `input`: Zeilenquelle (stdin oder Test-Buffer)
/// - `out`: Ausgabe für Hinweise und Hilfe
/// - `transport`: Command Client (HTTP oder Mock)
/// - `defaults`: Dauern für `flash` ohne Argumente
/// - `outcomes`: Channel Sender zum Panel-Task
pub fn console_loop<R, W, T>(
    input: R,
    mut out: W,
    transport: &T,
    defaults: FlashDurations,
    outcomes: OutcomeSender<'_>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    T: CommandTransport,
{
    for line in input.lines() {
        let line = line?;

        match parse_line(&line, defaults) {
            Ok(None) => {}
            Ok(Some(ConsoleAction::Help)) => writeln!(out, "{HELP_TEXT}")?,
            Ok(Some(ConsoleAction::Quit)) => {
                info!("CONSOLE: Quit requested");
                return Ok(());
            }
            Ok(Some(ConsoleAction::Send(command))) => match transport.send(&command) {
                Ok(outcome) => block_on(outcomes.send(outcome)),
                Err(e) => {
                    warn!("CONSOLE: {e}");
                    writeln!(out, "Failed: {e}")?;
                }
            },
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    info!("CONSOLE: Input closed");
    Ok(())
}
