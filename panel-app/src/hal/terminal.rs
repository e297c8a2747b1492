// Status-Anzeige im Terminal
//
// Rendert den LED-Zustand als Textzeile mit farbigem Punkt (24-Bit ANSI).

use std::io::{self, Write};

use log::error;
use panel_core::{DeviceState, StatusPresenter};
use rgb::RGB8;

/// Zeichen für die LED-Anzeige
const INDICATOR_GLYPH: char = '●';

/// Terminal-Anzeige
///
/// Merkt sich Text und Anzeige getrennt und schreibt nach jeder Änderung
/// eine Zeile. `show()` schreibt nur einmal.
pub struct TerminalPresenter<W: Write = io::Stdout> {
    out: W,
    text: Option<DeviceState>,
    indicator: Option<DeviceState>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            text: None,
            indicator: None,
        }
    }

    pub fn text(&self) -> Option<DeviceState> {
        self.text
    }

    pub fn indicator(&self) -> Option<DeviceState> {
        self.indicator
    }

    /// Zugriff auf den Writer (für Tests)
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn render(&mut self) {
        let line = render_line(self.text, self.indicator);
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            error!("PANEL: Failed to write status line: {e}");
        }
    }
}

impl<W: Write> StatusPresenter for TerminalPresenter<W> {
    fn set_text(&mut self, state: DeviceState) {
        self.text = Some(state);
        self.render();
    }

    fn set_indicator(&mut self, state: DeviceState) {
        self.indicator = Some(state);
        self.render();
    }

    fn show(&mut self, state: DeviceState) {
        self.text = Some(state);
        self.indicator = Some(state);
        self.render();
    }
}

/// Baut die Statuszeile, z.B. `● Status: ON` mit Farbcode
pub fn render_line(text: Option<DeviceState>, indicator: Option<DeviceState>) -> String {
    let dot = match indicator {
        Some(state) => colored(INDICATOR_GLYPH, state.indicator_color()),
        None => String::from("○"),
    };
    let text = text.map_or("-", DeviceState::as_str);
    format!("{dot} Status: {text}")
}

fn colored(glyph: char, color: RGB8) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{glyph}\x1b[0m",
        color.r, color.g, color.b
    )
}
