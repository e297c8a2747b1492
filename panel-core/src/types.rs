//! Core Types für die LED-Steuerung
//!
//! Datenstrukturen ohne Runtime-Dependencies

use core::fmt;
use core::num::NonZeroU32;

use rgb::RGB8;

/// Anzeige-Farbe für eine eingeschaltete LED (Bernstein)
pub const INDICATOR_ON_COLOR: RGB8 = RGB8 {
    r: 255,
    g: 176,
    b: 0,
};

/// Anzeige-Farbe für eine ausgeschaltete LED (dunkelgrau)
pub const INDICATOR_OFF_COLOR: RGB8 = RGB8 {
    r: 48,
    g: 48,
    b: 48,
};

// ============================================================================
// DeviceState
// ============================================================================

/// Binärer Zustand der LED (gemeldet vom Server oder lokal simuliert)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    On,
    Off,
}

impl DeviceState {
    /// Gegenteiliger Zustand (ON ↔ OFF)
    pub fn toggled(self) -> Self {
        match self {
            DeviceState::On => DeviceState::Off,
            DeviceState::Off => DeviceState::On,
        }
    }

    /// Anzeigetext wie vom Server gemeldet
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceState::On => "ON",
            DeviceState::Off => "OFF",
        }
    }

    /// Farbe der visuellen Anzeige für diesen Zustand
    pub fn indicator_color(self) -> RGB8 {
        match self {
            DeviceState::On => INDICATOR_ON_COLOR,
            DeviceState::Off => INDICATOR_OFF_COLOR,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FlashDurations
// ============================================================================

/// Fehler bei der Validierung von Blink-Dauern (Benutzereingabe)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    /// Eingabe ist keine Ganzzahl
    NotANumber,
    /// Null oder negativ
    NotPositive,
    /// Größer als u32::MAX Millisekunden
    OutOfRange,
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::NotANumber => f.write_str("duration is not a number"),
            DurationError::NotPositive => f.write_str("duration must be a positive number"),
            DurationError::OutOfRange => f.write_str("duration is too large"),
        }
    }
}

impl core::error::Error for DurationError {}

/// Validiertes Paar aus AN- und AUS-Dauer in Millisekunden
///
/// Beide Werte sind garantiert > 0. Die Simulation validiert nicht erneut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashDurations {
    on_ms: NonZeroU32,
    off_ms: NonZeroU32,
}

impl FlashDurations {
    /// Erstellt Dauern aus Rohwerten, 0 wird abgelehnt
    pub fn from_millis(on_ms: u32, off_ms: u32) -> Result<Self, DurationError> {
        let on_ms = NonZeroU32::new(on_ms).ok_or(DurationError::NotPositive)?;
        let off_ms = NonZeroU32::new(off_ms).ok_or(DurationError::NotPositive)?;
        Ok(Self { on_ms, off_ms })
    }

    /// Parst zwei Benutzereingaben (z.B. aus der Konsole)
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use panel_core::{DurationError, FlashDurations};
    /// let durations = FlashDurations::parse("500", " 1000 ").unwrap();
    /// assert_eq!(durations.on_ms(), 500);
    /// assert_eq!(durations.off_ms(), 1000);
    ///
    /// assert_eq!(FlashDurations::parse("-5", "100"), Err(DurationError::NotPositive));
    /// ```
    pub fn parse(on: &str, off: &str) -> Result<Self, DurationError> {
        Ok(Self {
            on_ms: parse_millis(on)?,
            off_ms: parse_millis(off)?,
        })
    }

    pub fn on_ms(&self) -> u32 {
        self.on_ms.get()
    }

    pub fn off_ms(&self) -> u32 {
        self.off_ms.get()
    }

    /// Wie lange eine Phase mit dem gegebenen Zustand dauert
    pub fn for_phase(&self, phase: DeviceState) -> u32 {
        match phase {
            DeviceState::On => self.on_ms(),
            DeviceState::Off => self.off_ms(),
        }
    }
}

fn parse_millis(input: &str) -> Result<NonZeroU32, DurationError> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| DurationError::NotANumber)?;
    if value <= 0 {
        return Err(DurationError::NotPositive);
    }
    let value = u32::try_from(value).map_err(|_| DurationError::OutOfRange)?;
    NonZeroU32::new(value).ok_or(DurationError::NotPositive)
}

// ============================================================================
// Zyklus-Identität
// ============================================================================

/// Identität eines Blink-Zyklus
///
/// Jeder `start()` vergibt eine neue Id. Ticks eines alten Zyklus
/// werden über die Id erkannt und verworfen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CycleId(u32);

impl CycleId {
    pub(crate) fn next(self) -> Self {
        CycleId(self.0.wrapping_add(1))
    }
}

/// Geplanter Phasenwechsel
///
/// Wird beim Planen an den Scheduler übergeben und beim Auslösen
/// unverändert an `flip()` zurückgegeben.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseTick {
    pub(crate) cycle: CycleId,
    pub(crate) step: u32,
}

impl PhaseTick {
    pub fn cycle(&self) -> CycleId {
        self.cycle
    }
}

// ============================================================================
// Kommandos und Server-Status
// ============================================================================

/// Status-String aus der JSON-Antwort des Servers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum DeviceStatus {
    #[cfg_attr(feature = "serde", serde(rename = "ON"))]
    On,
    #[cfg_attr(feature = "serde", serde(rename = "OFF"))]
    Off,
    #[cfg_attr(feature = "serde", serde(rename = "Flashing"))]
    Flashing,
    #[cfg_attr(feature = "serde", serde(rename = "Flashing Stopped"))]
    FlashingStopped,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::On => "ON",
            DeviceStatus::Off => "OFF",
            DeviceStatus::Flashing => "Flashing",
            DeviceStatus::FlashingStopped => "Flashing Stopped",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kommando an den Geräte-Service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// LED umschalten
    Toggle,
    /// Blinken mit den gegebenen Dauern starten
    StartFlash(FlashDurations),
    /// Blinken beenden
    StopFlash,
}

impl Command {
    /// HTTP-Pfad des Endpoints (immer POST)
    pub fn path(&self) -> &'static str {
        match self {
            Command::Toggle => "/toggle",
            Command::StartFlash(_) => "/startFlash",
            Command::StopFlash => "/stopFlash",
        }
    }

    /// Kurzname für Logs und Fehlermeldungen
    pub fn name(&self) -> &'static str {
        match self {
            Command::Toggle => "toggle",
            Command::StartFlash(_) => "start-flash",
            Command::StopFlash => "stop-flash",
        }
    }

    /// Prüft die Server-Antwort gegen das Kommando
    ///
    /// Nur bestätigte Kommandos werden zu einem `CommandOutcome`.
    /// Jeder andere Status ist ein `UnexpectedStatus` und darf die
    /// Simulation nicht verändern.
    pub fn acknowledge(&self, status: DeviceStatus) -> Result<CommandOutcome, UnexpectedStatus> {
        match (*self, status) {
            (Command::Toggle, DeviceStatus::On) => Ok(CommandOutcome::Toggled(DeviceState::On)),
            (Command::Toggle, DeviceStatus::Off) => Ok(CommandOutcome::Toggled(DeviceState::Off)),
            (Command::StartFlash(durations), DeviceStatus::Flashing) => {
                Ok(CommandOutcome::FlashStarted(durations))
            }
            (Command::StopFlash, DeviceStatus::FlashingStopped | DeviceStatus::Off) => {
                Ok(CommandOutcome::FlashStopped)
            }
            (command, status) => Err(UnexpectedStatus { command, status }),
        }
    }
}

/// Vom Server bestätigtes Kommando
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Toggle bestätigt, mit dem gemeldeten neuen Zustand
    Toggled(DeviceState),
    /// Blinken läuft auf dem Gerät
    FlashStarted(FlashDurations),
    /// Blinken gestoppt, LED ist aus
    FlashStopped,
}

/// Server hat einen Status gemeldet, der nicht zum Kommando passt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedStatus {
    pub command: Command,
    pub status: DeviceStatus,
}

impl fmt::Display for UnexpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected status '{}' for {} command",
            self.status,
            self.command.name()
        )
    }
}

impl core::error::Error for UnexpectedStatus {}
