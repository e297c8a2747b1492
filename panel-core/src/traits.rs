//! Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zu Timer und Anzeige
//! ohne konkrete Implementierung.

use crate::types::{DeviceState, PhaseTick};

/// Trait für die Status-Anzeige
///
/// Beide Operationen sind idempotent und ändern nur die sichtbare Anzeige.
///
/// # Implementierungen
/// - **Production:** TerminalPresenter (Textzeile + farbiger Punkt)
/// - **Testing:** MockPresenter (zeichnet alle Zustände auf)
pub trait StatusPresenter {
    /// Setzt den Statustext ("ON" / "OFF")
    fn set_text(&mut self, state: DeviceState);

    /// Setzt die visuelle Anzeige (LED-Punkt)
    fn set_indicator(&mut self, state: DeviceState);

    /// Text und Anzeige in einem Schritt
    fn show(&mut self, state: DeviceState) {
        self.set_text(state);
        self.set_indicator(state);
    }
}

/// Trait für den Timer der Blink-Simulation
///
/// Der Scheduler gehört exklusiv der `FlashSimulator`-Instanz.
/// Wenn ein geplanter Timer abläuft, muss der Treiber den gespeicherten
/// `PhaseTick` unverändert an `flip()` übergeben.
///
/// `cancel()` ist best effort: ein bereits ausgelöster Tick darf trotzdem
/// noch ankommen, die Simulation verwirft ihn dann selbst.
pub trait PhaseScheduler {
    /// Handle eines geplanten Timers
    type Handle;

    /// Plant einen Phasenwechsel in `delay_ms` Millisekunden
    fn schedule(&mut self, delay_ms: u32, tick: PhaseTick) -> Self::Handle;

    /// Gibt einen geplanten Timer frei
    fn cancel(&mut self, handle: Self::Handle);
}
