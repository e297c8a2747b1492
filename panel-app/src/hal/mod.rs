// Plattform-Schicht (Host)
//
// Dieses Modul kapselt Terminal und Timer hinter den Traits aus panel-core,
// damit die Logik mit Mock-Implementierungen testbar bleibt.

pub mod terminal;
pub mod timer;

pub use terminal::TerminalPresenter;
pub use timer::{EmbassyScheduler, TimerHandle};
