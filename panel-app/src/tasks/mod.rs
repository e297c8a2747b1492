// Task-Modul: Panel-Task und Konsolen-Schleife
//
// Der Panel-Task läuft auf dem Embassy-Executor und besitzt die Simulation.
// Die Konsole läuft blockierend im Haupt-Thread und kommuniziert nur über
// den OutcomeChannel mit dem Panel-Task.

pub mod console;
pub mod panel;

// Re-export für einfachen Import
pub use console::{HELP_TEXT, console_loop};
pub use panel::{panel_logic, panel_task};
