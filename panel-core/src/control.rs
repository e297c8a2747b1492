//! Abgleich zwischen Server-Bestätigungen und Blink-Simulation
//!
//! Nur bestätigte Kommandos verändern die Simulation. Fehlgeschlagene
//! Requests erreichen diesen Code gar nicht.

use crate::logic::FlashSimulator;
use crate::traits::{PhaseScheduler, StatusPresenter};
use crate::types::{CommandOutcome, DeviceState, PhaseTick};

/// Control Panel - besitzt die Blink-Simulation
///
/// | Bestätigung        | Reaktion                          |
/// |--------------------|-----------------------------------|
/// | `Toggled(state)`   | `stop()`, gemeldeten Zustand zeigen |
/// | `FlashStarted(d)`  | `start(d)`                        |
/// | `FlashStopped`     | `stop()`, OFF zeigen              |
pub struct ControlPanel<S: PhaseScheduler, P> {
    simulator: FlashSimulator<S, P>,
}

impl<S: PhaseScheduler, P: StatusPresenter> ControlPanel<S, P> {
    pub fn new(scheduler: S, presenter: P) -> Self {
        Self {
            simulator: FlashSimulator::new(scheduler, presenter),
        }
    }

    /// Wendet ein bestätigtes Kommando an
    pub fn apply(&mut self, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::Toggled(state) => {
                self.simulator.stop();
                self.simulator.show(state);
            }
            CommandOutcome::FlashStarted(durations) => {
                self.simulator.start(durations);
            }
            CommandOutcome::FlashStopped => {
                self.simulator.stop();
                self.simulator.show(DeviceState::Off);
            }
        }
    }

    /// Leitet einen ausgelösten Timer an die Simulation weiter
    pub fn flip(&mut self, tick: PhaseTick) -> bool {
        self.simulator.flip(tick)
    }

    pub fn simulator(&self) -> &FlashSimulator<S, P> {
        &self.simulator
    }

    pub fn scheduler(&self) -> &S {
        self.simulator.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.simulator.scheduler_mut()
    }

    pub fn presenter(&self) -> &P {
        self.simulator.presenter()
    }
}
