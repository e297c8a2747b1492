//! Blink-Simulation - Pure Business Logic
//!
//! Zustandsmaschine ohne Runtime-Dependencies (testbar!).
//!
//! Zustände: Idle und Running. `start()` führt von Idle nach Running
//! (und ersetzt einen laufenden Zyklus), jeder `flip()` ist ein Übergang
//! Running → Running mit wechselndem LED-Zustand, `stop()` führt nach Idle.

use crate::traits::{PhaseScheduler, StatusPresenter};
use crate::types::{CycleId, DeviceState, FlashDurations, PhaseTick};

/// Ein Lauf der lokalen Blink-Simulation
///
/// Invariante: `active == false` ⇒ kein geplanter Timer (`pending == None`).
#[derive(Debug)]
pub struct FlashCycle<H> {
    id: CycleId,
    durations: FlashDurations,
    phase: DeviceState,
    step: u32,
    active: bool,
    pending: Option<H>,
}

impl<H> FlashCycle<H> {
    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }
}

/// Lokale Blink-Simulation
///
/// Besitzt den einzigen Timer-Slot (über `S`) und die Anzeige (über `P`).
/// Niemand sonst plant Timer gegen diesen Zustand.
///
/// # Beispiel
///
/// ```
/// # use panel_core::{DeviceState, FlashDurations, FlashSimulator, PhaseScheduler, PhaseTick, StatusPresenter};
/// struct NoTimer;
/// impl PhaseScheduler for NoTimer {
///     type Handle = ();
///     fn schedule(&mut self, _delay_ms: u32, _tick: PhaseTick) {}
///     fn cancel(&mut self, _handle: ()) {}
/// }
/// struct Silent;
/// impl StatusPresenter for Silent {
///     fn set_text(&mut self, _state: DeviceState) {}
///     fn set_indicator(&mut self, _state: DeviceState) {}
/// }
///
/// let mut sim = FlashSimulator::new(NoTimer, Silent);
/// sim.start(FlashDurations::from_millis(500, 1000).unwrap());
/// assert!(sim.is_running());
/// assert_eq!(sim.displayed(), Some(DeviceState::On));
/// sim.stop();
/// assert!(!sim.is_running());
/// ```
pub struct FlashSimulator<S: PhaseScheduler, P> {
    scheduler: S,
    presenter: P,
    cycle: Option<FlashCycle<S::Handle>>,
    next_id: CycleId,
    displayed: Option<DeviceState>,
}

impl<S: PhaseScheduler, P: StatusPresenter> FlashSimulator<S, P> {
    pub fn new(scheduler: S, presenter: P) -> Self {
        Self {
            scheduler,
            presenter,
            cycle: None,
            next_id: CycleId::default(),
            displayed: None,
        }
    }

    /// Startet einen neuen Blink-Zyklus
    ///
    /// Ein laufender Zyklus wird vorher gestoppt. Die LED geht sofort auf ON,
    /// der erste Phasenwechsel folgt nach `durations.on_ms()`.
    pub fn start(&mut self, durations: FlashDurations) {
        self.stop();

        let id = self.next_id;
        self.next_id = id.next();

        self.emit(DeviceState::On);

        let tick = PhaseTick { cycle: id, step: 0 };
        let handle = self.scheduler.schedule(durations.on_ms(), tick);
        self.cycle = Some(FlashCycle {
            id,
            durations,
            phase: DeviceState::On,
            step: 0,
            active: true,
            pending: Some(handle),
        });
    }

    /// Stoppt den laufenden Zyklus (idempotent)
    ///
    /// Gibt selbst keinen Zustand aus: was danach angezeigt wird,
    /// entscheidet der Aufrufer über `show()`.
    pub fn stop(&mut self) {
        if let Some(cycle) = self.cycle.as_mut() {
            cycle.active = false;
            if let Some(handle) = cycle.pending.take() {
                self.scheduler.cancel(handle);
            }
        }
    }

    /// Phasenwechsel - wird vom Treiber aufgerufen wenn ein Timer abläuft
    ///
    /// Gibt `false` zurück wenn der Tick veraltet ist (Zyklus gestoppt,
    /// ersetzt oder Tick bereits verarbeitet). Dann passiert nichts.
    pub fn flip(&mut self, tick: PhaseTick) -> bool {
        let Some(cycle) = self.cycle.as_mut() else {
            return false;
        };
        if !cycle.active || cycle.id != tick.cycle || cycle.step != tick.step {
            return false;
        }

        // Der auslösende Timer ist verbraucht
        cycle.pending = None;
        cycle.phase = cycle.phase.toggled();
        cycle.step = cycle.step.wrapping_add(1);

        let phase = cycle.phase;
        self.presenter.show(phase);
        self.displayed = Some(phase);

        let next = PhaseTick {
            cycle: cycle.id,
            step: cycle.step,
        };
        let handle = self
            .scheduler
            .schedule(cycle.durations.for_phase(phase), next);
        cycle.pending = Some(handle);
        true
    }

    /// Zeigt einen vom Server bestätigten Zustand an
    ///
    /// Pfad für Toggle- und Stop-Bestätigungen; der Zyklus bleibt unberührt.
    pub fn show(&mut self, state: DeviceState) {
        self.emit(state);
    }

    pub fn is_running(&self) -> bool {
        self.cycle.as_ref().is_some_and(|cycle| cycle.active)
    }

    /// Zuletzt angezeigter Zustand (`None` vor der ersten Antwort)
    pub fn displayed(&self) -> Option<DeviceState> {
        self.displayed
    }

    /// Aktueller oder zuletzt gestoppter Zyklus
    pub fn cycle(&self) -> Option<&FlashCycle<S::Handle>> {
        self.cycle.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn emit(&mut self, state: DeviceState) {
        self.presenter.show(state);
        self.displayed = Some(state);
    }
}
