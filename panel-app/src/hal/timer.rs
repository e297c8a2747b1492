// Timer für die Blink-Simulation auf Basis von embassy-time
//
// Es gibt genau einen Timer-Slot. Der Panel-Task wartet auf dessen
// Deadline und holt den Tick danach mit `fire()` ab.

use embassy_time::{Duration, Instant};
use log::warn;
use panel_core::{PhaseScheduler, PhaseTick};

/// Handle eines geplanten Phasenwechsels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u32);

/// Belegter Timer-Slot
#[derive(Debug, Clone, Copy)]
pub struct PendingPhase {
    pub deadline: Instant,
    pub tick: PhaseTick,
    pub handle: TimerHandle,
}

/// Scheduler mit einem einzigen Slot
#[derive(Debug, Default)]
pub struct EmbassyScheduler {
    slot: Option<PendingPhase>,
    next_handle: u32,
}

impl EmbassyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuell geplanter Phasenwechsel (falls vorhanden)
    pub fn pending(&self) -> Option<PendingPhase> {
        self.slot
    }

    /// Leert den Slot und liefert den Tick, wenn `handle` noch aktuell ist
    pub fn fire(&mut self, handle: TimerHandle) -> Option<PhaseTick> {
        match self.slot {
            Some(pending) if pending.handle == handle => {
                self.slot = None;
                Some(pending.tick)
            }
            _ => None,
        }
    }
}

impl PhaseScheduler for EmbassyScheduler {
    type Handle = TimerHandle;

    fn schedule(&mut self, delay_ms: u32, tick: PhaseTick) -> TimerHandle {
        if let Some(previous) = self.slot {
            warn!(
                "PANEL: Timer {:?} still pending while scheduling a new one, replacing it",
                previous.handle
            );
        }

        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.slot = Some(PendingPhase {
            deadline: Instant::now() + Duration::from_millis(u64::from(delay_ms)),
            tick,
            handle,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.slot.is_some_and(|pending| pending.handle == handle) {
            self.slot = None;
        }
    }
}
