//! Integration Tests für die Blink-Simulation
//!
//! Diese Tests laufen auf dem Host mit einer virtuellen Uhr (ManualScheduler)
//! und einer aufzeichnenden Anzeige (MockPresenter).

use panel_core::protocol::parse_status;
use panel_core::{
    Command, CommandOutcome, ControlPanel, DeviceState, DeviceStatus, FlashDurations,
    FlashSimulator, PhaseScheduler, PhaseTick, StatusPresenter,
};
use rgb::RGB8;

// ============================================================================
// Mock Presenter
// ============================================================================

#[derive(Default)]
pub struct MockPresenter {
    pub text: Option<DeviceState>,
    pub indicator: Option<RGB8>,
    pub history: Vec<DeviceState>,
}

impl StatusPresenter for MockPresenter {
    fn set_text(&mut self, state: DeviceState) {
        self.text = Some(state);
    }

    fn set_indicator(&mut self, state: DeviceState) {
        self.indicator = Some(state.indicator_color());
        self.history.push(state);
    }
}

// ============================================================================
// Manual Scheduler (virtuelle Uhr)
// ============================================================================

/// Scheduler mit virtueller Zeit in Millisekunden
///
/// Timer laufen nur ab, wenn der Test die Uhr mit `advance_to()` vorstellt.
#[derive(Default)]
pub struct ManualScheduler {
    pub now: u64,
    next_handle: u32,
    timers: Vec<(u64, u32, PhaseTick)>,
    pub cancelled: usize,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Entfernt den frühesten Timer mit Deadline ≤ `until`
    fn pop_due(&mut self, until: u64) -> Option<(u64, PhaseTick)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _, _))| *deadline <= until)
            .min_by_key(|(_, (deadline, handle, _))| (*deadline, *handle))
            .map(|(index, _)| index)?;
        let (deadline, _, tick) = self.timers.remove(index);
        Some((deadline, tick))
    }
}

impl PhaseScheduler for ManualScheduler {
    type Handle = u32;

    fn schedule(&mut self, delay_ms: u32, tick: PhaseTick) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.timers.push((self.now + u64::from(delay_ms), handle, tick));
        handle
    }

    fn cancel(&mut self, handle: u32) {
        let before = self.timers.len();
        self.timers.retain(|(_, h, _)| *h != handle);
        if self.timers.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Stellt die Uhr auf `until` und löst alle fälligen Timer der Reihe nach aus
fn advance_to(sim: &mut FlashSimulator<ManualScheduler, MockPresenter>, until: u64) {
    while let Some((deadline, tick)) = sim.scheduler_mut().pop_due(until) {
        sim.scheduler_mut().now = deadline;
        sim.flip(tick);
    }
    sim.scheduler_mut().now = until;
}

// ============================================================================
// Leaky Scheduler (cancel wirkt nicht)
// ============================================================================

/// Scheduler, dessen `cancel()` nichts tut
///
/// Simuliert Timer, die trotz Abbruch noch zugestellt werden.
#[derive(Default)]
pub struct LeakyScheduler {
    pub delivered: Vec<PhaseTick>,
}

impl PhaseScheduler for LeakyScheduler {
    type Handle = ();

    fn schedule(&mut self, _delay_ms: u32, tick: PhaseTick) {
        self.delivered.push(tick);
    }

    fn cancel(&mut self, _handle: ()) {}
}

fn durations(on: u32, off: u32) -> FlashDurations {
    FlashDurations::from_millis(on, off).unwrap()
}

fn simulator() -> FlashSimulator<ManualScheduler, MockPresenter> {
    FlashSimulator::new(ManualScheduler::default(), MockPresenter::default())
}

// ============================================================================
// Tests: Blink-Ablauf
// ============================================================================

#[test]
fn test_start_shows_on_immediately() {
    let mut sim = simulator();
    sim.start(durations(500, 1000));

    assert!(sim.is_running());
    assert_eq!(sim.displayed(), Some(DeviceState::On));
    assert_eq!(sim.presenter().text, Some(DeviceState::On));
    assert_eq!(
        sim.presenter().indicator,
        Some(DeviceState::On.indicator_color())
    );
    assert_eq!(sim.scheduler().pending(), 1);
}

#[test]
fn test_timeline_500_1000() {
    let mut sim = simulator();
    sim.start(durations(500, 1000));

    advance_to(&mut sim, 499);
    assert_eq!(sim.displayed(), Some(DeviceState::On));

    advance_to(&mut sim, 501);
    assert_eq!(sim.displayed(), Some(DeviceState::Off));

    advance_to(&mut sim, 1499);
    assert_eq!(sim.displayed(), Some(DeviceState::Off));

    advance_to(&mut sim, 1502);
    assert_eq!(sim.displayed(), Some(DeviceState::On));

    assert_eq!(
        sim.presenter().history,
        vec![DeviceState::On, DeviceState::Off, DeviceState::On]
    );
}

#[test]
fn test_states_alternate_over_many_cycles() {
    let mut sim = simulator();
    sim.start(durations(10, 30));

    // 10 Zyklen à 40 ms: 1 Start + 20 Wechsel
    advance_to(&mut sim, 400);

    let history = &sim.presenter().history;
    assert_eq!(history.len(), 21);
    assert_eq!(history[0], DeviceState::On);
    for pair in history.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert_eq!(sim.scheduler().pending(), 1);
}

#[test]
fn test_stop_keeps_current_state() {
    let mut sim = simulator();
    sim.start(durations(500, 1000));

    advance_to(&mut sim, 200);
    sim.stop();
    assert!(!sim.is_running());
    assert_eq!(sim.scheduler().pending(), 0);

    advance_to(&mut sim, 5000);
    assert_eq!(sim.displayed(), Some(DeviceState::On));
    assert_eq!(sim.presenter().history, vec![DeviceState::On]);
}

#[test]
fn test_stop_is_idempotent() {
    let mut sim = simulator();
    sim.stop();
    assert!(!sim.is_running());
    assert_eq!(sim.displayed(), None);

    sim.start(durations(100, 100));
    sim.stop();
    sim.stop();
    assert_eq!(sim.scheduler().cancelled, 1);
    assert_eq!(sim.presenter().history, vec![DeviceState::On]);
}

#[test]
fn test_restart_supersedes_previous_cycle() {
    let mut sim = simulator();
    sim.start(durations(100, 100));
    advance_to(&mut sim, 150);
    assert_eq!(sim.displayed(), Some(DeviceState::Off));

    sim.start(durations(1000, 1000));
    assert_eq!(sim.displayed(), Some(DeviceState::On));
    assert_eq!(sim.scheduler().pending(), 1);

    // Alter Takt (100 ms) darf nicht mehr umschalten
    advance_to(&mut sim, 1149);
    assert_eq!(sim.displayed(), Some(DeviceState::On));

    advance_to(&mut sim, 1150);
    assert_eq!(sim.displayed(), Some(DeviceState::Off));
}

// ============================================================================
// Tests: Veraltete Timer
// ============================================================================

#[test]
fn test_tick_after_stop_is_ignored() {
    let mut sim = FlashSimulator::new(LeakyScheduler::default(), MockPresenter::default());
    sim.start(durations(100, 100));
    let tick = sim.scheduler().delivered[0];

    sim.stop();
    assert!(!sim.flip(tick));
    assert_eq!(sim.displayed(), Some(DeviceState::On));
    assert_eq!(sim.scheduler().delivered.len(), 1);
}

#[test]
fn test_tick_of_superseded_cycle_is_ignored() {
    let mut sim = FlashSimulator::new(LeakyScheduler::default(), MockPresenter::default());
    sim.start(durations(100, 100));
    let old = sim.scheduler().delivered[0];

    sim.start(durations(200, 200));
    let new = sim.scheduler().delivered[1];
    assert_ne!(old.cycle(), new.cycle());

    assert!(!sim.flip(old));
    assert_eq!(sim.displayed(), Some(DeviceState::On));
    assert!(sim.flip(new));
    assert_eq!(sim.displayed(), Some(DeviceState::Off));
}

#[test]
fn test_tick_delivered_twice_flips_once() {
    let mut sim = FlashSimulator::new(LeakyScheduler::default(), MockPresenter::default());
    sim.start(durations(100, 100));
    let tick = sim.scheduler().delivered[0];

    assert!(sim.flip(tick));
    assert!(!sim.flip(tick));
    assert_eq!(
        sim.presenter().history,
        vec![DeviceState::On, DeviceState::Off]
    );
}

// ============================================================================
// Tests: Control Panel
// ============================================================================

fn panel() -> ControlPanel<ManualScheduler, MockPresenter> {
    ControlPanel::new(ManualScheduler::default(), MockPresenter::default())
}

#[test]
fn test_toggle_during_flashing_stops_and_shows_reported_state() {
    let mut panel = panel();
    panel.apply(CommandOutcome::FlashStarted(durations(100, 100)));
    assert!(panel.simulator().is_running());

    panel.apply(CommandOutcome::Toggled(DeviceState::Off));
    assert!(!panel.simulator().is_running());
    assert_eq!(panel.simulator().displayed(), Some(DeviceState::Off));
    assert_eq!(panel.scheduler().pending(), 0);
}

#[test]
fn test_flash_stopped_shows_off() {
    let mut panel = panel();
    panel.apply(CommandOutcome::FlashStarted(durations(100, 100)));
    panel.apply(CommandOutcome::FlashStopped);

    assert!(!panel.simulator().is_running());
    assert_eq!(panel.simulator().displayed(), Some(DeviceState::Off));
    assert_eq!(panel.presenter().text, Some(DeviceState::Off));
}

/// Server-Antwort parsen, bestätigen und anwenden (wie Konsole + Panel-Task)
fn respond(
    panel: &mut ControlPanel<ManualScheduler, MockPresenter>,
    command: &Command,
    body: &[u8],
) -> bool {
    let status = parse_status(body).unwrap();
    match command.acknowledge(status) {
        Ok(outcome) => {
            panel.apply(outcome);
            true
        }
        Err(_) => false,
    }
}

#[test]
fn test_unexpected_status_leaves_panel_untouched() {
    let mut panel = panel();
    assert!(!respond(&mut panel, &Command::Toggle, br#"{"status":"Flashing"}"#));

    assert_eq!(panel.simulator().displayed(), None);
    assert_eq!(panel.scheduler().pending(), 0);
}

#[test]
fn test_raw_flashing_response_starts_cycle() {
    let mut panel = panel();
    let command = Command::StartFlash(durations(250, 750));
    assert!(respond(&mut panel, &command, br#"{"status":"Flashing"}"#));

    assert!(panel.simulator().is_running());
    assert_eq!(panel.simulator().displayed(), Some(DeviceState::On));
    assert_eq!(panel.scheduler().pending(), 1);
}

// ============================================================================
// Tests: Bestätigungen
// ============================================================================

#[test]
fn test_acknowledge_mapping() {
    let flash = Command::StartFlash(durations(500, 500));

    assert_eq!(
        Command::Toggle.acknowledge(DeviceStatus::On),
        Ok(CommandOutcome::Toggled(DeviceState::On))
    );
    assert_eq!(
        Command::Toggle.acknowledge(DeviceStatus::Off),
        Ok(CommandOutcome::Toggled(DeviceState::Off))
    );
    assert_eq!(
        flash.acknowledge(DeviceStatus::Flashing),
        Ok(CommandOutcome::FlashStarted(durations(500, 500)))
    );
    assert_eq!(
        Command::StopFlash.acknowledge(DeviceStatus::FlashingStopped),
        Ok(CommandOutcome::FlashStopped)
    );
    assert_eq!(
        Command::StopFlash.acknowledge(DeviceStatus::Off),
        Ok(CommandOutcome::FlashStopped)
    );
    assert!(flash.acknowledge(DeviceStatus::On).is_err());
    assert!(Command::StopFlash.acknowledge(DeviceStatus::Flashing).is_err());
}
