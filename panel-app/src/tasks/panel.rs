// Panel Task - führt die Blink-Simulation auf dem Embassy-Executor aus
use core::future::pending;

use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use log::{debug, info};
use panel_core::{CommandOutcome, ControlPanel, StatusPresenter};

use crate::OutcomeReceiver;
use crate::hal::timer::PendingPhase;
use crate::hal::{EmbassyScheduler, TerminalPresenter, TimerHandle};

/// Panel Logic - Testbare Logik ohne Terminal-Abhängigkeit
///
/// Diese Funktion enthält die komplette Ablaufsteuerung:
/// - Empfängt bestätigte Kommandos vom Konsolen-Thread
/// - Wartet auf den nächsten geplanten Phasenwechsel
/// - Leitet beides an das ControlPanel weiter
///
/// Beide Ereignisse werden mit `select` gleichzeitig erwartet. Kommandos
/// werden zuerst gepollt: ein Stop, der mit einem fälligen Timer
/// zusammenfällt, gewinnt immer.
///
/// # Parameter
/// - `panel`: ControlPanel mit Embassy-Scheduler (Anzeige generisch)
/// - `outcomes`: Channel Receiver für bestätigte Kommandos
pub async fn panel_logic<P: StatusPresenter>(
    mut panel: ControlPanel<EmbassyScheduler, P>,
    outcomes: OutcomeReceiver<'_>,
) {
    loop {
        let next = panel.scheduler().pending();

        match select(outcomes.receive(), wait_for_phase(next)).await {
            // Bestätigtes Kommando vom Konsolen-Thread
            Either::First(outcome) => {
                log_outcome(&outcome);
                panel.apply(outcome);
            }
            // Timer abgelaufen
            Either::Second(handle) => {
                let Some(tick) = panel.scheduler_mut().fire(handle) else {
                    continue;
                };
                if !panel.flip(tick) {
                    debug!("PANEL: Ignored stale phase tick {:?}", tick);
                }
            }
        }
    }
}

/// Wartet bis zur Deadline des Slots, ohne Slot für immer
async fn wait_for_phase(next: Option<PendingPhase>) -> TimerHandle {
    match next {
        Some(phase) => {
            Timer::at(phase.deadline).await;
            phase.handle
        }
        None => pending().await,
    }
}

fn log_outcome(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Toggled(state) => {
            info!("PANEL: Toggle confirmed, LED is {}", state);
        }
        CommandOutcome::FlashStarted(durations) => {
            info!(
                "PANEL: Flashing confirmed ({} ms on / {} ms off)",
                durations.on_ms(),
                durations.off_ms()
            );
        }
        CommandOutcome::FlashStopped => {
            info!("PANEL: Flashing stopped");
        }
    }
}

/// Panel Task - Embassy Task für den Executor-Thread
///
/// Erstellt Scheduler und ControlPanel und ruft dann die testbare
/// `panel_logic()` Funktion auf.
///
/// # Parameter
/// - `presenter`: Terminal-Anzeige
/// - `outcomes`: Channel Receiver für bestätigte Kommandos
#[embassy_executor::task]
pub async fn panel_task(presenter: TerminalPresenter, outcomes: OutcomeReceiver<'static>) {
    info!("PANEL: Task started");
    let panel = ControlPanel::new(EmbassyScheduler::new(), presenter);
    panel_logic(panel, outcomes).await;
}
