// Library-Root: Wiederverwendbare Logik und Module des Panels

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von panel-core
pub use panel_core::{
    Command, CommandOutcome, ControlPanel, DeviceState, DeviceStatus, FlashDurations,
    FlashSimulator, StatusPresenter,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::OUTCOME_CHANNEL_CAPACITY;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Der Channel verbindet zwei Threads (Konsole → Executor), deshalb
// CriticalSectionRawMutex statt NoopRawMutex.

/// Channel für bestätigte Kommandos (Konsolen-Thread → Panel-Task)
pub type OutcomeChannel =
    Channel<CriticalSectionRawMutex, CommandOutcome, OUTCOME_CHANNEL_CAPACITY>;

/// Sender für bestätigte Kommandos (Konsolen-Thread)
pub type OutcomeSender<'a> =
    Sender<'a, CriticalSectionRawMutex, CommandOutcome, OUTCOME_CHANNEL_CAPACITY>;

/// Receiver für bestätigte Kommandos (Panel-Task)
pub type OutcomeReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, CommandOutcome, OUTCOME_CHANNEL_CAPACITY>;
