//! Panel Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Runtime-Dependencies (kein Executor, kein HTTP).
//! Sie definiert das Datenmodell, die Traits für Timer und Anzeige
//! und die Blink-Simulation als reine Zustandsmaschine.

#![no_std]

pub mod control;
pub mod logic;
#[cfg(feature = "serde")]
pub mod protocol;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use control::ControlPanel;
pub use logic::{FlashCycle, FlashSimulator};
#[cfg(feature = "serde")]
pub use protocol::ProtocolError;
pub use traits::{PhaseScheduler, StatusPresenter};
pub use types::{
    Command, CommandOutcome, CycleId, DeviceState, DeviceStatus, DurationError, FlashDurations,
    PhaseTick, UnexpectedStatus,
};
