// Projekt-Konfiguration: Konstanten und Laufzeit-Einstellungen

use std::time::Duration;

use clap::Parser;
use panel_core::{DurationError, FlashDurations};

// ============================================================================
// Geräte-Service Konfiguration
// ============================================================================

/// Basis-URL des Geräte-Service
/// Der ESP32 ist per mDNS unter `led.local` erreichbar
pub const DEFAULT_DEVICE_URL: &str = "http://led.local";

/// Timeout für einen HTTP-Request in Millisekunden
/// Kein Retry: nach Ablauf wird der Fehler gemeldet
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

// ============================================================================
// Blink-Konfiguration
// ============================================================================

/// AN-Dauer wenn `flash` ohne Argumente eingegeben wird
pub const DEFAULT_ON_DURATION_MS: u32 = 500;

/// AUS-Dauer wenn `flash` ohne Argumente eingegeben wird
pub const DEFAULT_OFF_DURATION_MS: u32 = 500;

// ============================================================================
// Runtime Konfiguration
// ============================================================================

/// Kapazität des Channels Konsole → Panel-Task
/// Der Konsolen-Thread sendet höchstens ein Ergebnis pro Eingabezeile
pub const OUTCOME_CHANNEL_CAPACITY: usize = 4;

/// Standard-Filter für env_logger, `RUST_LOG` überschreibt ihn
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Laufzeit-Konfiguration
///
/// Werte kommen aus (absteigende Priorität): CLI-Argumenten,
/// Environment-Variablen, `.env` file, Defaults oben.
#[derive(Debug, Clone, Parser)]
#[command(name = "led-panel", version, about = "Control panel for a remote LED")]
pub struct PanelConfig {
    /// Basis-URL des Geräte-Service
    #[arg(long = "url", env = "LED_PANEL_URL", default_value = DEFAULT_DEVICE_URL)]
    pub device_url: String,

    /// Request-Timeout in Millisekunden
    #[arg(long, env = "LED_PANEL_TIMEOUT_MS", default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// AN-Dauer für `flash` ohne Argumente
    #[arg(long, env = "LED_PANEL_ON_MS", default_value_t = DEFAULT_ON_DURATION_MS)]
    pub on_ms: u32,

    /// AUS-Dauer für `flash` ohne Argumente
    #[arg(long, env = "LED_PANEL_OFF_MS", default_value_t = DEFAULT_OFF_DURATION_MS)]
    pub off_ms: u32,
}

impl PanelConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Standard-Dauern, 0 wird abgelehnt
    pub fn default_durations(&self) -> Result<FlashDurations, DurationError> {
        FlashDurations::from_millis(self.on_ms, self.off_ms)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            device_url: DEFAULT_DEVICE_URL.to_string(),
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            on_ms: DEFAULT_ON_DURATION_MS,
            off_ms: DEFAULT_OFF_DURATION_MS,
        }
    }
}
