//! HTTP-Protokoll-Definitionen
//!
//! Definiert die JSON-Bodies für Panel ↔ Geräte-Service Kommunikation:
//! - Antwort: `{"status": "ON" | "OFF" | "Flashing" | "Flashing Stopped"}`
//! - Request für `/startFlash`: `{"onDuration": 500, "offDuration": 1000}`

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Command, DeviceStatus, FlashDurations};

/// JSON Serialisierungs-Buffer für Request-Bodies
/// `{"onDuration":4294967295,"offDuration":4294967295}` passt rein
pub const REQUEST_BUFFER_SIZE: usize = 64;

/// Fehler beim Kodieren/Dekodieren der JSON-Bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Antwort ist kein gültiges JSON oder Status unbekannt
    Malformed,
    /// Serialisierungs-Buffer zu klein
    BufferTooSmall,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed => f.write_str("malformed status payload"),
            ProtocolError::BufferTooSmall => f.write_str("request buffer too small"),
        }
    }
}

impl core::error::Error for ProtocolError {}

/// Server → Panel Antwort
///
/// Unbekannte Felder werden ignoriert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
struct StatusReply {
    status: DeviceStatus,
}

/// Panel → Server Request für `/startFlash`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashRequest {
    pub on_duration: u32,
    pub off_duration: u32,
}

impl From<FlashDurations> for FlashRequest {
    fn from(durations: FlashDurations) -> Self {
        Self {
            on_duration: durations.on_ms(),
            off_duration: durations.off_ms(),
        }
    }
}

/// Parst den Status aus einem Antwort-Body
pub fn parse_status(body: &[u8]) -> Result<DeviceStatus, ProtocolError> {
    serde_json_core::from_slice::<StatusReply>(body)
        .map(|(reply, _)| reply.status)
        .map_err(|_| ProtocolError::Malformed)
}

/// Serialisiert den Request-Body eines Kommandos in `buffer`
///
/// Toggle und Stop haben keinen Body (`None`).
pub fn encode_body<'b>(
    command: &Command,
    buffer: &'b mut [u8],
) -> Result<Option<&'b [u8]>, ProtocolError> {
    match command {
        Command::StartFlash(durations) => {
            let request = FlashRequest::from(*durations);
            let n = serde_json_core::to_slice(&request, buffer)
                .map_err(|_| ProtocolError::BufferTooSmall)?;
            Ok(Some(&buffer[..n]))
        }
        Command::Toggle | Command::StopFlash => Ok(None),
    }
}
