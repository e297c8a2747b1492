// Command Client - sendet Kommandos an den Geräte-Service
//
// Ein Request pro Benutzeraktion, kein Retry. Jeder Fehler wird als
// CommandError gemeldet und erreicht die Simulation nie.

use std::time::Duration;

use log::{debug, info};
use panel_core::protocol::{self, ProtocolError, REQUEST_BUFFER_SIZE};
use panel_core::{Command, CommandOutcome, UnexpectedStatus};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::config::PanelConfig;

/// Maximale Länge eines fehlerhaften Bodys im Fehlertext
const MALFORMED_BODY_PREVIEW: usize = 64;

/// Fehler eines Kommandos (Transport, HTTP-Status oder Payload)
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("HTTP client setup failed: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("{command} request failed: {source}")]
    Transport {
        command: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{command} request failed: HTTP {status}")]
    Http {
        command: &'static str,
        status: StatusCode,
    },

    #[error("{command} response malformed: {body:?}")]
    Malformed { command: &'static str, body: String },

    #[error(transparent)]
    Unexpected(#[from] UnexpectedStatus),

    #[error("request encoding failed: {0}")]
    Encode(#[from] ProtocolError),
}

/// Trait für den Versand von Kommandos
///
/// # Implementierungen
/// - **Production:** CommandClient (HTTP)
/// - **Testing:** MockTransport (bestätigt ohne Netzwerk)
pub trait CommandTransport {
    /// Sendet ein Kommando, `Ok` nur bei bestätigter Antwort
    fn send(&self, command: &Command) -> Result<CommandOutcome, CommandError>;
}

/// HTTP Client für `/toggle`, `/startFlash` und `/stopFlash`
pub struct CommandClient {
    http: Client,
    base_url: String,
}

impl CommandClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CommandError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CommandError::Setup)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &PanelConfig) -> Result<Self, CommandError> {
        Self::new(&config.device_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Vollständige URL des Endpoints eines Kommandos
    pub fn url(&self, command: &Command) -> String {
        format!("{}{}", self.base_url, command.path())
    }
}

impl CommandTransport for CommandClient {
    /// Sendet ein Kommando und prüft die Antwort
    ///
    /// Liefert nur dann ein `CommandOutcome`, wenn der Server das Kommando
    /// mit einem passenden Status bestätigt hat.
    fn send(&self, command: &Command) -> Result<CommandOutcome, CommandError> {
        let url = self.url(command);
        let name = command.name();
        debug!("CLIENT: POST {url}");

        let mut buffer = [0u8; REQUEST_BUFFER_SIZE];
        let mut request = self.http.post(&url);
        if let Some(body) = protocol::encode_body(command, &mut buffer)? {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let response = request.send().map_err(|source| CommandError::Transport {
            command: name,
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommandError::Http {
                command: name,
                status,
            });
        }

        let body = response.bytes().map_err(|source| CommandError::Transport {
            command: name,
            source,
        })?;

        let device_status =
            protocol::parse_status(&body).map_err(|_| CommandError::Malformed {
                command: name,
                body: preview(&body),
            })?;

        let outcome = command.acknowledge(device_status)?;
        info!("CLIENT: {name} confirmed with status '{device_status}'");
        Ok(outcome)
    }
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.chars().take(MALFORMED_BODY_PREVIEW).collect()
}
