// Web-Modul für die HTTP-Kommunikation mit dem Geräte-Service
// Das JSON-Protokoll selbst liegt in panel-core (feature "serde")

pub mod client;

pub use client::{CommandClient, CommandError, CommandTransport};
