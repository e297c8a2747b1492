// LED-Panel: steuert eine entfernte LED und simuliert das Blinken lokal
//
// Zwei Threads:
// - Executor-Thread: Embassy Executor mit dem Panel-Task (Timer + Anzeige)
// - Haupt-Thread: Konsole, blockiert auf stdin und HTTP

use std::io::{self, Write};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use embassy_executor::Executor;
use log::{error, info, warn};
use static_cell::StaticCell;

use led_panel::OutcomeChannel;
use led_panel::config::{DEFAULT_LOG_FILTER, PanelConfig};
use led_panel::hal::TerminalPresenter;
use led_panel::tasks::{HELP_TEXT, console_loop, panel_task};
use led_panel::web::CommandClient;

// Channel muss 'static sein für den Panel-Task
static OUTCOMES: OutcomeChannel = OutcomeChannel::new();

/// Main Entry Point
///
/// Lädt Konfiguration, startet den Executor-Thread und führt danach die
/// Konsolen-Schleife aus, bis `quit` oder EOF.
fn main() -> Result<()> {
    // `.env` ist optional, Environment und CLI reichen aus
    let dotenv = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("CONFIG: Failed to load .env: {e}");
        }
    }

    let config = PanelConfig::parse();
    let defaults = config
        .default_durations()
        .context("invalid default flash durations")?;
    let client = CommandClient::from_config(&config).context("failed to create HTTP client")?;
    info!("CLIENT: Device service at {}", client.base_url());

    thread::Builder::new()
        .name("panel".into())
        .spawn(run_executor)
        .context("failed to start executor thread")?;

    let mut out = io::stdout();
    writeln!(out, "{HELP_TEXT}")?;

    console_loop(io::stdin().lock(), out, &client, defaults, OUTCOMES.sender())
        .context("console input failed")?;

    info!("CONSOLE: Bye");
    Ok(())
}

/// Executor-Thread: besitzt Simulation, Scheduler und Anzeige
///
/// Kehrt nie zurück, der Prozess endet mit dem Haupt-Thread.
fn run_executor() {
    static EXECUTOR: StaticCell<Executor> = StaticCell::new();
    let executor = EXECUTOR.init(Executor::new());

    executor.run(|spawner| {
        let presenter = TerminalPresenter::stdout();
        if let Err(e) = spawner.spawn(panel_task(presenter, OUTCOMES.receiver())) {
            error!("PANEL: Failed to spawn task: {e:?}");
        }
    })
}
