//! Background worker standing in for the casting/device backend.

use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::DeviceCfg;

/// Commands sent from the UI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCmd {
    /// Issue a fresh pairing PIN and cast session.
    RegeneratePin,
    /// Report network/storage/uptime information.
    QueryStatus,
    /// The app was restarted from technical mode.
    MarkRestart,
}

/// Snapshot shown on the technical screen.
#[derive(Clone, Debug)]
pub struct SystemInfo {
    pub network: String,
    pub drives: Vec<String>,
    pub version: String,
    pub last_restart: DateTime<Local>,
    pub uptime: chrono::Duration,
}

/// Events emitted by the worker for UI updates.
#[derive(Clone, Debug)]
pub enum DeviceEvent {
    /// New pairing credentials.
    PinIssued { pin: String, session: Uuid },
    /// Status snapshot.
    Status(SystemInfo),
    /// Informational log message.
    Log(String),
}

/// Worker loop: answer commands one at a time until the UI hangs up.
pub async fn run(mut rx: mpsc::Receiver<DeviceCmd>, tx: mpsc::Sender<DeviceEvent>, cfg: DeviceCfg) {
    let latency = Duration::from_millis(cfg.latency_ms);
    let started = Local::now();
    let mut last_restart = started;
    tracing::info!(device = %cfg.name, "device worker started");

    while let Some(cmd) = rx.recv().await {
        // Pretend the backend takes a moment to answer.
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let ev = match cmd {
            DeviceCmd::RegeneratePin => {
                let session = Uuid::new_v4();
                let pin = pin_from(session);
                tracing::info!(%session, "cast pin regenerated");
                DeviceEvent::PinIssued { pin, session }
            }
            DeviceCmd::QueryStatus => DeviceEvent::Status(SystemInfo {
                network: cfg.network.clone(),
                drives: cfg.drives.clone(),
                version: cfg.version.clone(),
                last_restart,
                uptime: Local::now() - last_restart,
            }),
            DeviceCmd::MarkRestart => {
                last_restart = Local::now();
                tracing::info!("restart recorded");
                DeviceEvent::Log(format!("restarted at {}", last_restart.format("%H:%M")))
            }
        };
        if tx.send(ev).await.is_err() {
            break;
        }
    }
    tracing::info!(
        ran_for_secs = (Local::now() - started).num_seconds(),
        "device worker stopped"
    );
}

/// Four-digit PIN in 1000..=9999 derived from the session id.
fn pin_from(session: Uuid) -> String {
    (1000 + session.as_u128() % 9000).to_string()
}
