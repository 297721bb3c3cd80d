//! Audit trail of everything that changed the firewall
//!
//! Every command sent to the tool, every profile definition written or
//! removed, and every export becomes one JSON object per line in
//! `<state_dir>/audit.log`. Failures to write the trail are logged and
//! otherwise ignored; they never block the operation being audited.

use crate::core::error::{Error, Result};
use crate::core::ufw::is_error_output;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    RunCommand,
    CreateProfile,
    DeleteProfile,
    ExportRules,
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub event: EventType,
    pub ok: bool,
    /// What was acted on (`command`, `profile` or `path`)
    pub details: serde_json::Value,
    /// Tool or I/O error text, only for failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEvent {
    /// Builds an event from user-facing result text, which carries the
    /// tool's `"Error: "` prefix when the operation failed
    pub fn from_output(event: EventType, details: serde_json::Value, output: &str) -> Self {
        let failed = is_error_output(output);
        Self {
            timestamp: chrono::Utc::now(),
            event,
            ok: !failed,
            details,
            error: failed.then(|| output.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Audit log at `<state_dir>/audit.log`
    pub fn new() -> Result<Self> {
        crate::utils::get_state_dir()
            .map(|dir| Self::at(dir.join("audit.log")))
            .ok_or(Error::NoStateDir)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends `event` as a single line and flushes it to disk
    pub async fn append(&self, event: &AuditEvent) -> Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.sync_data().await?;
        Ok(())
    }

    /// Newest `limit` events, newest first. Unparseable lines are skipped.
    pub async fn read_recent(&self, limit: usize) -> Result<Vec<AuditEvent>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(content
            .lines()
            .rev()
            .filter_map(|line| serde_json::from_str(line).ok())
            .take(limit)
            .collect())
    }

    async fn record(&self, event: AuditEvent) {
        if let Err(e) = self.append(&event).await {
            tracing::warn!("Audit log {} not written: {e}", self.path.display());
        }
    }

    /// Records a command sent to the tool and whether it succeeded
    pub async fn log_command(&self, command: &str, output: &str) {
        self.record(AuditEvent::from_output(
            EventType::RunCommand,
            serde_json::json!({ "command": command }),
            output,
        ))
        .await;
    }

    pub async fn log_profile(&self, event: EventType, name: &str, output: &str) {
        self.record(AuditEvent::from_output(
            event,
            serde_json::json!({ "profile": name }),
            output,
        ))
        .await;
    }

    pub async fn log_export(&self, result: &Result<PathBuf>) {
        let event = match result {
            Ok(path) => AuditEvent::from_output(
                EventType::ExportRules,
                serde_json::json!({ "path": path.display().to_string() }),
                "",
            ),
            Err(e) => AuditEvent {
                ok: false,
                error: Some(e.to_string()),
                ..AuditEvent::from_output(EventType::ExportRules, serde_json::json!({}), "")
            },
        };
        self.record(event).await;
    }
}
