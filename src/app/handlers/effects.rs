//! Effect execution
//!
//! [`Backend::execute`] performs one leaf [`Effect`] and returns the message
//! that reports its result. It is the only place that talks to the tool, the
//! filesystem or the clock, and it never touches [`State`](crate::app::State).
//!
//! # Async
//! Effects run on spawned tokio tasks. Commands within one effect run
//! sequentially, in order, so a batch of positional deletions stays valid.

use crate::app::{Completion, Effect, Message, Snapshot};
use crate::audit::{AuditLog, EventType};
use crate::config::AppConfig;
use crate::core::export;
use crate::core::profiles::{self, Profile};
use crate::core::status;
use crate::core::ufw::{CommandRunner, Ufw, is_error_output};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything needed to carry out effects, cheap to clone into tasks
pub struct Backend<R> {
    runner: Arc<R>,
    ufw: Ufw,
    config: Arc<AppConfig>,
    /// Directory the restore script is written to
    export_dir: PathBuf,
    audit: Option<AuditLog>,
}

impl<R> Clone for Backend<R> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
            ufw: self.ufw.clone(),
            config: Arc::clone(&self.config),
            export_dir: self.export_dir.clone(),
            audit: self.audit.clone(),
        }
    }
}

impl<R: CommandRunner> Backend<R> {
    pub fn new(runner: R, config: AppConfig, export_dir: PathBuf) -> Self {
        Self {
            runner: Arc::new(runner),
            ufw: Ufw::new(config.tool.clone()),
            config: Arc::new(config),
            export_dir,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Performs a leaf effect. Control effects (`None`, `Quit`, `Batch`) are
    /// the event loop's business and produce no message here.
    pub async fn execute(&self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::None | Effect::Quit | Effect::Batch(_) => None,
            Effect::Run {
                commands,
                completion,
            } => Some(self.run_commands(&commands, completion).await),
            Effect::CreateProfiles {
                profiles,
                completion,
            } => Some(self.create_profiles(&profiles, completion).await),
            Effect::DeleteProfiles(profiles) => Some(self.delete_profiles(&profiles).await),
            Effect::Export => Some(self.export().await),
            Effect::Reload => Some(Message::Reloaded(self.reload().await)),
            Effect::ExpireNotification(after) => {
                tokio::time::sleep(after).await;
                Some(Message::NotificationExpired)
            }
        }
    }

    async fn run(&self, command: &str) -> String {
        let output = self.runner.run(command).await;
        if let Some(audit) = &self.audit {
            audit.log_command(command, &output).await;
        }
        output
    }

    async fn run_commands(&self, commands: &[String], completion: Completion) -> Message {
        let mut output = String::new();
        for command in commands {
            output.push_str(&self.run(command).await);
        }
        Message::CommandFinished { completion, output }
    }

    async fn create_profiles(&self, to_create: &[Profile], completion: Completion) -> Message {
        let mut outputs = Vec::with_capacity(to_create.len());
        for profile in to_create {
            let output = profiles::create_profile(
                self.runner.as_ref(),
                &self.ufw,
                &self.config.applications_dir,
                profile,
            )
            .await;
            if let Some(audit) = &self.audit {
                audit
                    .log_profile(EventType::CreateProfile, &profile.name, &output)
                    .await;
            }
            outputs.push(output);
        }
        Message::CommandFinished {
            completion,
            output: outputs.join("\n"),
        }
    }

    async fn delete_profiles(&self, to_delete: &[Profile]) -> Message {
        let mut outputs = Vec::with_capacity(to_delete.len());
        for profile in to_delete {
            let output =
                profiles::delete_profile(&self.config.applications_dir, profile).await;
            if let Some(audit) = &self.audit {
                audit
                    .log_profile(EventType::DeleteProfile, &profile.name, &output)
                    .await;
            }
            outputs.push(output);
        }
        Message::CommandFinished {
            completion: Completion::ProfilesDeleted,
            output: outputs.join("\n"),
        }
    }

    async fn export(&self) -> Message {
        let result = export::export_rules(
            self.ufw.tool(),
            &self.config.rules_dir,
            &self.export_dir,
            &self.config.export_file_name,
        )
        .await;

        if let Some(audit) = &self.audit {
            audit.log_export(&result).await;
        }

        let output = match result {
            Ok(_) => export::exported_message(&self.config.export_file_name),
            Err(e) => {
                tracing::warn!("Export failed: {e}");
                format!("Error exporting rules: {e}")
            }
        };
        Message::CommandFinished {
            completion: Completion::Exported,
            output,
        }
    }

    /// Reads status, numbered rules and every installed profile
    async fn reload(&self) -> Snapshot {
        let status_text = self.runner.run(&self.ufw.status_verbose()).await;
        let rules_text = self.runner.run(&self.ufw.status_numbered()).await;

        let list = self.runner.run(&self.ufw.app_list()).await;
        let mut installed = Vec::new();
        if is_error_output(&list) {
            tracing::warn!("Could not list application profiles: {}", list.trim());
        } else {
            for name in status::parse_app_list(&list) {
                let info = self.runner.run(&self.ufw.app_info(&name)).await;
                installed.push(status::parse_profile_info(&name, &info));
            }
        }

        Snapshot {
            status_text,
            rules_text,
            profiles: installed,
        }
    }
}
