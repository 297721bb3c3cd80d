//! Restore-script export
//!
//! Snapshots the tool's persisted rule files into a self-contained shell
//! script that overwrites them and reloads the firewall. The script is written
//! executable, so it is meant to be reviewed before running.

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Rule files persisted by `ufw`, relative to its rules directory
pub const RULE_FILES: [&str; 2] = ["user.rules", "user6.rules"];

/// Notification shown after a successful export
pub fn exported_message(file_name: &str) -> String {
    format!(
        "Rules exported to {file_name}.\nCareful!!! This file is executable and will reset your current UFW state when run.\nPlease review it before executing."
    )
}

/// Builds the restore script from the current rule files in `rules_dir`.
pub async fn build_restore_script(tool: &str, rules_dir: &Path) -> Result<String> {
    let mut script = String::from("#!/bin/bash\nset -e\n\necho \"Restoring UFW rules...\"\n\n");

    for file in RULE_FILES {
        let path = rules_dir.join(file);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| Error::RuleFile {
                path: path.display().to_string(),
                source,
            })?;
        script.push_str(&format!(
            "cat <<'EOF' > {}\n{contents}\nEOF\n\n",
            path.display()
        ));
    }

    script.push_str(&format!("{tool} --force reload\necho \"UFW rules restored.\"\n"));
    Ok(script)
}

/// Writes `script` to `path` with mode 0o755, replacing any existing file.
pub async fn write_script(path: &Path, script: &str) -> Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o755);

    let mut file = options.open(path).await?;
    file.write_all(script.as_bytes()).await?;
    file.sync_all().await?;

    // Mode on open only applies to new files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
    }

    Ok(())
}

/// Exports the current rules to `output_dir/file_name`.
///
/// Returns the written path.
pub async fn export_rules(
    tool: &str,
    rules_dir: &Path,
    output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let script = build_restore_script(tool, rules_dir).await?;
    let path = output_dir.join(file_name);
    write_script(&path, &script).await?;
    tracing::info!("Exported restore script to {}", path.display());
    Ok(path)
}
