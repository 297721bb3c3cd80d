//! Application profile management
//!
//! A profile is a named port/protocol template registered with `ufw`. Installed
//! profiles are parsed from `ufw app list` / `ufw app info`; installable ones
//! come from a static catalog of common services minus whatever is installed.
//!
//! Creating a profile writes an INI-like definition file into the tool's
//! applications directory and then asks the tool to re-index it:
//!
//! ```text
//! [Nginx Full]
//! title=Nginx web server (HTTP and HTTPS)
//! description=Nginx web server (HTTP and HTTPS)
//! ports=80,443/tcp
//! ```

use crate::core::ufw::{CommandRunner, ERROR_PREFIX, Ufw, is_error_output};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Extension `ufw` expects for definition files we create
const PROFILE_EXTENSION: &str = "profile";

/// A named port/protocol template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    /// Unique key, also the section name in the definition file
    pub name: String,
    pub title: String,
    pub description: String,
    /// Port specs such as `22/tcp` or `80,443/tcp`, in file order
    pub ports: Vec<String>,
    pub installed: bool,
}

impl Profile {
    fn from_catalog(name: &str, title: &str, ports: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: String::new(),
            ports: ports.iter().map(ToString::to_string).collect(),
            installed: false,
        }
    }

    /// Renders the definition file contents.
    ///
    /// Empty title falls back to the name and empty description to the title,
    /// since `ufw` rejects definitions with blank keys.
    pub fn to_definition(&self) -> String {
        let title = if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        };
        let description = if self.description.is_empty() {
            title
        } else {
            &self.description
        };
        format!(
            "[{}]\ntitle={}\ndescription={}\nports={}\n",
            self.name,
            title,
            description,
            self.ports.join("|")
        )
    }
}

/// Error type for profile definition file operations
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid profile name: {0}")]
    InvalidName(String),

    #[error("Profile definition not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CatalogEntry = (&'static str, &'static str, &'static [&'static str]);

const CATALOG: &[CatalogEntry] = &[
    // Common access
    ("OpenSSH", "Secure shell access (SSH)", &["22/tcp"]),
    ("HTTP", "Generic HTTP service", &["80/tcp"]),
    ("HTTPS", "Generic HTTPS service", &["443/tcp"]),
    // Web servers
    ("Nginx HTTP", "Nginx web server (HTTP only)", &["80/tcp"]),
    ("Nginx HTTPS", "Nginx web server (HTTPS only)", &["443/tcp"]),
    ("Nginx Full", "Nginx web server (HTTP and HTTPS)", &["80,443/tcp"]),
    ("Apache", "Apache web server (HTTP only)", &["80/tcp"]),
    ("Apache Secure", "Apache web server (HTTPS only)", &["443/tcp"]),
    ("Apache Full", "Apache web server (HTTP and HTTPS)", &["80,443/tcp"]),
    // Databases
    ("PostgreSQL", "PostgreSQL database server", &["5432/tcp"]),
    ("MySQL", "MySQL database server", &["3306/tcp"]),
    ("MongoDB", "MongoDB database", &["27017/tcp"]),
    ("Redis", "Redis key-value store", &["6379/tcp"]),
    ("InfluxDB", "InfluxDB time series database", &["8086/tcp"]),
    ("Elasticsearch", "Elasticsearch search engine", &["9200,9300/tcp"]),
    // DevOps / containers
    ("Docker Remote API", "Docker remote API", &["2375,2376/tcp"]),
    ("Kubernetes API", "Kubernetes API server", &["6443/tcp"]),
    (
        "Docker Swarm",
        "Docker Swarm cluster communication",
        &["2377,7946/tcp", "7946,4789/udp"],
    ),
    // VPN
    ("WireGuard", "WireGuard VPN", &["51820/udp"]),
    ("OpenVPN", "OpenVPN", &["1194/udp"]),
    // Email
    ("SMTP", "Simple Mail Transfer Protocol", &["25/tcp"]),
    ("SMTPS", "SMTP over SSL", &["465/tcp"]),
    ("Submission", "Mail Submission Agent", &["587/tcp"]),
    ("IMAPS", "IMAP over SSL", &["993/tcp"]),
    ("POP3S", "POP3 over SSL", &["995/tcp"]),
    // DNS
    ("DNS", "Domain Name System", &["53/tcp", "53/udp"]),
    // File sharing
    (
        "Samba",
        "Windows file/printer sharing (Samba)",
        &["137,138/udp", "139,445/tcp"],
    ),
    ("NFS", "Network File System", &["111,2049/tcp", "111,2049/udp"]),
    // Misc
    ("CUPS", "Common Unix Printing System", &["631/tcp"]),
    ("VNC", "Virtual Network Computing (remote desktop)", &["5900/tcp"]),
    ("Deluge", "Deluge BitTorrent client", &["6881/tcp", "6881/udp"]),
    ("Prometheus", "Prometheus monitoring", &["9090/tcp"]),
    ("Grafana", "Grafana dashboards", &["3000/tcp"]),
    ("RabbitMQ", "RabbitMQ message broker", &["5672,15672/tcp"]),
    ("Mosquitto", "Mosquitto MQTT broker", &["1883,8883/tcp"]),
];

/// Returns the full static catalog
pub fn catalog() -> Vec<Profile> {
    CATALOG
        .iter()
        .map(|(name, title, ports)| Profile::from_catalog(name, title, ports))
        .collect()
}

/// Catalog entries whose name is not among `installed`
pub fn installable(installed: &[Profile]) -> Vec<Profile> {
    let installed_names: HashSet<&str> = installed.iter().map(|p| p.name.as_str()).collect();
    catalog()
        .into_iter()
        .filter(|p| !installed_names.contains(p.name.as_str()))
        .collect()
}

/// Path of the definition file for `name` inside `dir`.
/// Validates the name first so it can never escape the directory.
pub fn definition_path(dir: &Path, name: &str) -> Result<PathBuf, ProfileError> {
    crate::validators::validate_profile_name(name)
        .map_err(|e| ProfileError::InvalidName(e.to_string()))?;
    Ok(dir.join(format!("{name}.{PROFILE_EXTENSION}")))
}

/// Writes a profile definition atomically.
///
/// The temp file is created in the target directory so the final rename never
/// crosses filesystems. Permissions are 0o644 because `ufw` reads these files
/// as part of its own configuration.
pub async fn write_definition(dir: &Path, profile: &Profile) -> Result<PathBuf, ProfileError> {
    let path = definition_path(dir, &profile.name)?;
    let dir = dir.to_path_buf();
    let contents = profile.to_definition();
    let target = path.clone();

    tokio::task::spawn_blocking(move || -> Result<(), ProfileError> {
        let mut file = tempfile::NamedTempFile::new_in(&dir)?;
        file.write_all(contents.as_bytes())?;
        file.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }

        file.persist(&target).map_err(|e| ProfileError::Io(e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| ProfileError::Io(std::io::Error::other(e)))??;

    Ok(path)
}

/// Removes the definition file we created for `profile`.
pub async fn delete_definition(dir: &Path, profile: &Profile) -> Result<(), ProfileError> {
    let path = definition_path(dir, &profile.name)?;
    if !tokio::fs::try_exists(&path).await? {
        return Err(ProfileError::NotFound(path.display().to_string()));
    }
    tokio::fs::remove_file(path).await?;
    Ok(())
}

/// Writes the definition for `profile` and registers it with the tool.
///
/// Returns the user-facing result text; failures carry the [`ERROR_PREFIX`].
pub async fn create_profile<R: CommandRunner>(
    runner: &R,
    ufw: &Ufw,
    dir: &Path,
    profile: &Profile,
) -> String {
    if let Err(e) = write_definition(dir, profile).await {
        tracing::warn!("Failed to write profile '{}': {e}", profile.name);
        return format!("{ERROR_PREFIX}creating profile {}: {e}", profile.name);
    }

    let output = runner.run(&ufw.app_update(&profile.name)).await;
    if is_error_output(&output) {
        // A definition the tool rejected must not linger for the next reload
        if let Err(e) = delete_definition(dir, profile).await {
            tracing::warn!("Failed to remove rejected profile '{}': {e}", profile.name);
        }
        return output;
    }

    tracing::info!("Profile '{}' created", profile.name);
    format!("Profile {} created", profile.name)
}

/// Deletes the definition for `profile`, returning user-facing result text.
pub async fn delete_profile(dir: &Path, profile: &Profile) -> String {
    match delete_definition(dir, profile).await {
        Ok(()) => {
            tracing::info!("Profile '{}' deleted", profile.name);
            format!("Profile {} deleted", profile.name)
        }
        Err(e) => {
            tracing::warn!("Failed to delete profile '{}': {e}", profile.name);
            format!("{ERROR_PREFIX}deleting profile {}: {e}", profile.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::ScriptedRunner;

    fn sample_profile() -> Profile {
        Profile {
            name: "My App".to_string(),
            title: "My application".to_string(),
            description: String::new(),
            ports: vec!["8080/tcp".to_string(), "9000:9100/udp".to_string()],
            installed: false,
        }
    }

    #[test]
    fn test_definition_format() {
        assert_eq!(
            sample_profile().to_definition(),
            "[My App]\ntitle=My application\ndescription=My application\nports=8080/tcp|9000:9100/udp\n"
        );
    }

    #[test]
    fn test_definition_falls_back_to_name() {
        let profile = Profile {
            name: "bare".into(),
            ports: vec!["1/tcp".into()],
            ..Profile::default()
        };
        assert!(profile.to_definition().contains("title=bare\ndescription=bare\n"));
    }

    #[test]
    fn test_catalog_names_are_unique_and_valid() {
        let profiles = catalog();
        let names: HashSet<_> = profiles.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names.len(), profiles.len());
        for profile in &profiles {
            assert!(crate::validators::validate_profile_name(&profile.name).is_ok());
            assert!(crate::validators::validate_port_spec(&profile.ports.join("|")).is_ok());
        }
    }

    #[test]
    fn test_installable_is_set_difference_by_name() {
        let installed = vec![Profile {
            name: "OpenSSH".into(),
            title: "Something else entirely".into(),
            installed: true,
            ..Profile::default()
        }];
        let available = installable(&installed);
        assert_eq!(available.len(), catalog().len() - 1);
        assert!(available.iter().all(|p| p.name != "OpenSSH"));
        assert!(available.iter().all(|p| !p.installed));
    }

    #[test]
    fn test_definition_path_rejects_traversal() {
        let dir = Path::new("/etc/ufw/applications.d");
        assert!(definition_path(dir, "../passwd").is_err());
        assert_eq!(
            definition_path(dir, "Nginx Full").unwrap(),
            PathBuf::from("/etc/ufw/applications.d/Nginx Full.profile")
        );
    }

    #[tokio::test]
    async fn test_write_and_delete_definition() {
        let dir = tempfile::tempdir().unwrap();
        let profile = sample_profile();

        let path = write_definition(dir.path(), &profile).await.unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[My App]\n"));

        delete_definition(dir.path(), &profile).await.unwrap();
        assert!(!path.exists());
        assert!(matches!(
            delete_definition(dir.path(), &profile).await,
            Err(ProfileError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_profile_registers_with_tool() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::default();
        let ufw = Ufw::new("ufw");

        let output = create_profile(&runner, &ufw, dir.path(), &sample_profile()).await;

        assert_eq!(output, "Profile My App created");
        assert_eq!(runner.commands(), vec!["ufw app update \"My App\"".to_string()]);
    }

    #[tokio::test]
    async fn test_create_profile_reports_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::default()
            .respond("app update", "Error: exit status: 1\nERROR: Invalid ports\n");
        let profile = sample_profile();
        let output = create_profile(&runner, &Ufw::new("ufw"), dir.path(), &profile).await;

        assert_eq!(output, "Error: exit status: 1\nERROR: Invalid ports\n");
        let path = definition_path(dir.path(), &profile.name).unwrap();
        assert!(!path.exists(), "rejected definition left behind");
    }

    #[tokio::test]
    async fn test_delete_missing_profile_is_error_text() {
        let dir = tempfile::tempdir().unwrap();
        let output = delete_profile(dir.path(), &sample_profile()).await;
        assert!(is_error_output(&output));
    }
}
