//! Persisted CLI settings and the environment breadcrumb table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::core::models::Environment;

/// Host used when neither the settings file nor `PAAS_HOST` provide one
pub const DEFAULT_HOST: &str = "https://api.paas.example";

/// API version prefix appended to the host
pub const DEFAULT_API_VERSION: &str = "/v1";

/// Request timeout used when `timeout_secs` is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A local alias for a remote environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedEnv {
    pub environment_id: String,
    pub name: String,
    #[serde(default)]
    pub pod: Option<String>,
    pub org_id: String,
}

impl From<&Environment> for AssociatedEnv {
    fn from(env: &Environment) -> Self {
        Self {
            environment_id: env.id.clone(),
            name: env.name.clone(),
            pod: env.pod.clone(),
            org_id: env.organization_id.clone(),
        }
    }
}

/// Contents of `settings.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_id: Option<String>,

    /// Pod used when no environment is associated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,

    /// Alias picked when `--env` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Breadcrumbs: alias -> environment
    pub environments: BTreeMap<String, AssociatedEnv>,

    #[serde(skip)]
    pub(crate) path: PathBuf,
}

/// Keys editable through `paas config`
pub const SETTINGS_KEYS: &[(&str, &str)] = &[
    ("host", "API host, e.g. https://api.paas.example"),
    ("api_version", "API version path prefix, e.g. /v1"),
    ("pod", "Pod used when no environment is associated"),
    ("default_env", "Environment alias used when --env is not given"),
    ("timeout_secs", "HTTP request timeout in seconds"),
];

impl Settings {
    /// Load settings from `path`; a missing file yields empty settings
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| Error::local_state("read", path, e))?;
            if contents.trim().is_empty() {
                Settings::default()
            } else {
                serde_yml::from_str::<Settings>(&contents)
                    .map_err(|e| Error::local_state("parse", path, e))?
            }
        } else {
            Settings::default()
        };
        settings.path = path.to_path_buf();
        Ok(settings)
    }

    /// Write settings back to the file they were loaded from
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::local_state("write", &self.path, e))?;
            }
        }
        let contents = serde_yml::to_string(self)
            .map_err(|e| Error::local_state("serialize", &self.path, e))?;
        write_owner_only(&self.path, contents.as_bytes())
            .map_err(|e| Error::local_state("write", &self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-user settings path (`~/.config/paas/settings.yaml` on Linux)
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "paas")
            .map(|dirs| dirs.config_dir().join("settings.yaml"))
    }

    /// Pick the explicit path if given, otherwise the per-user default
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path().ok_or_else(|| Error::LocalState {
                action: "locate",
                path: PathBuf::from("settings.yaml"),
                message: "could not determine the user config directory".to_string(),
            }),
        }
    }

    /// Store a breadcrumb, optionally making it the default
    pub fn add_breadcrumb(&mut self, alias: &str, env: AssociatedEnv, make_default: bool) {
        self.environments.insert(alias.to_string(), env);
        if make_default || self.environments.len() == 1 {
            self.default_env = Some(alias.to_string());
        }
    }

    /// Remove a breadcrumb; returns whether one existed
    pub fn delete_breadcrumb(&mut self, alias: &str) -> bool {
        let removed = self.environments.remove(alias).is_some();
        if self.default_env.as_deref() == Some(alias) {
            self.default_env = None;
        }
        removed
    }

    pub fn clear_session(&mut self) {
        self.session_token = None;
        self.users_id = None;
    }

    /// Read a `SETTINGS_KEYS` value as a string
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "host" => self.host.clone(),
            "api_version" => self.api_version.clone(),
            "pod" => self.pod.clone(),
            "default_env" => self.default_env.clone(),
            "timeout_secs" => self.timeout_secs.map(|t| t.to_string()),
            _ => None,
        }
    }

    /// Set a `SETTINGS_KEYS` value, validating its shape
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "host" => self.host = Some(value.trim_end_matches('/').to_string()),
            "api_version" => self.api_version = Some(normalize_version(value)),
            "pod" => self.pod = Some(value.to_string()),
            "default_env" => {
                if !self.environments.contains_key(value) {
                    return Err(Error::NotFound(format!(
                        "No environment with an alias of \"{}\" has been associated",
                        value
                    )));
                }
                self.default_env = Some(value.to_string());
            }
            "timeout_secs" => {
                let secs = value.parse::<u64>().map_err(|_| {
                    Error::Validation(format!("timeout_secs must be a whole number, got '{}'", value))
                })?;
                self.timeout_secs = Some(secs);
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Clear a `SETTINGS_KEYS` value; returns whether it was set
    pub fn unset_value(&mut self, key: &str) -> Result<bool> {
        let was_set = match key {
            "host" => self.host.take().is_some(),
            "api_version" => self.api_version.take().is_some(),
            "pod" => self.pod.take().is_some(),
            "default_env" => self.default_env.take().is_some(),
            "timeout_secs" => self.timeout_secs.take().is_some(),
            _ => return Err(unknown_key(key)),
        };
        Ok(was_set)
    }
}

/// The file carries the session token; keep it readable by the owner only
#[cfg(unix)]
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

fn unknown_key(key: &str) -> Error {
    let valid: Vec<&str> = SETTINGS_KEYS.iter().map(|(k, _)| *k).collect();
    Error::Validation(format!(
        "Unknown settings key '{}' (valid keys: {})",
        key,
        valid.join(", ")
    ))
}

/// `v1`, `/v1/` and `/v1` all become `/v1`
pub fn normalize_version(value: &str) -> String {
    let trimmed = value.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
