use crate::error::{QaError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// CheckConfig
// ---------------------------------------------------------------------------

/// Inputs for one run. Loaded from an optional YAML file, then overridden
/// field-by-field from the command line. The tool never writes any of the
/// paths named here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Site root the published pages are served under.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listing path segment under the base URL.
    #[serde(default = "default_pages_path")]
    pub pages_path: String,

    /// Local directory holding the `test-<N>` artifact directories.
    #[serde(default = "default_artifacts_root")]
    pub artifacts_root: PathBuf,

    /// Manifest location; defaults to `<artifacts_root>/index.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<PathBuf>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_pages_path() -> String {
    paths::DEFAULT_PAGES_PATH.to_string()
}

fn default_artifacts_root() -> PathBuf {
    PathBuf::from("public/projects")
}

/// Hard caps keep the whole run bounded even when every probe times out.
const MAX_CONNECT_TIMEOUT_SECS: u64 = 3;
const MAX_TIMEOUT_SECS: u64 = 5;

fn default_connect_timeout() -> u64 {
    MAX_CONNECT_TIMEOUT_SECS
}

fn default_timeout() -> u64 {
    MAX_TIMEOUT_SECS
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            pages_path: default_pages_path(),
            artifacts_root: default_artifacts_root(),
            manifest_path: None,
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CheckConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QaError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: CheckConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load `qa-check.yaml` from `dir` if present, else defaults.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(paths::CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "base_url '{}' must start with http:// or https://",
                    self.base_url
                ),
            });
        }

        if self.connect_timeout_secs > MAX_CONNECT_TIMEOUT_SECS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "connect_timeout_secs={} exceeds the {}s cap and will be clamped",
                    self.connect_timeout_secs, MAX_CONNECT_TIMEOUT_SECS
                ),
            });
        }

        if self.timeout_secs > MAX_TIMEOUT_SECS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "timeout_secs={} exceeds the {}s cap and will be clamped",
                    self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            });
        }

        warnings
    }

    // -----------------------------------------------------------------------
    // Derived values
    // -----------------------------------------------------------------------

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.min(MAX_TIMEOUT_SECS))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest_path
            .clone()
            .unwrap_or_else(|| self.artifacts_root.join(paths::MANIFEST_FILE))
    }

    fn base(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }

    pub fn site_root_url(&self) -> String {
        self.base()
    }

    pub fn index_url(&self) -> String {
        format!("{}{}", self.base(), paths::PRIMARY_PAGE)
    }

    pub fn pages_url(&self) -> String {
        let segment = self.pages_path.trim_matches('/');
        if segment.is_empty() {
            self.base()
        } else {
            format!("{}{}/", self.base(), segment)
        }
    }

    pub fn manifest_url(&self) -> String {
        format!("{}{}", self.pages_url(), paths::MANIFEST_FILE)
    }

    pub fn page_url(&self, dir_name: &str) -> String {
        format!("{}{}/{}", self.pages_url(), dir_name, paths::PRIMARY_PAGE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
