//! # Configuration
//!
//! NoteMaster resolves its configuration once at startup into a [`Config`]
//! value that is handed to the collaborators that need it. Nothing reads the
//! environment after that point.
//!
//! ## Sources
//!
//! 1. **Settings file**: `<root>/config.json`, absent means defaults.
//! 2. **Environment overrides**: `NOTEMASTER_MODEL`, `NOTEMASTER_BASE_URL`.
//! 3. **Credential**: `DEEPSEEK_KEY` from the environment, falling back to
//!    the `<root>/.env` dotfile.
//!
//! | Key | Default |
//! |-----|---------|
//! | `model` | `deepseek/deepseek-r1-distill-llama-70b:free` |
//! | `base_url` | `https://openrouter.ai/api/v1` |
//! | `referer` | `https://mxr.codes` |
//! | `app_title` | `NoteMaster` |
//! | `request_timeout_secs` | none (wait indefinitely) |

use crate::error::{NotemasterError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
pub const DOTFILE_NAME: &str = ".env";
pub const API_KEY_VAR: &str = "DEEPSEEK_KEY";
pub const API_KEY_LEN: usize = 73;

const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-distill-llama-70b:free";
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_REFERER: &str = "https://mxr.codes";
const DEFAULT_APP_TITLE: &str = "NoteMaster";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

fn default_app_title() -> String {
    DEFAULT_APP_TITLE.to_string()
}

/// Persisted settings, stored in `<root>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `HTTP-Referer` for OpenRouter attribution
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Sent as `X-Title` for OpenRouter attribution
    #[serde(default = "default_app_title")]
    pub app_title: String,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            referer: default_referer(),
            app_title: default_app_title(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotemasterError::Io)?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(NotemasterError::Serialization)?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn apply_env_overrides(&mut self, env: &HashMap<String, String>) {
        if let Some(model) = env.get("NOTEMASTER_MODEL").filter(|v| !v.is_empty()) {
            self.model = model.clone();
        }
        if let Some(url) = env.get("NOTEMASTER_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url.clone();
        }
    }
}

/// An API key. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First and last four characters, for status output.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.masked())
    }
}

/// Process-wide configuration, resolved once and passed around explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub settings: Settings,
    pub credential: Option<Credential>,
}

impl Config {
    /// Resolve configuration from the real process environment.
    pub fn load(root: PathBuf) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(root, &env)
    }

    /// Resolve configuration against an explicit environment map.
    pub fn load_with_env(root: PathBuf, env: &HashMap<String, String>) -> Result<Self> {
        let mut settings = Settings::load(&root)?;
        settings.apply_env_overrides(env);

        let credential = match env.get(API_KEY_VAR).filter(|v| !v.is_empty()) {
            Some(token) => Some(Credential::new(token.clone())),
            None => read_dotfile(&root.join(DOTFILE_NAME))?
                .remove(API_KEY_VAR)
                .filter(|v| !v.is_empty())
                .map(Credential::new),
        };

        Ok(Self {
            root,
            settings,
            credential,
        })
    }

    pub fn dotfile_path(&self) -> PathBuf {
        self.root.join(DOTFILE_NAME)
    }
}

/// Parse `KEY=value` lines. Blank lines and `#` comments are skipped, an
/// `export ` prefix is tolerated and matching surrounding quotes are removed.
pub fn parse_dotfile(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            warn!("Ignoring malformed dotfile line: {}", line);
            continue;
        };
        let value = value.trim();
        let value = ['"', '\'']
            .iter()
            .find_map(|q| {
                value
                    .strip_prefix(*q)
                    .and_then(|rest| rest.strip_suffix(*q))
            })
            .unwrap_or(value);
        vars.insert(key.trim().to_string(), value.to_string());
    }
    vars
}

pub fn read_dotfile(path: &Path) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path).map_err(NotemasterError::Io)?;
    Ok(parse_dotfile(&content))
}

pub fn validate_api_key(key: &str) -> Result<()> {
    let actual = key.chars().count();
    if actual != API_KEY_LEN {
        return Err(NotemasterError::InvalidCredential {
            expected: API_KEY_LEN,
            actual,
        });
    }
    Ok(())
}

/// Validate the key and write it to the dotfile, replacing its contents.
pub fn save_api_key(dotfile: &Path, key: &str) -> Result<Credential> {
    validate_api_key(key)?;
    if let Some(parent) = dotfile.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(NotemasterError::Io)?;
        }
    }
    fs::write(dotfile, format!("{}=\"{}\"", API_KEY_VAR, key)).map_err(NotemasterError::Io)?;
    Ok(Credential::new(key))
}

/// Remove the dotfile. Returns whether there was one.
pub fn reset_api_key(dotfile: &Path) -> Result<bool> {
    if !dotfile.is_file() {
        return Ok(false);
    }
    fs::remove_file(dotfile).map_err(NotemasterError::Io)?;
    Ok(true)
}
