use anyhow::Context;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "anchormarks-flow.log";
/// Environment variable that overrides the location of [`CONFIG_FILE`].
pub const CONFIG_ENV: &str = "ANCHORMARKS_FLOW_CONFIG";

const DEFAULT_PORT: &str = "3000";

/// Contents of `config.json`. Kept as a plain map so that keys this plugin
/// does not know about, or cannot read, survive a save untouched.
pub type ConfigFile = Map<String, Value>;

/// Resolved configuration threaded through every query and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub api_key: String,
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_file(&ConfigFile::new())
    }
}

impl Settings {
    /// Read each known key on its own. A key with an unusable value falls back
    /// to its default without affecting the others.
    pub fn from_file(file: &ConfigFile) -> Self {
        // `port` is written by hand more often than not: accept `3000` and `"3000"`.
        let port = match file.get("port") {
            Some(Value::Number(n)) if n.is_u64() => Some(n.to_string()),
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            other => {
                ignore_key("port", other);
                None
            }
        }
        .unwrap_or_else(|| DEFAULT_PORT.to_string());

        let server_url =
            string_key(file, "server_url").unwrap_or_else(|| format!("http://localhost:{port}"));
        let api_key = string_key(file, "api_key").unwrap_or_default();
        let debug_logging = match file.get("debug_logging") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => true,
            other => {
                ignore_key("debug_logging", other);
                false
            }
        };

        Self {
            server_url,
            api_key,
            debug_logging,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Server URL without a trailing slash, ready to have `/api/...` appended.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

fn string_key(file: &ConfigFile, key: &str) -> Option<String> {
    match file.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        other => {
            ignore_key(key, other);
            None
        }
    }
}

fn ignore_key(key: &str, value: Option<&Value>) {
    match value {
        None | Some(Value::Null) => {}
        Some(v) => tracing::warn!("ignoring config key `{key}` with unusable value {v}"),
    }
}

/// Narrow read/write access to the persisted configuration.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard location: `$ANCHORMARKS_FLOW_CONFIG`, or
    /// `config.json` beside the plugin executable.
    pub fn locate() -> Self {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Self::new(path);
        }
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the config file; the log file lives here too.
    pub fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Read the file as-is. Missing files, malformed JSON and non-object
    /// documents read as empty.
    pub fn read_file(&self) -> ConfigFile {
        let content = std::fs::read_to_string(&self.path).unwrap_or_default();
        if content.trim().is_empty() {
            return ConfigFile::new();
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(file)) => file,
            Ok(_) => {
                tracing::warn!("ignoring config {}: not a JSON object", self.path.display());
                ConfigFile::new()
            }
            Err(e) => {
                tracing::warn!("ignoring malformed config {}: {e}", self.path.display());
                ConfigFile::new()
            }
        }
    }

    pub fn load(&self) -> Settings {
        Settings::from_file(&self.read_file())
    }

    /// Persist `server_url` and `api_key`, keeping every other key in the file.
    pub fn save(&self, server_url: &str, api_key: &str) -> anyhow::Result<Settings> {
        let mut file = self.read_file();
        file.insert("server_url".into(), Value::from(server_url));
        file.insert("api_key".into(), Value::from(api_key));
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::info!("saved configuration for {server_url}");
        Ok(Settings::from_file(&file))
    }
}
