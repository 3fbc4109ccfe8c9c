use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "beingtv";
const APPLICATION: &str = "beingtv";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Path of the backend settings file
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|p| p.config_dir().join("config.json"))
}

/// Directory holding preferences and the log file
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|p| p.data_dir().to_path_buf())
}

fn default_realtime() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Project URL, e.g. https://xyzcompany.supabase.co
    #[serde(default)]
    pub supabase_url: String,
    /// Public anon key sent as `apikey` and bearer token
    #[serde(default)]
    pub supabase_anon_key: String,
    #[serde(default = "default_realtime")]
    pub realtime: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            realtime: default_realtime(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, anyhow::Error> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(AppConfig::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        let path = config_path().ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), anyhow::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn is_backend_configured(&self) -> bool {
        !self.supabase_url.trim().is_empty()
    }

    /// Command line values win over the file
    pub fn apply_overrides(&mut self, url: Option<String>, key: Option<String>, offline: bool) {
        if let Some(url) = url {
            self.supabase_url = url;
        }
        if let Some(key) = key {
            self.supabase_anon_key = key;
        }
        if offline {
            self.supabase_url.clear();
            self.realtime = false;
        }
    }
}
