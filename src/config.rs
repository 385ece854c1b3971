//! Application configuration management.
//!
//! The config file keeps the Supabase project URL and the last email used
//! to sign in. The anon key is deliberately not persisted; it comes from
//! the `SUPABASE_ANON_KEY` environment variable (a `.env` file works).
//!
//! Configuration is stored at `~/.config/asistencia-tui/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "asistencia-tui";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub supabase_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Project URL: `SUPABASE_URL` wins over the config file
    pub fn backend_url(&self) -> Result<String> {
        std::env::var("SUPABASE_URL")
            .ok()
            .or_else(|| self.supabase_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No Supabase URL configured (set SUPABASE_URL or edit config.json)")
            })
    }

    /// Project anon key, environment only
    pub fn anon_key(&self) -> Result<String> {
        std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| anyhow::anyhow!("SUPABASE_ANON_KEY is not set"))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
