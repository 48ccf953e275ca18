use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the feed API; endpoints are derived from it.
  pub base_url: Url,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// Where the cache database lives (defaults to the user data dir).
  pub path: Option<PathBuf>,
  /// Cached feed pages older than this many days read as misses.
  #[serde(default = "default_max_age_days")]
  pub max_age_days: i64,
  /// Set to false to run without any local cache.
  #[serde(default = "default_true")]
  pub enabled: bool,
}

fn default_max_age_days() -> i64 {
  crate::compose::FEED_MAX_AGE_DAYS
}

fn default_true() -> bool {
  true
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      path: None,
      max_age_days: default_max_age_days(),
      enabled: true,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./feedline.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/feedline/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/feedline/config.yaml\n\
                 or pass --base-url on the command line."
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("feedline.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("feedline").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Build a config from a base URL alone, with default cache settings.
  pub fn from_base_url(base_url: Url) -> Self {
    Self {
      api: ApiConfig { base_url },
      cache: CacheConfig::default(),
    }
  }
}
