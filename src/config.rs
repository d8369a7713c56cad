use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Frame rate used when sampling a program into frames.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Upper bound on frames produced when sampling one program.
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
    /// Reject animation commands of unknown kind instead of playing them as
    /// orbits.
    #[serde(default)]
    pub strict_animation_kinds: bool,
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_fps() -> u32 { 60 }
fn default_pretty() -> bool { true }
fn default_max_frames() -> usize { 1_000_000 }

impl Default for Config {
    fn default() -> Self {
        Config {
            fps: default_fps(),
            max_frames: default_max_frames(),
            strict_animation_kinds: false,
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the user config file when `path` is `None`.
    /// A missing file yields defaults; an invalid one is reported and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str::<Config>(&json) {
                Ok(config) if config.fps == 0 => {
                    warn!("config {}: fps must be positive, using {}", config_path.display(), default_fps());
                    Config { fps: default_fps(), ..config }
                }
                Ok(config) => config,
                Err(e) => {
                    warn!("invalid config {} ({e}), using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                if path.is_some() {
                    warn!("cannot read config {} ({e}), using defaults", config_path.display());
                }
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("scene-script");
        path.push("config.json");
        path
    }
}
