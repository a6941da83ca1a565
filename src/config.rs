//! User configuration read from `~/.player-queue/config.toml`. Every field has
//! a default, so a missing file (or a partial one) is fine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;

use crate::db::data_dir;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid color {value:?} for {key} in {path}")]
    InvalidColor {
        path: PathBuf,
        key: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: String,
    /// Where tracing output goes. Nothing is logged when unset, since stdout
    /// belongs to the terminal UI.
    pub log_file: Option<PathBuf>,
    /// Overrides the default database location.
    pub database_path: Option<PathBuf>,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    /// Highlight color for the selected row and the focused input.
    pub accent: Color,
}

/// On-disk shape of the config. Colors stay text here and are resolved in
/// [`Config::from_toml`] so a bad value can be reported on its own.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    database_path: Option<PathBuf>,
    theme: ThemeFile,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: None,
            database_path: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            accent: Color::Yellow,
        }
    }
}

impl Config {
    /// Parse a config document.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let defaults = Config::default();
        let accent = match file.theme.accent {
            Some(value) => parse_color(&value).ok_or_else(|| ConfigError::InvalidColor {
                path: path.to_path_buf(),
                key: "theme.accent",
                value,
            })?,
            None => defaults.theme.accent,
        };

        Ok(Config {
            log_level: file.log_level.unwrap_or(defaults.log_level),
            log_file: file.log_file,
            database_path: file.database_path,
            theme: ThemeConfig { accent },
        })
    }

    /// Load the config at `path`, falling back to defaults when the file does
    /// not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(path, &content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    data_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Read the user's config. Broken files are reported on stderr before the
/// terminal switches to the alternate screen, then defaults are used.
pub fn read() -> Config {
    let Some(path) = get_config_path() else {
        return Config::default();
    };

    match Config::load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}; using default settings");
            Config::default()
        }
    }
}

/// Parse a color given by name, `#rrggbb`, `#rgb`, or `r,g,b`.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() == 3 {
        let r = parts[0].trim().parse::<u8>().ok()?;
        let g = parts[1].trim().parse::<u8>().ok()?;
        let b = parts[2].trim().parse::<u8>().ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    None
}
