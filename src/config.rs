use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::text::replace::{DEFAULT_RETURN_SYMBOL, DEFAULT_TAB_FILL, DEFAULT_TAB_SYMBOL};
use crate::text::{ReplacementRules, TextError};

/// Distance from each edge of the surrounding area, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Spacing {
    pub const fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_return_symbol")]
    pub return_symbol: String,
    #[serde(default = "default_tab_symbol")]
    pub tab_symbol: String,
    #[serde(default = "default_tab_fill")]
    pub tab_fill: char,
    #[serde(default = "default_more_above")]
    pub more_above: String,
    #[serde(default = "default_more_below")]
    pub more_below: String,
    #[serde(default = "default_max_width")]
    pub max_width: u16,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_valid_inputs")]
    pub valid_inputs: String,
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: String,
    #[serde(default = "default_true")]
    pub show_wpm: bool,
    #[serde(default = "default_true")]
    pub show_accuracy: bool,
    #[serde(default = "default_border_margin")]
    pub border_margin: Spacing,
    #[serde(default = "default_border_padding")]
    pub border_padding: Spacing,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_return_symbol() -> String {
    DEFAULT_RETURN_SYMBOL.to_string()
}
fn default_tab_symbol() -> String {
    DEFAULT_TAB_SYMBOL.to_string()
}
fn default_tab_fill() -> char {
    DEFAULT_TAB_FILL
}
fn default_more_above() -> String {
    "^^^".to_string()
}
fn default_more_below() -> String {
    "vvv".to_string()
}
fn default_max_width() -> u16 {
    120
}
fn default_tick_rate_ms() -> u64 {
    500
}
fn default_valid_inputs() -> String {
    let mut inputs = String::new();
    inputs.push_str("abcdefghijklmnopqrstuvwxyz");
    inputs.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    inputs.push(' ');
    inputs.push_str("1234567890");
    inputs.push_str("äüöÄÜÖß");
    inputs.push_str(",.;:><?");
    inputs.push_str("§~_+=-`€°!@#$%^&*()[]{}|/\\'\"");
    inputs.push_str("\n\t");
    inputs
}
fn default_sessions_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("typo")
        .join("sessions")
        .to_string_lossy()
        .to_string()
}
fn default_border_margin() -> Spacing {
    Spacing::new(4, 4, 5, 6)
}
fn default_border_padding() -> Spacing {
    Spacing::new(3, 3, 1, 1)
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            return_symbol: default_return_symbol(),
            tab_symbol: default_tab_symbol(),
            tab_fill: default_tab_fill(),
            more_above: default_more_above(),
            more_below: default_more_below(),
            max_width: default_max_width(),
            tick_rate_ms: default_tick_rate_ms(),
            valid_inputs: default_valid_inputs(),
            sessions_dir: default_sessions_dir(),
            border_margin: default_border_margin(),
            border_padding: default_border_padding(),
            show_wpm: default_true(),
            show_accuracy: default_true(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typo")
            .join("config.toml")
    }

    pub fn log_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typo")
    }

    pub fn replacement_rules(&self) -> Result<ReplacementRules, TextError> {
        ReplacementRules::from_symbols(&self.return_symbol, &self.tab_symbol, self.tab_fill)
    }

    pub fn accepts(&self, c: char) -> bool {
        self.valid_inputs.contains(c)
    }
}
