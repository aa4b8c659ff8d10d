/*
 *  config.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, CLI overrides
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::overlay::RunningMode;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub overlay: Option<OverlayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    pub running_mode: Option<RunningMode>,
    pub view_width: Option<u32>,
    pub view_height: Option<u32>,
    pub background: Option<String>,    // "RRGGBB", optional leading '#'
}

/// CLI overrides. Config-backed fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "segoverlay", about = "Render a segmentation mask overlay", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Verbose logging, same as --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    /// Raw mask file, one class byte per pixel, row-major
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub mask: Option<PathBuf>,
    #[arg(long)]
    pub mask_width: Option<u32>,
    #[arg(long)]
    pub mask_height: Option<u32>,
    #[arg(long)]
    pub view_width: Option<u32>,
    #[arg(long)]
    pub view_height: Option<u32>,
    #[arg(long, value_enum)]
    pub mode: Option<RunningMode>,
    /// Canvas color behind the overlay, RRGGBB
    #[arg(long)]
    pub background: Option<String>,
    /// PNG to write
    #[arg(long, short, value_hint = ValueHint::FilePath, default_value = "overlay.png")]
    pub output: PathBuf,
    /// print detected labels as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub labels_json: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Read YAML, merge CLI overrides, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/segoverlay/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/segoverlay.yaml");
        if p.exists() { return Some(p) }
    }
    for candidate in &["segoverlay.yaml", "config/segoverlay.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.overlay, src.overlay) {
        (None, Some(c)) => dst.overlay = Some(c),
        (Some(d), Some(s)) => merge_overlay(d, s),
        _ => {}
    }
}

fn merge_overlay(dst: &mut OverlayConfig, src: OverlayConfig) {
    if src.running_mode.is_some() { dst.running_mode = src.running_mode; }
    if src.view_width.is_some()   { dst.view_width = src.view_width; }
    if src.view_height.is_some()  { dst.view_height = src.view_height; }
    if src.background.is_some()   { dst.background = src.background; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.debug {
        cfg.log_level = Some("debug".into());
    } else if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }

    let any_overlay = cli.mode.is_some()
        || cli.view_width.is_some()
        || cli.view_height.is_some()
        || cli.background.is_some();

    if any_overlay && cfg.overlay.is_none() {
        cfg.overlay = Some(OverlayConfig::default());
    }
    if let Some(overlay) = cfg.overlay.as_mut() {
        if cli.mode.is_some()        { overlay.running_mode = cli.mode; }
        if cli.view_width.is_some()  { overlay.view_width = cli.view_width; }
        if cli.view_height.is_some() { overlay.view_height = cli.view_height; }
        if cli.background.is_some()  { overlay.background = cli.background.clone(); }
    }
}

/// Parse "RRGGBB" or "#RRGGBB"
pub fn parse_hex_rgb(s: &str) -> Option<Rgb888> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb888::new(channel(0)?, channel(2)?, channel(4)?))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(overlay) = cfg.overlay.as_ref() {
        if overlay.view_width == Some(0) || overlay.view_height == Some(0) {
            return Err(ConfigError::Validation("overlay view width/height must be > 0".into()));
        }
        if let Some(bg) = overlay.background.as_deref() {
            if parse_hex_rgb(bg).is_none() {
                return Err(ConfigError::Validation(format!(
                    "overlay background must be RRGGBB, got {bg:?}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#ff8000"), Some(Rgb888::new(255, 128, 0)));
        assert_eq!(parse_hex_rgb("000000"), Some(Rgb888::new(0, 0, 0)));
        assert_eq!(parse_hex_rgb("fff"), None);
        assert_eq!(parse_hex_rgb("zz0000"), None);
    }

    #[test]
    fn test_yaml_and_cli_layering() {
        let yaml = "log_level: info\noverlay:\n  running_mode: live_stream\n  view_width: 640\n  view_height: 480\n";
        let mut cfg = Config::default();
        merge(&mut cfg, serde_yaml::from_str(yaml).unwrap());

        let cli = Cli { view_width: Some(1080), debug: true, ..Default::default() };
        apply_cli_overrides(&mut cfg, &cli);

        let overlay = cfg.overlay.as_ref().unwrap();
        assert_eq!(overlay.running_mode, Some(RunningMode::LiveStream));
        assert_eq!(overlay.view_width, Some(1080));
        assert_eq!(overlay.view_height, Some(480));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cfg = Config {
            log_level: None,
            overlay: Some(OverlayConfig { view_width: Some(0), ..Default::default() }),
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let cfg = Config {
            log_level: None,
            overlay: Some(OverlayConfig { background: Some("red".into()), ..Default::default() }),
        };
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_missing_explicit_config() {
        let cli = Cli { config: Some(PathBuf::from("/nonexistent/segoverlay.yaml")), ..Default::default() };
        assert!(matches!(load(&cli), Err(ConfigError::Validation(_))));
    }
}
