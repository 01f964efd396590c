//! Saved command-line defaults.
//!
//! A defaults file is a list of flag tokens, one or more per line, with
//! `#` comments. The global file lives in the platform config directory and
//! a `.quickreadrc` in the working directory overrides it. Flags given on
//! the command line win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub speed: Option<u32>,
    pub no_color: bool,
    pub tick_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values from `other` take precedence.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            speed: other.speed.or(self.speed),
            no_color: self.no_color || other.no_color,
            tick_ms: other.tick_ms.or(self.tick_ms),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("quickread").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("quickread")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("quickread").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("quickread")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".quickreadrc")
}

/// Whether the `NO_COLOR` convention asks for plain output.
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# quickread defaults (saved with --save)".to_string()];
    if let Some(speed) = flags.speed {
        lines.push(format!("--speed {speed}"));
    }
    if flags.no_color {
        lines.push("--no-color".to_string());
    }
    if let Some(tick_ms) = flags.tick_ms {
        lines.push(format!("--tick-ms {tick_ms}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-color" {
            flags.no_color = true;
        } else if let Some(name) = valued_flag(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_value(&mut flags, name, next);
                i += 1;
            }
        } else if let Some((name, value)) = token.split_once('=')
            && let Some(name) = valued_flag(name)
        {
            apply_value(&mut flags, name, value);
        }
        i += 1;
    }
    flags
}

fn valued_flag(token: &str) -> Option<&'static str> {
    match token {
        "--speed" => Some("speed"),
        "--tick-ms" => Some("tick-ms"),
        "--log-file" => Some("log-file"),
        _ => None,
    }
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "speed" => flags.speed = value.parse().ok().filter(|&cpm| cpm > 0),
        "tick-ms" => flags.tick_ms = value.parse().ok().filter(|&ms| ms > 0),
        "log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
