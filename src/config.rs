use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::content::CardView;
use crate::preview::RenderOptions;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_breaks: bool,
    pub no_gfm: bool,
    pub watch: bool,
    pub excerpt_limit: Option<usize>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_breaks: self.no_breaks || other.no_breaks,
            no_gfm: self.no_gfm || other.no_gfm,
            watch: self.watch || other.watch,
            excerpt_limit: other.excerpt_limit.or(self.excerpt_limit),
        }
    }

    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            hard_breaks: !self.no_breaks,
            gfm: !self.no_gfm,
        }
    }

    /// The configured excerpt length, or the card layout's own length.
    pub const fn excerpt_limit(&self, view: CardView) -> usize {
        match self.excerpt_limit {
            Some(limit) => limit,
            None => view.excerpt_limit(),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("folio").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("folio")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("folio").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("folio").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".foliorc")
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
    let mut lines = vec!["# folio defaults (saved with --save)".to_string()];
    if flags.no_breaks {
        lines.push("--no-breaks".to_string());
    }
    if flags.no_gfm {
        lines.push("--no-gfm".to_string());
    }
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if let Some(limit) = flags.excerpt_limit {
        lines.push(format!("--excerpt-limit {limit}"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

/// Pick the flags this module knows out of raw argv-style tokens.
///
/// Unknown tokens are skipped, so the full command line can be passed in.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-breaks" {
            flags.no_breaks = true;
        } else if token == "--no-gfm" {
            flags.no_gfm = true;
        } else if token == "--watch" {
            flags.watch = true;
        } else if token == "--excerpt-limit" {
            if let Some(next) = tokens.get(i + 1) {
                flags.excerpt_limit = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--excerpt-limit=") {
            flags.excerpt_limit = value.parse().ok();
        }
        i += 1;
    }
    flags
}
