use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};

use crate::config;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    Green,
}

impl ThemeName {
    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
            ThemeName::Green => "Green",
        }
    }
}

/// The active theme name, persisted as a single string on disk.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new() -> Result<Self> {
        Ok(Self::at(config::root_path()?.join("theme")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved theme, or the default when nothing usable is saved.
    pub fn load(&self) -> ThemeName {
        if !self.path.exists() {
            return ThemeName::default();
        }
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read saved theme");
                return ThemeName::default();
            }
        };
        match raw.trim().parse::<ThemeName>() {
            Ok(theme) => theme,
            Err(_) => {
                tracing::warn!(saved = raw.trim(), "ignoring unknown saved theme");
                ThemeName::default()
            }
        }
    }

    pub fn save(&self, theme: ThemeName) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, theme.to_string()).context("Failed to write theme file")?;
        Ok(())
    }
}
