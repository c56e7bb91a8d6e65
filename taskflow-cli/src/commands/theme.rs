use anyhow::Result;
use strum::IntoEnumIterator;

use crate::theme_store::{ThemeName, ThemeStore};

pub fn show_or_set_theme(store: &ThemeStore, name: Option<ThemeName>) -> Result<()> {
    if let Some(theme) = name {
        store.save(theme)?;
        tracing::debug!(path = %store.path().display(), "saved theme");
        println!("Theme set to {} ({}).", theme.label(), theme);
        return Ok(());
    }

    let active = store.load();
    for theme in ThemeName::iter() {
        let marker = if theme == active { "*" } else { " " };
        println!("{marker} {:<6} {}", theme.to_string(), theme.label());
    }
    Ok(())
}
