use anyhow::{Context, Result};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Class added to the page when the dark theme is on.
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `dark` reads as light.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "dark" { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Key-value persistence for the theme flag.
pub trait ThemeStore: Send + Sync + Debug {
    fn load(&self) -> Theme;
    fn save(&self, theme: Theme) -> Result<()>;
}

/// Stores the flag as `dark` or `light` in a small text file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `theme` file inside the given data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("theme"))
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Theme::parse(&contents),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "no saved theme: {e}");
                Theme::default()
            }
        }
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, theme.as_str())
            .with_context(|| format!("Failed to write theme file: {}", self.path.display()))
    }
}

/// In-process store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryThemeStore(Mutex<Option<Theme>>);

impl MemoryThemeStore {
    pub fn with(theme: Theme) -> Self {
        Self(Mutex::new(Some(theme)))
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Theme {
        self.0.lock().ok().and_then(|t| *t).unwrap_or_default()
    }

    fn save(&self, theme: Theme) -> Result<()> {
        let mut slot = self
            .0
            .lock()
            .map_err(|_| anyhow::anyhow!("theme store lock poisoned"))?;
        *slot = Some(theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_treats_unknown_as_light() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("dark\n"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("purple"), Theme::Light);
    }

    #[test]
    fn file_store_persists_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::in_dir(&dir.path().join("data"));

        assert_eq!(store.load(), Theme::Light);
        store.save(Theme::Dark).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("data/theme")).unwrap(), "dark");

        let reopened = FileThemeStore::in_dir(&dir.path().join("data"));
        assert_eq!(reopened.load(), Theme::Dark);
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryThemeStore::default();
        assert_eq!(store.load(), Theme::Light);
        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Theme::Dark);
        assert_eq!(MemoryThemeStore::with(Theme::Dark).load().toggled(), Theme::Light);
    }
}
