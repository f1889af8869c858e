use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    EnvVar(String),
    CliFlag(String),
}

impl Source {
    pub fn is_default(&self) -> bool {
        matches!(self, Source::Default)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Default => write!(f, "default"),
            Source::UserConfig(path) => write!(f, "user config ({})", path.display()),
            Source::ProjectConfig(path) => write!(f, "project config ({})", path.display()),
            Source::EnvVar(name) => write!(f, "env var ({name})"),
            Source::CliFlag(name) => write!(f, "CLI flag ({name})"),
        }
    }
}

/// Tracks the source of each configuration value by dotted key
/// (`section.name`).
#[derive(Debug, Clone, Default)]
pub struct ProvenanceMap {
    entries: BTreeMap<String, Source>,
}

impl ProvenanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, source: Source) {
        self.entries.insert(key.into(), source);
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.entries.get(key)
    }

    /// Distinct section names (the part before the first `.`), sorted.
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = self
            .entries
            .keys()
            .map(|k| k.split_once('.').map_or(k.as_str(), |(s, _)| s))
            .collect();
        sections.dedup();
        sections
    }

    /// Entries of one section, sorted by key.
    pub fn section_entries(&self, section: &str) -> Vec<(&str, &Source)> {
        self.entries
            .iter()
            .filter(|(k, _)| k.split_once('.').map_or(k.as_str(), |(s, _)| s) == section)
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }

    /// Entries whose value no longer comes from the built-in defaults.
    pub fn overridden(&self) -> Vec<(&str, &Source)> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_default())
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }
}
