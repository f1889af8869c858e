use serde::Deserialize;

/// TOML-deserializable config file. All fields are Option for layered merging.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub defaults: DefaultsFileConfig,
    #[serde(default)]
    pub project: ProjectFileConfig,
    #[serde(default)]
    pub resolve: ResolveFileConfig,
    #[serde(default)]
    pub targeting: TargetingFileConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DefaultsFileConfig {
    pub format: Option<String>,
    pub quiet: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectFileConfig {
    /// Project root; relative paths resolve against the config file's directory.
    pub root: Option<String>,
    /// Backend directory, relative to the project root.
    pub backend_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResolveFileConfig {
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TargetingFileConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FileConfig {
    /// Load from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
