use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{ExposerError, Result};
use crate::output::OutputFormat;
use crate::syntax::dialect::DEFAULT_EXTENSIONS;
use crate::transform::DEFAULT_BACKEND_DIR;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Name of the per-project config file.
pub const PROJECT_CONFIG_FILE: &str = ".exposer.toml";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub root: Option<PathBuf>,
    pub backend_dir: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/exposer/config.toml)
/// 3. Project config (nearest .exposer.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    let mut prov = ProvenanceMap::new();
    let mut loaded_files = Vec::new();

    // 1. Start with built-in defaults
    let mut config = ResolvedConfig {
        format: OutputFormat::Text,
        quiet: false,
        root: working_dir.to_path_buf(),
        backend_dir: PathBuf::from(DEFAULT_BACKEND_DIR),
        extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        include: Vec::new(),
        exclude: Vec::new(),
        provenance: ProvenanceMap::new(),
        loaded_files: Vec::new(),
    };

    set_all_default_provenance(&mut prov);

    // 2. User config
    if let Some(user_config_path) = find_user_config() {
        if user_config_path.exists() {
            let file_config = load_file_config(&user_config_path, "user")?;
            apply_file_config(
                &mut config,
                &file_config,
                &user_config_path,
                Source::UserConfig(user_config_path.clone()),
                &mut prov,
            )?;
            loaded_files.push(user_config_path);
        }
    }

    // 3. Project config (walk up from working_dir)
    if let Some(project_config_path) = find_project_config(working_dir) {
        let file_config = load_file_config(&project_config_path, "project")?;
        let source = Source::ProjectConfig(project_config_path.clone());

        // The directory holding the project config is the project root
        // unless the file says otherwise.
        if let Some(dir) = project_config_path.parent() {
            config.root = dir.to_path_buf();
            prov.set("project.root", source.clone());
        }
        apply_file_config(
            &mut config,
            &file_config,
            &project_config_path,
            source,
            &mut prov,
        )?;
        loaded_files.push(project_config_path);
    }

    // 4. Environment variables
    apply_env_vars(&mut config, working_dir, &mut prov, |name| std::env::var(name).ok())?;

    // 5. CLI overrides
    apply_cli_overrides(&mut config, cli, &mut prov);

    for (key, source) in prov.overridden() {
        tracing::debug!("config {key} <- {source}");
    }

    config.provenance = prov;
    config.loaded_files = loaded_files;

    Ok(config)
}

fn load_file_config(path: &Path, label: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        ExposerError::Config(format!(
            "Could not read {label} config: {}",
            path.display()
        ))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| ExposerError::Config(format!("Invalid {label} config: {e}")))
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("exposer").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn set_all_default_provenance(prov: &mut ProvenanceMap) {
    let defaults = [
        "defaults.format",
        "defaults.quiet",
        "project.root",
        "project.backend_dir",
        "resolve.extensions",
        "targeting.include",
        "targeting.exclude",
    ];
    for key in defaults {
        prov.set(key, Source::Default);
    }
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(value, true)
        .map_err(|_| ExposerError::Config(format!("Unknown output format: {value}")))
}

fn parse_extensions(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    file_path: &Path,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    // Defaults
    if let Some(ref format) = file.defaults.format {
        config.format = parse_format(format)?;
        prov.set("defaults.format", source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }

    // Project layout
    if let Some(ref root) = file.project.root {
        let base = file_path.parent().unwrap_or_else(|| Path::new("."));
        config.root = base.join(root);
        prov.set("project.root", source.clone());
    }
    if let Some(ref backend_dir) = file.project.backend_dir {
        config.backend_dir = PathBuf::from(backend_dir);
        prov.set("project.backend_dir", source.clone());
    }

    // Resolution
    if let Some(ref extensions) = file.resolve.extensions {
        config.extensions = parse_extensions(extensions);
        prov.set("resolve.extensions", source.clone());
    }

    // Targeting
    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.set("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source);
    }

    Ok(())
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn env_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Apply `EXPOSER_*` variables read through `lookup`. A relative
/// `EXPOSER_ROOT` is anchored at `working_dir`.
fn apply_env_vars(
    config: &mut ResolvedConfig,
    working_dir: &Path,
    prov: &mut ProvenanceMap,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(val) = lookup("EXPOSER_FORMAT") {
        config.format = parse_format(&val)?;
        prov.set("defaults.format", Source::EnvVar("EXPOSER_FORMAT".into()));
    }
    if let Some(val) = lookup("EXPOSER_QUIET") {
        config.quiet = env_flag(&val);
        prov.set("defaults.quiet", Source::EnvVar("EXPOSER_QUIET".into()));
    }
    if let Some(val) = lookup("EXPOSER_ROOT") {
        config.root = working_dir.join(val);
        prov.set("project.root", Source::EnvVar("EXPOSER_ROOT".into()));
    }
    if let Some(val) = lookup("EXPOSER_BACKEND_DIR") {
        config.backend_dir = PathBuf::from(val);
        prov.set(
            "project.backend_dir",
            Source::EnvVar("EXPOSER_BACKEND_DIR".into()),
        );
    }
    if let Some(val) = lookup("EXPOSER_EXTENSIONS") {
        config.extensions = parse_extensions(&env_list(&val));
        prov.set(
            "resolve.extensions",
            Source::EnvVar("EXPOSER_EXTENSIONS".into()),
        );
    }
    if let Some(val) = lookup("EXPOSER_INCLUDE") {
        config.include = env_list(&val);
        prov.set("targeting.include", Source::EnvVar("EXPOSER_INCLUDE".into()));
    }
    if let Some(val) = lookup("EXPOSER_EXCLUDE") {
        config.exclude = env_list(&val);
        prov.set("targeting.exclude", Source::EnvVar("EXPOSER_EXCLUDE".into()));
    }
    Ok(())
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format".into()));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet".into()));
    }
    if let Some(ref root) = cli.root {
        config.root = root.clone();
        prov.set("project.root", Source::CliFlag("--root".into()));
    }
    if let Some(ref backend_dir) = cli.backend_dir {
        config.backend_dir = backend_dir.clone();
        prov.set(
            "project.backend_dir",
            Source::CliFlag("--backend-dir".into()),
        );
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.set("targeting.include", Source::CliFlag("--include".into()));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.set("targeting.exclude", Source::CliFlag("--exclude".into()));
    }
}
