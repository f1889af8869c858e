use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output: loaded files, then every setting grouped by
/// section with the layer it came from. With `changed_only`, settings still
/// at their built-in default are left out.
pub fn render_show<W: Write>(
    w: &mut W,
    config: &ResolvedConfig,
    changed_only: bool,
) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for section in config.provenance.sections() {
        let entries: Vec<_> = config
            .provenance
            .section_entries(section)
            .into_iter()
            .filter(|(_, source)| !changed_only || !source.is_default())
            .collect();
        if entries.is_empty() {
            continue;
        }
        writeln!(w, "  [{section}]")?;
        for (key, source) in entries {
            let value = get_value_for_key(config, key);
            writeln!(w, "    {key}: {value} <- {source}")?;
        }
    }

    writeln!(w)?;
    writeln!(w, "Backend root: {}", config.backend_root().display())?;

    Ok(())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

fn get_value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.format" => config.format.to_string(),
        "defaults.quiet" => config.quiet.to_string(),
        "project.root" => config.root.display().to_string(),
        "project.backend_dir" => config.backend_dir.display().to_string(),
        "resolve.extensions" => list(&config.extensions),
        "targeting.include" => list(&config.include),
        "targeting.exclude" => list(&config.exclude),
        _ => "(unknown)".to_string(),
    }
}
