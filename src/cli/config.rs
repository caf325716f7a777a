//! `config` and `config-schema` command handlers.

use crate::config::{
    default_config_path, discover_config_file, generate_full_example_config,
    generate_json_schema, load_or_default,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Print the effective configuration as YAML.
pub fn run_config_show(explicit: Option<&Path>) -> Result<()> {
    let (config, loaded_from) = load_or_default(explicit);
    if let Some(path) = &loaded_from {
        eprintln!("# Loaded from: {}", path.display());
    } else {
        eprintln!("# No config file found; showing defaults");
    }
    let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}

/// Print the search locations and the active config file.
pub fn run_config_path(explicit: Option<&Path>) {
    let search_paths = [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|p| p.join("openapi-diff")),
        dirs::home_dir(),
    ];
    eprintln!("Config file search paths (in order):");
    for path in search_paths.into_iter().flatten() {
        eprintln!("  {}", path.display());
    }
    eprintln!();
    match discover_config_file(explicit) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
}

/// Write a commented example config into `dir`, refusing to overwrite.
pub fn run_config_init(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(default_config_path());
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_full_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    eprintln!("Created {}", target.display());
    Ok(target)
}

/// Print or write the config file JSON schema.
pub fn run_config_schema(output: Option<&Path>) -> Result<()> {
    let schema = generate_json_schema().context("failed to serialize schema")?;
    match output {
        Some(path) => {
            std::fs::write(path, &schema)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(())
}
