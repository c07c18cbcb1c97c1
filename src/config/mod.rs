//! Configuration loading for nunit-report

mod schema;

pub use schema::{AssetsConfig, Config, TooltipPlacement, DEFAULT_OUTPUT};

use crate::reporter::AssetBundle;
use crate::ReportOptions;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".nunitreportrc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            load_config_with_extends(&path, &mut HashSet::new())
        }
        None => Ok(Config::default()),
    }
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    anchor_assets(&mut config.assets, config_dir);

    if let Some(extends) = config.extends.take() {
        let base_config = resolve_extends(config_path, &extends, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Make asset paths relative to the config file that names them
fn anchor_assets(assets: &mut AssetsConfig, config_dir: &Path) {
    for path in assets.scripts.iter_mut().chain(assets.styles.iter_mut()) {
        if path.is_relative() {
            *path = config_dir.join(&*path);
        }
    }
}

/// Resolve an extends reference to a config
fn resolve_extends(
    config_path: &Path,
    extends: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<Config> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = config_dir.join(extends);

    // Ensure it has .json extension
    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }

    load_config_with_extends(&extends_path, visited)
}

/// Search for .nunitreportrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Presentation options for a run, reading any configured asset files
pub fn report_options(config: &Config) -> Result<ReportOptions> {
    let assets = if config.assets.is_empty() {
        AssetBundle::builtin()
    } else {
        let mut bundle = AssetBundle::empty();
        for path in &config.assets.scripts {
            let script = fs::read_to_string(path)
                .with_context(|| format!("Failed to read script asset: {}", path.display()))?;
            bundle = bundle.with_script(script);
        }
        for path in &config.assets.styles {
            let style = fs::read_to_string(path)
                .with_context(|| format!("Failed to read style asset: {}", path.display()))?;
            bundle = bundle.with_style(style);
        }
        bundle
    };

    Ok(ReportOptions {
        title: config.title().to_string(),
        tooltip_placement: config
            .tooltip_placement
            .unwrap_or_default()
            .to_string(),
        assets,
    })
}
