//! Config schema and deserialization

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// File name used when more than two inputs are given without `--output`
pub const DEFAULT_OUTPUT: &str = "NUnitOutput.html";

/// Where fixture reason tooltips open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPlacement {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl TooltipPlacement {
    pub fn as_str(self) -> &'static str {
        match self {
            TooltipPlacement::Top => "top",
            TooltipPlacement::Bottom => "bottom",
            TooltipPlacement::Left => "left",
            TooltipPlacement::Right => "right",
        }
    }
}

impl fmt::Display for TooltipPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files inlined into the report header
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetsConfig {
    /// JavaScript files, in load order
    #[serde(default)]
    pub scripts: Vec<PathBuf>,

    /// CSS files, in load order
    #[serde(default)]
    pub styles: Vec<PathBuf>,
}

impl AssetsConfig {
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }
}

/// Root config structure for .nunitreportrc.json
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Page title. Default: "Results"
    #[serde(default)]
    pub title: Option<String>,

    /// Output file name for runs with more than two inputs
    #[serde(default)]
    pub default_output: Option<String>,

    /// Overwrite an existing output file without `--force`
    #[serde(default)]
    pub force: Option<bool>,

    /// Minimum overall success percentage (exit 1 if below)
    #[serde(default)]
    pub threshold: Option<u8>,

    #[serde(default)]
    pub tooltip_placement: Option<TooltipPlacement>,

    /// Scripts and stylesheets replacing the built-in ones
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_title: Option<String>,
        cli_threshold: Option<u8>,
        cli_force: bool,
    ) -> Self {
        if cli_title.is_some() {
            self.title = cli_title;
        }
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_force {
            self.force = Some(true);
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.title.is_none() {
            self.title = base.title;
        }
        if self.default_output.is_none() {
            self.default_output = base.default_output;
        }
        if self.force.is_none() {
            self.force = base.force;
        }
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.tooltip_placement.is_none() {
            self.tooltip_placement = base.tooltip_placement;
        }

        // Base assets load first
        let mut scripts = base.assets.scripts;
        scripts.append(&mut self.assets.scripts);
        self.assets.scripts = scripts;

        let mut styles = base.assets.styles;
        styles.append(&mut self.assets.styles);
        self.assets.styles = styles;
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Results")
    }

    pub fn default_output(&self) -> &str {
        self.default_output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    pub fn force(&self) -> bool {
        self.force.unwrap_or(false)
    }
}
