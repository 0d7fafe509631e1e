//! Configuration file (iconsmith.toml) and per-invocation settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;
use iconsmith_adapters::{
    component_name, A11yStrategy, BasicOptimizer, ComponentSpec, OutputMode, TemplateConfig,
    TransformOptions,
};
use iconsmith_registry::RegistryEditor;
use serde::Deserialize;

/// Configuration file structure (iconsmith.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    registry: RegistryConfig,
    #[serde(default)]
    icons: IconsConfig,
    #[serde(default)]
    a11y: A11yConfig,
}

#[derive(Debug, Deserialize)]
struct RegistryConfig {
    /// Registry file, or output directory in standalone mode
    #[serde(default = "default_registry_path")]
    path: String,
    #[serde(default = "default_collection")]
    collection: String,
    #[serde(default = "default_framework")]
    framework: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_typescript")]
    typescript: bool,
}

#[derive(Debug, Deserialize)]
struct IconsConfig {
    #[serde(default = "default_icons_dir")]
    dir: String,
}

#[derive(Debug, Deserialize)]
struct A11yConfig {
    #[serde(default = "default_strategy")]
    strategy: String,
    #[serde(default)]
    track_source: bool,
    #[serde(default)]
    forward_ref: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
            collection: default_collection(),
            framework: default_framework(),
            output: default_output(),
            typescript: default_typescript(),
        }
    }
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            dir: default_icons_dir(),
        }
    }
}

impl Default for A11yConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            track_source: false,
            forward_ref: false,
        }
    }
}

fn default_registry_path() -> String {
    "src/icons.tsx".to_string()
}
fn default_collection() -> String {
    "Icons".to_string()
}
fn default_framework() -> String {
    "react".to_string()
}
fn default_output() -> String {
    "inline".to_string()
}
fn default_typescript() -> bool {
    true
}
fn default_icons_dir() -> String {
    "icons".to_string()
}
fn default_strategy() -> String {
    "hidden".to_string()
}

/// Command-line overrides for transpile options.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Accessibility strategy: hidden, img, title, presentation or none
    #[arg(long)]
    pub a11y: Option<String>,

    /// Add a data-icon attribute with the icon name
    #[arg(long)]
    pub track_source: bool,

    /// Wrap components in forwardRef where supported
    #[arg(long)]
    pub forward_ref: bool,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Registry file (inline) or component directory (standalone)
    pub registry_path: PathBuf,
    pub collection: String,
    pub framework: String,
    pub output_mode: OutputMode,
    pub typescript: bool,
    /// Directory holding raw `<name>.svg` files
    pub icons_dir: PathBuf,
    pub a11y: A11yStrategy,
    pub track_source: bool,
    pub forward_ref: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from(default_registry_path()),
            collection: default_collection(),
            framework: default_framework(),
            output_mode: OutputMode::default(),
            typescript: default_typescript(),
            icons_dir: PathBuf::from(default_icons_dir()),
            a11y: A11yStrategy::default(),
            track_source: false,
            forward_ref: false,
        }
    }
}

impl Settings {
    /// Load settings from a config file if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;
            let settings = Self::parse(&content)
                .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;
            tracing::debug!("Loaded config from {}", path.display());
            return Ok(settings);
        }
        Ok(Self::default())
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        Self::from_config(config)
    }

    fn from_config(config: ConfigFile) -> Result<Self> {
        Ok(Self {
            registry_path: PathBuf::from(config.registry.path),
            collection: config.registry.collection,
            framework: config.registry.framework.to_lowercase(),
            output_mode: parse_output(&config.registry.output)?,
            typescript: config.registry.typescript,
            icons_dir: PathBuf::from(config.icons.dir),
            a11y: parse_a11y(&config.a11y.strategy)?,
            track_source: config.a11y.track_source,
            forward_ref: config.a11y.forward_ref,
        })
    }

    /// Apply command-line overrides on top of the file settings.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(strategy) = &overrides.a11y {
            self.a11y = parse_a11y(strategy)?;
        }
        self.track_source |= overrides.track_source;
        self.forward_ref |= overrides.forward_ref;
        Ok(self)
    }

    /// Component spec for one icon.
    pub fn spec(&self, icon: &str) -> ComponentSpec {
        ComponentSpec {
            component_name: component_name(icon),
            icon_name: icon.to_string(),
            a11y: self.a11y,
            track_source: self.track_source,
            forward_ref: self.forward_ref,
            output_mode: self.output_mode,
        }
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            typescript: self.typescript,
            optimizer: Arc::new(BasicOptimizer),
        }
    }

    pub fn template_config(&self) -> TemplateConfig {
        TemplateConfig {
            collection: self.collection.clone(),
            typescript: self.typescript,
            forward_ref: self.forward_ref,
        }
    }

    pub fn editor(&self) -> RegistryEditor {
        RegistryEditor::new(self.collection.as_str()).with_path(&self.registry_path)
    }
}

fn parse_a11y(name: &str) -> Result<A11yStrategy> {
    A11yStrategy::from_name(name).ok_or_else(|| {
        anyhow!(
            "Unknown a11y strategy `{}` (expected hidden, img, title, presentation or none)",
            name
        )
    })
}

fn parse_output(name: &str) -> Result<OutputMode> {
    OutputMode::from_name(name)
        .ok_or_else(|| anyhow!("Unknown output mode `{}` (expected inline or standalone)", name))
}
