//! Initialize an icon registry in a project.

use std::path::Path;

use anyhow::{Context, Result};
use iconsmith_adapters::{AdapterRegistry, OutputMode};

use super::write_file;
use crate::config::Settings;

/// Run the init command.
pub async fn run(settings: &Settings, config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing iconsmith...");

    if !config_path.exists() {
        write_file(config_path, DEFAULT_CONFIG).await?;
        tracing::info!("Created {}", config_path.display());
    }

    let adapters = AdapterRegistry::new();
    let adapter = adapters.get(&settings.framework)?;

    match settings.output_mode {
        OutputMode::Inline => {
            let path = &settings.registry_path;
            if path.exists() && !yes {
                tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
                return Ok(());
            }
            let template = adapter.icons_template(&settings.template_config())?;
            write_file(path, &template).await?;
            tracing::info!("Created {}", path.display());
        }
        OutputMode::Standalone => {
            let dir = &settings.registry_path;
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            tracing::info!("Using {} for component files", dir.display());
        }
    }

    if !settings.icons_dir.exists() {
        tokio::fs::create_dir_all(&settings.icons_dir)
            .await
            .context("Failed to create icons directory")?;
        tracing::info!("Created {}", settings.icons_dir.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Drop SVG files into the icons directory and run 'iconsmith add <name>'.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# iconsmith configuration

[registry]
# Registry file (inline) or component directory (standalone)
path = "src/icons.tsx"

# Exported object holding the icons
collection = "Icons"

# Target framework: react, preact, solid or vue
framework = "react"

# inline: one registry file, standalone: one file per icon
output = "inline"

typescript = true

[icons]
# Directory containing raw <name>.svg files
dir = "icons"

[a11y]
# hidden, img, title, presentation or none
strategy = "hidden"
track_source = false
forward_ref = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_config_and_empty_registry() {
        let temp = tempdir().unwrap();
        let settings = testing::settings(temp.path(), OutputMode::Inline);
        let config_path = temp.path().join("iconsmith.toml");

        run(&settings, &config_path, false).await.unwrap();

        let config = fs::read_to_string(&config_path).unwrap();
        assert!(Settings::parse(&config).is_ok());

        let registry = fs::read_to_string(&settings.registry_path).unwrap();
        assert!(registry.ends_with("export const Icons = {} as const;\n"));
    }

    #[tokio::test]
    async fn keeps_existing_registry_without_yes() {
        let temp = tempdir().unwrap();
        let settings = testing::settings(temp.path(), OutputMode::Inline);
        fs::create_dir_all(settings.registry_path.parent().unwrap()).unwrap();
        fs::write(&settings.registry_path, "export const Icons = { A: 1 };\n").unwrap();

        run(&settings, &temp.path().join("iconsmith.toml"), false)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(&settings.registry_path).unwrap(),
            "export const Icons = { A: 1 };\n"
        );
    }

    #[tokio::test]
    async fn creates_standalone_directory() {
        let temp = tempdir().unwrap();
        let settings = testing::settings(temp.path(), OutputMode::Standalone);

        run(&settings, &temp.path().join("iconsmith.toml"), false)
            .await
            .unwrap();

        assert!(settings.registry_path.is_dir());
    }
}
