//! Remove every icon.

use anyhow::{Context, Result};
use iconsmith_adapters::{AdapterRegistry, OutputMode};

use super::{component_files, write_file};
use crate::config::Settings;

/// Run the clear command. Without `yes` nothing is written.
pub async fn run(settings: &Settings, yes: bool) -> Result<()> {
    if !yes {
        tracing::warn!("This removes every registered icon. Re-run with --yes to confirm.");
        return Ok(());
    }

    let adapters = AdapterRegistry::new();
    let adapter = adapters.get(&settings.framework)?;

    match settings.output_mode {
        OutputMode::Inline => {
            let template = adapter.icons_template(&settings.template_config())?;
            write_file(&settings.registry_path, &template).await?;
            tracing::info!("Cleared {}", settings.registry_path.display());
        }
        OutputMode::Standalone => {
            let files = component_files(settings, adapter);
            for path in &files {
                tokio::fs::remove_file(path)
                    .await
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
            tracing::info!("Removed {} component file(s)", files.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, init, list, testing};
    use std::fs;
    use tempfile::tempdir;

    async fn populated(root: &std::path::Path, mode: OutputMode) -> Settings {
        let settings = testing::settings(root, mode);
        init::run(&settings, &root.join("iconsmith.toml"), false)
            .await
            .unwrap();
        add::run(
            &settings,
            &["home".to_string(), "bell".to_string()],
            add::Mode::Add,
        )
        .await
        .unwrap();
        settings
    }

    #[tokio::test]
    async fn requires_confirmation() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Inline).await;
        let before = fs::read_to_string(&settings.registry_path).unwrap();

        run(&settings, false).await.unwrap();

        assert_eq!(fs::read_to_string(&settings.registry_path).unwrap(), before);
    }

    #[tokio::test]
    async fn resets_inline_registry() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Inline).await;

        run(&settings, true).await.unwrap();

        assert!(list::run(&settings, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deletes_standalone_files() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Standalone).await;

        run(&settings, true).await.unwrap();

        assert!(list::run(&settings, false).await.unwrap().is_empty());
        assert!(settings.registry_path.is_dir());
    }
}
