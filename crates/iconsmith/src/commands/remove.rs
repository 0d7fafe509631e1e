//! Remove icons from the registry.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use iconsmith_adapters::{component_name, AdapterRegistry, OutputMode};
use iconsmith_registry::RegistryError;

use super::{component_path, read_registry, write_file};
use crate::config::Settings;
use crate::report::Outcome;

/// Run the remove command.
///
/// The batch is all-or-nothing: if any name is not registered, nothing
/// is removed. Names resolving to the same component are removed once.
pub async fn run(settings: &Settings, icons: &[String]) -> Result<Vec<Outcome>> {
    let mut seen = BTreeSet::new();
    let (icons, names): (Vec<&String>, Vec<String>) = icons
        .iter()
        .map(|icon| (icon, component_name(icon)))
        .filter(|(_, name)| seen.insert(name.clone()))
        .unzip();

    match settings.output_mode {
        OutputMode::Inline => {
            let text = read_registry(settings).await?;
            let updated = settings.editor().remove_many(&text, &names)?;
            write_file(&settings.registry_path, &updated).await?;
        }
        OutputMode::Standalone => {
            let adapters = AdapterRegistry::new();
            let adapter = adapters.get(&settings.framework)?;

            let paths: Vec<_> = names
                .iter()
                .map(|name| component_path(settings, adapter, name))
                .collect();
            let missing: Vec<String> = names
                .iter()
                .zip(&paths)
                .filter(|(_, path)| !path.exists())
                .map(|(name, _)| name.clone())
                .collect();
            if !missing.is_empty() {
                return Err(RegistryError::NotFound(missing).into());
            }

            for path in &paths {
                tokio::fs::remove_file(path)
                    .await
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
        }
    }

    Ok(icons
        .into_iter()
        .map(|icon| Outcome::Removed(icon.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, init, list, testing};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn icons(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    async fn populated(root: &std::path::Path, mode: OutputMode) -> Settings {
        let settings = testing::settings(root, mode);
        init::run(&settings, &root.join("iconsmith.toml"), false)
            .await
            .unwrap();
        add::run(&settings, &icons(&["home", "bell", "check"]), add::Mode::Add)
            .await
            .unwrap();
        settings
    }

    #[tokio::test]
    async fn removes_inline_entries() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Inline).await;

        let outcomes = run(&settings, &icons(&["bell", "Home"])).await.unwrap();

        assert_eq!(
            outcomes,
            vec![Outcome::Removed("bell".into()), Outcome::Removed("Home".into())]
        );
        assert_eq!(list::run(&settings, false).await.unwrap(), vec!["Check"]);
    }

    #[tokio::test]
    async fn unknown_name_removes_nothing() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Inline).await;
        let before = fs::read_to_string(&settings.registry_path).unwrap();

        let err = run(&settings, &icons(&["bell", "ghost"])).await.unwrap_err();

        assert!(err.to_string().contains("Ghost"));
        assert_eq!(fs::read_to_string(&settings.registry_path).unwrap(), before);
    }

    #[tokio::test]
    async fn removing_everything_leaves_an_empty_collection() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Inline).await;

        run(&settings, &icons(&["home", "bell", "check"]))
            .await
            .unwrap();

        let text = fs::read_to_string(&settings.registry_path).unwrap();
        assert!(text.contains("export const Icons = {}"));
    }

    #[tokio::test]
    async fn removes_standalone_files() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Standalone).await;

        run(&settings, &icons(&["bell"])).await.unwrap();

        assert!(!settings.registry_path.join("Bell.tsx").exists());
        assert!(settings.registry_path.join("Home.tsx").exists());
    }

    #[tokio::test]
    async fn repeated_names_are_removed_once() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Standalone).await;

        let outcomes = run(&settings, &icons(&["bell", "bell", "Bell"])).await.unwrap();

        assert_eq!(outcomes, vec![Outcome::Removed("bell".into())]);
        assert!(!settings.registry_path.join("Bell.tsx").exists());
        assert!(settings.registry_path.join("Home.tsx").exists());
    }

    #[tokio::test]
    async fn repeated_inline_names_report_once() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Inline).await;

        let outcomes = run(&settings, &icons(&["bell", "bell"])).await.unwrap();

        assert_eq!(outcomes, vec![Outcome::Removed("bell".into())]);
        assert_eq!(list::run(&settings, false).await.unwrap(), vec!["Check", "Home"]);
    }

    #[tokio::test]
    async fn standalone_missing_file_removes_nothing() {
        let temp = tempdir().unwrap();
        let settings = populated(temp.path(), OutputMode::Standalone).await;

        assert!(run(&settings, &icons(&["bell", "ghost"])).await.is_err());
        assert!(settings.registry_path.join("Bell.tsx").exists());
    }
}
