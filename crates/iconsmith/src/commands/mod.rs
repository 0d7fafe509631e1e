//! CLI commands.

pub mod add;
pub mod clear;
pub mod init;
pub mod list;
pub mod remove;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use iconsmith_adapters::FrameworkAdapter;
use walkdir::WalkDir;

use crate::config::Settings;

/// Read the inline registry file.
async fn read_registry(settings: &Settings) -> Result<String> {
    let path = &settings.registry_path;
    tokio::fs::read_to_string(path).await.with_context(|| {
        format!(
            "Failed to read {}; run `iconsmith init` first",
            path.display()
        )
    })
}

/// Write a file, creating its parent directories.
async fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, text)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// File holding one standalone component.
fn component_path(settings: &Settings, adapter: &dyn FrameworkAdapter, name: &str) -> PathBuf {
    settings
        .registry_path
        .join(format!("{name}.{}", adapter.extension(settings.typescript)))
}

/// Standalone component files in the output directory, sorted.
fn component_files(settings: &Settings, adapter: &dyn FrameworkAdapter) -> Vec<PathBuf> {
    let extension = adapter.extension(settings.typescript);
    let mut files: Vec<PathBuf> = WalkDir::new(&settings.registry_path)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();
    files.sort();
    files
}
