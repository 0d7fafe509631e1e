//! List registered or available icons.

use anyhow::Result;
use iconsmith_adapters::{AdapterRegistry, OutputMode};

use super::{component_files, read_registry};
use crate::config::Settings;
use crate::source::DirectoryIconSource;

/// Run the list command.
///
/// Registered components are listed in registry order; available icons
/// are the raw SVG names in the icons directory.
pub async fn run(settings: &Settings, available: bool) -> Result<Vec<String>> {
    if available {
        return Ok(DirectoryIconSource::new(&settings.icons_dir).available());
    }

    match settings.output_mode {
        OutputMode::Inline => {
            let text = read_registry(settings).await?;
            let file = settings.editor().parse(&text)?;
            if !file.has_collection() {
                tracing::warn!(
                    "No `{}` collection in {}",
                    settings.collection,
                    settings.registry_path.display()
                );
            }
            Ok(file.names().into_iter().map(str::to_string).collect())
        }
        OutputMode::Standalone => {
            let adapters = AdapterRegistry::new();
            let adapter = adapters.get(&settings.framework)?;
            Ok(component_files(settings, adapter)
                .iter()
                .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
                .collect())
        }
    }
}
