//! Add or regenerate icons.

use anyhow::Result;
use iconsmith_adapters::{
    AdapterRegistry, ComponentSpec, FrameworkAdapter, OutputMode, REF_CONSTRUCTOR,
};

use super::{component_path, read_registry, write_file};
use crate::config::Settings;
use crate::report::Outcome;
use crate::source::{DirectoryIconSource, IconSource};

/// How existing and missing icons are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Insert new icons, skip registered ones.
    Add,
    /// Insert new icons, regenerate registered ones.
    Upsert,
    /// Regenerate registered icons, skip new ones.
    Replace,
}

impl Mode {
    fn skip_reason(self, exists: bool) -> Option<&'static str> {
        match (self, exists) {
            (Mode::Add, true) => Some("already registered (use --force to regenerate)"),
            (Mode::Replace, false) => Some("not registered"),
            _ => None,
        }
    }
}

/// Run the add command.
///
/// Icons are processed one after another; a failing icon is reported
/// and does not stop the rest of the batch.
pub async fn run(settings: &Settings, icons: &[String], mode: Mode) -> Result<Vec<Outcome>> {
    let adapters = AdapterRegistry::new();
    let adapter = adapters.get(&settings.framework)?;
    let source = DirectoryIconSource::new(&settings.icons_dir);

    tracing::debug!(
        "processing {} icon(s) for {} ({:?})",
        icons.len(),
        adapter.name(),
        settings.output_mode
    );

    match settings.output_mode {
        OutputMode::Inline => add_inline(settings, adapter, &source, icons, mode).await,
        OutputMode::Standalone => add_standalone(settings, adapter, &source, icons, mode).await,
    }
}

async fn add_inline<S: IconSource>(
    settings: &Settings,
    adapter: &dyn FrameworkAdapter,
    source: &S,
    icons: &[String],
    mode: Mode,
) -> Result<Vec<Outcome>> {
    let editor = settings.editor();
    let original = read_registry(settings).await?;

    let mut text = original.clone();
    let mut outcomes = Vec::with_capacity(icons.len());

    for icon in icons {
        let spec = settings.spec(icon);
        let exists = editor.parse(&text)?.contains(&spec.component_name);

        if let Some(reason) = mode.skip_reason(exists) {
            outcomes.push(Outcome::skipped(icon, reason));
            continue;
        }

        let component = match transpile(settings, adapter, source, icon, &spec).await {
            Ok(component) => component,
            Err(e) => {
                outcomes.push(Outcome::failed(icon, e));
                continue;
            }
        };

        if exists {
            text = editor.replace(&text, &spec.component_name, &component)?;
            outcomes.push(Outcome::Replaced(icon.clone()));
        } else {
            text = editor.insert(&text, &spec.component_name, &component)?;
            outcomes.push(Outcome::Added(icon.clone()));
        }

        // Ref-forwarding entries call the constructor, which the registry
        // may not import yet.
        if let Some(module) = adapter.ref_module().filter(|_| spec.forward_ref) {
            text = editor.ensure_import(&text, REF_CONSTRUCTOR, module)?;
        }
    }

    if text != original {
        write_file(&settings.registry_path, &text).await?;
        tracing::debug!("wrote {}", settings.registry_path.display());
    }

    Ok(outcomes)
}

async fn add_standalone<S: IconSource>(
    settings: &Settings,
    adapter: &dyn FrameworkAdapter,
    source: &S,
    icons: &[String],
    mode: Mode,
) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(icons.len());

    for icon in icons {
        let spec = settings.spec(icon);
        let path = component_path(settings, adapter, &spec.component_name);
        let exists = path.exists();

        if let Some(reason) = mode.skip_reason(exists) {
            outcomes.push(Outcome::skipped(icon, reason));
            continue;
        }

        match transpile(settings, adapter, source, icon, &spec).await {
            Ok(component) => {
                write_file(&path, &component).await?;
                outcomes.push(if exists {
                    Outcome::Replaced(icon.clone())
                } else {
                    Outcome::Added(icon.clone())
                });
            }
            Err(e) => outcomes.push(Outcome::failed(icon, e)),
        }
    }

    Ok(outcomes)
}

async fn transpile<S: IconSource>(
    settings: &Settings,
    adapter: &dyn FrameworkAdapter,
    source: &S,
    icon: &str,
    spec: &ComponentSpec,
) -> Result<String> {
    let markup = source.fetch(icon).await?;
    let component = adapter.transform_svg(&markup, spec, &settings.transform_options())?;
    Ok(component)
}
