//! Formatting-preserving edits of registry entries.
//!
//! Every operation reparses the text it is given and returns new text; no
//! parsed state survives between calls.

use std::cmp::Ordering;
use std::path::Path;

use oxc_span::SourceType;

use crate::parser::{parse_registry_as, RegistryError, RegistryFile, DEFAULT_COLLECTION};

/// Indentation used when the collection has no entries to copy it from.
const DEFAULT_INDENT: &str = "  ";

/// Edits the entries of one named collection.
#[derive(Debug, Clone)]
pub struct RegistryEditor {
    collection: String,
    source_type: SourceType,
}

impl Default for RegistryEditor {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION)
    }
}

impl RegistryEditor {
    /// Create an editor for the collection exported under `collection`.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            source_type: SourceType::tsx(),
        }
    }

    /// Parse with the source type implied by the registry's file extension.
    ///
    /// Unknown extensions keep TSX.
    pub fn with_path(mut self, path: &Path) -> Self {
        if let Ok(source_type) = SourceType::from_path(path) {
            self.source_type = source_type;
        }
        self
    }

    /// Parse with an explicit source type.
    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    /// Name of the tracked collection.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Parse `source` into a fresh view of the collection.
    pub fn parse<'a>(&self, source: &'a str) -> Result<RegistryFile<'a>, RegistryError> {
        parse_registry_as(source, &self.collection, self.source_type)
    }

    /// Make sure `name` is imported as a value from `module`.
    ///
    /// A missing import is added on its own line after the last import
    /// declaration, or before the first statement when there are none.
    pub fn ensure_import(
        &self,
        source: &str,
        name: &str,
        module: &str,
    ) -> Result<String, RegistryError> {
        let file = self.parse(source)?;
        if file.imports_value(name, module) {
            return Ok(source.to_string());
        }

        tracing::debug!("adding import of {} from {}", name, module);
        let line = format!(r#"import {{ {name} }} from "{module}";"#);
        Ok(match file.imports.last() {
            Some(last) => splice(source, last.end, last.end, &format!("\n{line}")),
            None => splice(
                source,
                file.body_start,
                file.body_start,
                &format!("{line}\n\n"),
            ),
        })
    }

    /// Insert `component` so that entry names stay alphabetically ordered.
    ///
    /// Assumes the existing entries are already ordered; they are never moved.
    pub fn insert(
        &self,
        source: &str,
        name: &str,
        component: &str,
    ) -> Result<String, RegistryError> {
        let file = self.parse(source)?;
        if !file.has_collection() {
            return Err(RegistryError::CollectionNotFound(self.collection.clone()));
        }

        let Some(last) = file.entries.last() else {
            return Ok(insert_into_empty(&file, component));
        };

        let following = file
            .entries
            .iter()
            .position(|e| compare_names(&e.name, name) == Ordering::Greater);

        match following {
            Some(index) => {
                let next = &file.entries[index];
                tracing::debug!("inserting {} before {}", name, next.name);
                let separator = separator_before(source, next.start);
                Ok(splice(
                    source,
                    next.start,
                    next.start,
                    &format!("{component}{separator}"),
                ))
            }
            None => {
                tracing::debug!("inserting {} after {}", name, last.name);
                let separator = separator_before(source, last.start);
                Ok(splice(
                    source,
                    last.end,
                    last.end,
                    &format!("{separator}{component}"),
                ))
            }
        }
    }

    /// Replace the text of an existing entry.
    ///
    /// Returns the source unchanged when no entry is called `name`.
    pub fn replace(
        &self,
        source: &str,
        name: &str,
        component: &str,
    ) -> Result<String, RegistryError> {
        let file = self.parse(source)?;
        match file.find(name) {
            Some(entry) => Ok(splice(source, entry.start, entry.end, component)),
            None => Ok(source.to_string()),
        }
    }

    /// Remove an entry together with its separator.
    ///
    /// Returns the source unchanged when no entry is called `name`.
    pub fn remove(&self, source: &str, name: &str) -> Result<String, RegistryError> {
        let file = self.parse(source)?;
        let Some(index) = file.position(name) else {
            return Ok(source.to_string());
        };
        let entry = &file.entries[index];
        let properties = &file.properties;
        let position = entry.property;

        // Neighbours are properties, not entries, so untracked spreads and
        // quoted keys between entries are kept.
        if properties.len() == 1 {
            let before = &source[file.collection_start..entry.start];
            let start = file.collection_start + before.trim_end().len();

            let after = source[entry.end..file.collection_end].trim_start();
            let after = after.strip_prefix(',').unwrap_or(after).trim_start();
            let end = file.collection_end - after.len();

            return Ok(splice(source, start, end, ""));
        }

        if position == properties.len() - 1 {
            let previous = &properties[position - 1];
            let between = &source[previous.end..entry.start];
            let start = previous.end + between.find(',').unwrap_or(0);
            return Ok(splice(source, start, entry.end, ""));
        }

        let next = &properties[position + 1];
        Ok(splice(source, entry.start, next.start, ""))
    }

    /// Fail with every name in `names` that has no entry.
    pub fn ensure_present<S: AsRef<str>>(
        &self,
        source: &str,
        names: &[S],
    ) -> Result<(), RegistryError> {
        let file = self.parse(source)?;
        let missing: Vec<String> = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !file.contains(name))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::NotFound(missing))
        }
    }

    /// Remove several entries, or none if any of them is missing.
    pub fn remove_many<S: AsRef<str>>(
        &self,
        source: &str,
        names: &[S],
    ) -> Result<String, RegistryError> {
        self.ensure_present(source, names)?;

        names.iter().try_fold(source.to_string(), |text, name| {
            self.remove(&text, name.as_ref())
        })
    }
}

/// Order entry names the way a locale-aware comparison does for identifiers:
/// letters compare case-insensitively, and lowercase sorts first on a tie.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn insert_into_empty(file: &RegistryFile<'_>, component: &str) -> String {
    let source = file.source;
    let interior = &source[file.collection_start..file.collection_end];

    if interior.trim().is_empty() {
        splice(
            source,
            file.collection_start,
            file.collection_end,
            &format!("\n{DEFAULT_INDENT}{component},\n"),
        )
    } else {
        // Keep comments or other non-entry content in place.
        splice(
            source,
            file.collection_start,
            file.collection_start,
            &format!("\n{DEFAULT_INDENT}{component},"),
        )
    }
}

/// Separator matching the layout of the entry starting at `offset`:
/// a newline plus its indentation, or a single space on one-line objects.
fn separator_before(source: &str, offset: usize) -> String {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let indent = &source[line_start..offset];

    if indent.chars().all(char::is_whitespace) && line_start > 0 {
        format!(",\n{indent}")
    } else {
        ", ".to_string()
    }
}

fn splice(source: &str, start: usize, end: usize, text: &str) -> String {
    let mut out = String::with_capacity(source.len() + text.len());
    out.push_str(&source[..start]);
    out.push_str(text);
    out.push_str(&source[end..]);
    out
}
