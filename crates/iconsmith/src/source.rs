//! Icon markup providers.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that can occur when fetching icon markup.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Icon not found: {0}")]
    NotFound(String),

    #[error("Invalid icon name: {0}")]
    InvalidName(String),

    #[error("Failed to fetch {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Retrieves raw SVG markup by icon name.
pub trait IconSource {
    fn fetch(&self, name: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Reads `<dir>/<name>.svg` files.
#[derive(Debug, Clone)]
pub struct DirectoryIconSource {
    root: PathBuf,
}

impl DirectoryIconSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names of all icons in the directory, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| icon_name(&self.root, e.path()))
            .collect();
        names.sort();
        names
    }
}

impl IconSource for DirectoryIconSource {
    async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        if name.is_empty() || name.starts_with('.') || name.contains('\\') || name.contains("..") {
            return Err(FetchError::InvalidName(name.to_string()));
        }

        let path = self.root.join(format!("{name}.svg"));
        tracing::debug!("reading {}", path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(markup) => Ok(markup),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(name.to_string()))
            }
            Err(e) => Err(FetchError::Io {
                name: name.to_string(),
                source: e,
            }),
        }
    }
}

/// Icon name of an `.svg` file relative to `root`, using `/` separators.
fn icon_name(root: &Path, path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("svg") {
        return None;
    }
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn fetches_markup_by_name() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("home.svg"), "<svg/>").unwrap();

        let source = DirectoryIconSource::new(temp.path());

        assert_eq!(source.fetch("home").await.unwrap(), "<svg/>");
    }

    #[test]
    fn reports_missing_icons() {
        let temp = tempdir().unwrap();
        let source = DirectoryIconSource::new(temp.path());

        let result = tokio_test::block_on(source.fetch("ghost"));

        assert!(matches!(result, Err(FetchError::NotFound(name)) if name == "ghost"));
    }

    #[test]
    fn rejects_path_traversal() {
        let temp = tempdir().unwrap();
        let source = DirectoryIconSource::new(temp.path());

        let result = tokio_test::block_on(source.fetch("../secret"));

        assert!(matches!(result, Err(FetchError::InvalidName(_))));
    }

    #[test]
    fn lists_available_icons_recursively() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("brand")).unwrap();
        fs::write(temp.path().join("home.svg"), "<svg/>").unwrap();
        fs::write(temp.path().join("arrow.svg"), "<svg/>").unwrap();
        fs::write(temp.path().join("brand/logo.svg"), "<svg/>").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let source = DirectoryIconSource::new(temp.path());

        assert_eq!(source.available(), vec!["arrow", "brand/logo", "home"]);
    }
}
