//! Trait definitions for framework adapters.

use std::sync::Arc;

use crate::markup::MarkupError;
use crate::optimize::{BasicOptimizer, Optimizer};

/// How an icon is exposed to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum A11yStrategy {
    /// `aria-hidden="true"`, for decorative icons
    #[default]
    Hidden,
    /// `role="img"` plus an `aria-label`
    Img,
    /// A `<title>` element as first child
    Title,
    /// `role="presentation"`
    Presentation,
    /// No accessibility attributes
    None,
}

impl A11yStrategy {
    /// Parse a strategy from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "hidden" => Some(Self::Hidden),
            "img" => Some(Self::Img),
            "title" => Some(Self::Title),
            "presentation" => Some(Self::Presentation),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Where generated components live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One property per icon inside the shared registry object
    #[default]
    Inline,
    /// One exported component per file
    Standalone,
}

impl OutputMode {
    /// Parse an output mode from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "inline" => Some(Self::Inline),
            "standalone" => Some(Self::Standalone),
            _ => None,
        }
    }
}

/// Everything needed to turn one icon into one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Component identifier (e.g., "ArrowUpRight")
    pub component_name: String,

    /// Icon name as requested from the provider (e.g., "arrow-up-right")
    pub icon_name: String,

    /// Accessibility strategy
    pub a11y: A11yStrategy,

    /// Add `data-icon` with the icon name
    pub track_source: bool,

    /// Wrap the component in the target's ref-forwarding constructor
    pub forward_ref: bool,

    /// Inline registry entry or standalone file
    pub output_mode: OutputMode,
}

impl ComponentSpec {
    /// Create a spec with default options.
    pub fn new(component_name: impl Into<String>, icon_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            icon_name: icon_name.into(),
            a11y: A11yStrategy::default(),
            track_source: false,
            forward_ref: false,
            output_mode: OutputMode::default(),
        }
    }

    /// Name used when reporting errors about this icon.
    pub fn label(&self) -> &str {
        if self.icon_name.is_empty() {
            &self.component_name
        } else {
            &self.icon_name
        }
    }
}

/// Target-independent options for a transform.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Emit TypeScript type annotations
    pub typescript: bool,

    /// Markup optimizer run before normalization
    pub optimizer: Arc<dyn Optimizer>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            typescript: false,
            optimizer: Arc::new(BasicOptimizer),
        }
    }
}

/// Options for generating a whole registry file.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Exported collection identifier (e.g., "Icons")
    pub collection: String,

    /// Emit TypeScript (`as const`, type imports)
    pub typescript: bool,

    /// Import the ref-forwarding constructor
    pub forward_ref: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            collection: "Icons".to_string(),
            typescript: true,
            forward_ref: false,
        }
    }
}

/// Name of the ref-forwarding constructor imported by JSX targets.
pub const REF_CONSTRUCTOR: &str = "forwardRef";

/// Errors that can occur during transformation.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("No root <svg> element found in icon `{0}`")]
    MissingRoot(String),

    #[error("Malformed markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("Optimize error: {0}")]
    Optimize(String),

    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl TransformError {
    /// Attribute a markup failure to the icon being transformed.
    pub(crate) fn for_icon(err: MarkupError, spec: &ComponentSpec) -> Self {
        match err {
            MarkupError::NoRootElement => Self::MissingRoot(spec.label().to_string()),
            other => Self::Markup(other),
        }
    }
}

/// Trait for framework-specific adapters.
pub trait FrameworkAdapter: Send + Sync {
    /// Framework identifier (e.g., "react", "vue")
    fn name(&self) -> &'static str;

    /// File extension for generated files
    fn extension(&self, typescript: bool) -> &'static str;

    /// Module exporting the ref-forwarding constructor, if the target has one
    fn ref_module(&self) -> Option<&'static str> {
        None
    }

    /// Whether the target has a ref-forwarding constructor
    fn supports_ref(&self) -> bool {
        self.ref_module().is_some()
    }

    /// Transpile raw icon markup into a component snippet.
    ///
    /// Inline mode returns a `Name: ...` object entry; standalone mode
    /// returns a complete file.
    fn transform_svg(
        &self,
        markup: &str,
        spec: &ComponentSpec,
        options: &TransformOptions,
    ) -> Result<String, TransformError>;

    /// Whole-file text of an empty registry.
    fn icons_template(&self, config: &TemplateConfig) -> Result<String, TransformError>;
}
