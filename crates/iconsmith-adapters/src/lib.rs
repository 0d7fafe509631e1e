//! Framework adapters for transpiling SVG icons into component source.
//!
//! Raw icon markup is optimized, normalized (accessibility and source
//! tracking attributes), parsed into a small element tree, and emitted as
//! JSX or as nested `h()` calls depending on the target framework.

pub mod calltree;
pub mod generator;
pub mod jsx;
pub mod markup;
pub mod normalize;
pub mod optimize;
pub mod react;
pub mod registry;
pub mod solid;
pub mod traits;
pub mod vue;

pub use calltree::{svg_to_calls, CallTree};
pub use generator::{component_name, to_pascal_case};
pub use markup::{parse_element, Element, MarkupError, Node};
pub use normalize::{extra_attributes, normalize, readable_name, title_text};
pub use optimize::{BasicOptimizer, Optimizer};
pub use react::{ReactAdapter, ReactRuntime};
pub use registry::AdapterRegistry;
pub use solid::SolidAdapter;
pub use traits::{
    A11yStrategy, ComponentSpec, FrameworkAdapter, OutputMode, TemplateConfig, TransformError,
    TransformOptions, REF_CONSTRUCTOR,
};
pub use vue::VueAdapter;
