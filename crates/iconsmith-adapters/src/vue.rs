//! Vue adapter emitting render-function calls.

use crate::calltree::CallTree;
use crate::generator::{render_icons_file, render_standalone};
use crate::normalize::{extra_attributes, title_text};
use crate::traits::{
    ComponentSpec, FrameworkAdapter, OutputMode, TemplateConfig, TransformError, TransformOptions,
};

/// Render-function constructor imported from `vue`.
const CTOR: &str = "h";

/// Vue adapter. Components are functional components returning `h()` trees.
#[derive(Debug, Default)]
pub struct VueAdapter;

impl VueAdapter {
    /// Create a Vue adapter.
    pub fn new() -> Self {
        Self
    }

    fn imports(typescript: bool) -> Vec<String> {
        let mut imports = vec![format!(r#"import {{ {CTOR} }} from "vue";"#)];
        if typescript {
            imports.push(r#"import type { SVGAttributes } from "vue";"#.to_string());
        }
        imports
    }
}

impl FrameworkAdapter for VueAdapter {
    fn name(&self) -> &'static str {
        "vue"
    }

    fn extension(&self, typescript: bool) -> &'static str {
        if typescript {
            "ts"
        } else {
            "js"
        }
    }

    fn transform_svg(
        &self,
        markup: &str,
        spec: &ComponentSpec,
        options: &TransformOptions,
    ) -> Result<String, TransformError> {
        let optimized = options.optimizer.optimize(markup)?;
        let mut tree = CallTree::parse(&optimized).map_err(|e| TransformError::for_icon(e, spec))?;
        if tree.root.tag != "svg" {
            return Err(TransformError::MissingRoot(spec.label().to_string()));
        }

        tree.merge_root_attributes(&extra_attributes(spec));
        tree.spread_props("props");
        if let Some(title) = title_text(spec) {
            tree.prepend_title(&title);
        }
        let call = tree.emit(CTOR);

        let params = if options.typescript {
            "props: SVGAttributes"
        } else {
            "props"
        };
        let name = &spec.component_name;

        match spec.output_mode {
            OutputMode::Inline => Ok(format!("{name}: ({params}) => {call}")),
            OutputMode::Standalone => {
                let declaration = format!("export const {name} = ({params}) => {call};");
                Ok(render_standalone(
                    &Self::imports(options.typescript),
                    name,
                    &declaration,
                )?)
            }
        }
    }

    fn icons_template(&self, config: &TemplateConfig) -> Result<String, TransformError> {
        Ok(render_icons_file(
            &Self::imports(config.typescript),
            &config.collection,
            config.typescript,
        )?)
    }
}
