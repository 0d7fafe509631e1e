//! Solid adapter emitting JSX with native attribute names.

use crate::generator::{render_icons_file, render_standalone};
use crate::jsx::{render_jsx, AttributeCase, RootProps};
use crate::markup::parse_element;
use crate::normalize::normalize;
use crate::traits::{
    ComponentSpec, FrameworkAdapter, OutputMode, TemplateConfig, TransformError, TransformOptions,
};

const PROPS_TYPE: &str = "JSX.SvgSVGAttributes<SVGSVGElement>";

/// Solid JSX adapter. Solid passes refs as ordinary props, so there is no
/// ref-forwarding wrapper.
#[derive(Debug, Default)]
pub struct SolidAdapter;

impl SolidAdapter {
    /// Create a Solid adapter.
    pub fn new() -> Self {
        Self
    }

    fn imports(typescript: bool) -> Vec<String> {
        if typescript {
            vec![r#"import type { JSX } from "solid-js";"#.to_string()]
        } else {
            Vec::new()
        }
    }
}

impl FrameworkAdapter for SolidAdapter {
    fn name(&self) -> &'static str {
        "solid"
    }

    fn extension(&self, typescript: bool) -> &'static str {
        if typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    fn transform_svg(
        &self,
        markup: &str,
        spec: &ComponentSpec,
        options: &TransformOptions,
    ) -> Result<String, TransformError> {
        let normalized = normalize(markup, spec, options.optimizer.as_ref())?;
        let root = parse_element(&normalized).map_err(|e| TransformError::for_icon(e, spec))?;
        if root.tag != "svg" {
            return Err(TransformError::MissingRoot(spec.label().to_string()));
        }

        let jsx = render_jsx(
            &root,
            AttributeCase::Kebab,
            RootProps {
                ref_ident: None,
                spread: Some("props"),
            },
        );

        let params = if options.typescript {
            format!("props: {PROPS_TYPE}")
        } else {
            "props".to_string()
        };
        let name = &spec.component_name;

        match spec.output_mode {
            OutputMode::Inline => Ok(format!("{name}: ({params}) => ({jsx})")),
            OutputMode::Standalone => {
                let declaration = format!("export function {name}({params}) {{\n  return ({jsx});\n}}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::A11yStrategy;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_native_attribute_names() {
        let spec = ComponentSpec::new("Check", "check");
        let out = SolidAdapter::new()
            .transform_svg(
                r#"<svg class="icon" stroke-width="2"><path stroke-linecap="round" d="M1"/></svg>"#,
                &spec,
                &TransformOptions::default(),
            )
            .unwrap();

        assert_eq!(
            out,
            r#"Check: (props) => (<svg class="icon" stroke-width="2" aria-hidden="true" {...props}><path stroke-linecap="round" d="M1" /></svg>)"#
        );
    }

    #[test]
    fn ignores_forward_ref() {
        let spec = ComponentSpec {
            forward_ref: true,
            a11y: A11yStrategy::None,
            ..ComponentSpec::new("Dot", "dot")
        };
        let out = SolidAdapter::new()
            .transform_svg("<svg/>", &spec, &TransformOptions::default())
            .unwrap();

        assert!(!SolidAdapter::new().supports_ref());
        assert_eq!(out, "Dot: (props) => (<svg {...props} />)");
    }

    #[test]
    fn standalone_emits_exported_function() {
        let spec = ComponentSpec {
            output_mode: OutputMode::Standalone,
            a11y: A11yStrategy::Presentation,
            ..ComponentSpec::new("Dot", "dot")
        };
        let options = TransformOptions {
            typescript: true,
            ..TransformOptions::default()
        };
        let out = SolidAdapter::new().transform_svg("<svg/>", &spec, &options).unwrap();

        assert_eq!(
            out,
            r#"import type { JSX } from "solid-js";

export function Dot(props: JSX.SvgSVGAttributes<SVGSVGElement>) {
  return (<svg role="presentation" {...props} />);
}

export default Dot;
"#
        );
    }
}
