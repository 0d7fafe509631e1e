//! React and Preact adapter emitting JSX components.

use crate::generator::{render_icons_file, render_standalone};
use crate::jsx::{render_jsx, AttributeCase, RootProps};
use crate::markup::parse_element;
use crate::normalize::normalize;
use crate::traits::{
    ComponentSpec, FrameworkAdapter, OutputMode, TemplateConfig, TransformError, TransformOptions,
    REF_CONSTRUCTOR,
};

/// Which React-compatible runtime the components target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactRuntime {
    #[default]
    React,
    Preact,
}

impl ReactRuntime {
    fn name(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Preact => "preact",
        }
    }

    /// Module exporting `forwardRef`.
    fn ref_module(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Preact => "preact/compat",
        }
    }

    fn props_type(self) -> &'static str {
        match self {
            Self::React => "SVGProps<SVGSVGElement>",
            Self::Preact => "JSX.SVGAttributes<SVGSVGElement>",
        }
    }

    fn type_import(self) -> &'static str {
        match self {
            Self::React => r#"import type { SVGProps } from "react";"#,
            Self::Preact => r#"import type { JSX } from "preact";"#,
        }
    }
}

/// JSX adapter with DOM-property attribute names and ref forwarding.
#[derive(Debug, Default)]
pub struct ReactAdapter {
    runtime: ReactRuntime,
}

impl ReactAdapter {
    /// Create a React adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Preact adapter.
    pub fn preact() -> Self {
        Self {
            runtime: ReactRuntime::Preact,
        }
    }

    fn imports(&self, typescript: bool, forward_ref: bool) -> Vec<String> {
        let mut imports = Vec::new();
        if forward_ref {
            imports.push(format!(
                r#"import {{ {REF_CONSTRUCTOR} }} from "{}";"#,
                self.runtime.ref_module()
            ));
        }
        if typescript {
            imports.push(self.runtime.type_import().to_string());
        }
        imports
    }
}

impl FrameworkAdapter for ReactAdapter {
    fn name(&self) -> &'static str {
        self.runtime.name()
    }

    fn extension(&self, typescript: bool) -> &'static str {
        if typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    fn ref_module(&self) -> Option<&'static str> {
        Some(self.runtime.ref_module())
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

        let forward_ref = spec.forward_ref && self.supports_ref();
        let jsx = render_jsx(
            &root,
            AttributeCase::Camel,
            RootProps {
                ref_ident: forward_ref.then_some("ref"),
                spread: Some("props"),
            },
        );

        let props_type = self.runtime.props_type();
        let name = &spec.component_name;

        let component = if forward_ref {
            let generics = if options.typescript {
                format!("<SVGSVGElement, {props_type}>")
            } else {
                String::new()
            };
            format!("{REF_CONSTRUCTOR}{generics}((props, ref) => ({jsx}))")
        } else if options.typescript {
            format!("(props: {props_type}) => ({jsx})")
        } else {
            format!("(props) => ({jsx})")
        };

        tracing::debug!("transformed {} for {}", name, self.name());

        match spec.output_mode {
            OutputMode::Inline => Ok(format!("{name}: {component}")),
            OutputMode::Standalone => {
                let declaration = format!("export const {name} = {component};");
                let imports = self.imports(options.typescript, forward_ref);
                Ok(render_standalone(&imports, name, &declaration)?)
            }
        }
    }

    fn icons_template(&self, config: &TemplateConfig) -> Result<String, TransformError> {
        let imports = self.imports(config.typescript, config.forward_ref);
        Ok(render_icons_file(
            &imports,
            &config.collection,
            config.typescript,
        )?)
    }
}
