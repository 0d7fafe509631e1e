//! Whole-file generation: empty registries and standalone component files.

use minijinja::{context, Environment};
use std::sync::LazyLock;

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("icons", ICONS_TEMPLATE)
        .expect("Invalid icons template");
    env.add_template("standalone", STANDALONE_TEMPLATE)
        .expect("Invalid standalone template");
    env
});

const ICONS_TEMPLATE: &str = r#"// Generated by iconsmith. Entries are kept in alphabetical order.
{% for line in imports %}{{ line }}
{% endfor %}
export const {{ collection }} = {}{% if typescript %} as const{% endif %};
"#;

const STANDALONE_TEMPLATE: &str = r#"{% for line in imports %}{{ line }}
{% endfor %}{% if imports %}
{% endif %}{{ declaration }}

export default {{ name }};
"#;

/// Render an empty registry exporting `collection`.
pub fn render_icons_file(
    imports: &[String],
    collection: &str,
    typescript: bool,
) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template("icons")?.render(context! {
        imports => imports,
        collection => collection,
        typescript => typescript,
    })
}

/// Render a file holding one exported component.
pub fn render_standalone(
    imports: &[String],
    name: &str,
    declaration: &str,
) -> Result<String, minijinja::Error> {
    TEMPLATES.get_template("standalone")?.render(context! {
        imports => imports,
        name => name,
        declaration => declaration,
    })
}

/// Convert kebab-case, snake_case or path-like names to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_', ' ', ':', '/', '.'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Component identifier for an icon name: `arrow-up` -> `ArrowUp`.
///
/// Names starting with a digit get an `Icon` prefix.
pub fn component_name(icon_name: &str) -> String {
    let name = to_pascal_case(icon_name);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Icon{name}")
    } else {
        name
    }
}
