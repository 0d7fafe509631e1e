//! Registry file parser.

use std::ops::Range;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPatternKind, Declaration, Expression, ImportDeclaration, ImportDeclarationSpecifier,
    ImportOrExportKind, ObjectExpression, ObjectPropertyKind, PropertyKey, Statement,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

/// Identifier of the exported collection when none is configured.
pub const DEFAULT_COLLECTION: &str = "Icons";

/// One named entry of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Property key (e.g., "ArrowUp")
    pub name: String,

    /// Byte offset of the key
    pub start: usize,

    /// Byte offset just past the value, excluding any trailing comma
    pub end: usize,

    /// Index of this entry in [`RegistryFile::properties`]
    pub property: usize,
}

/// One top-level import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryImport {
    /// Module specifier (e.g., "react")
    pub module: String,

    /// Local names bound by named value imports
    pub locals: Vec<String>,

    /// Whether this is an `import type` declaration
    pub type_only: bool,

    pub start: usize,
    pub end: usize,
}

impl RegistryImport {
    /// Whether this declaration binds `name` as a value.
    pub fn binds(&self, name: &str) -> bool {
        !self.type_only && self.locals.iter().any(|local| local == name)
    }
}

impl RegistryEntry {
    /// Source text covered by this entry.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A parsed view of a registry file.
///
/// Always derived from the current source text. Any edit produces new text
/// which has to be parsed again before the next edit.
#[derive(Debug, Clone)]
pub struct RegistryFile<'a> {
    /// Text the view was derived from
    pub source: &'a str,

    /// Entries in the order they appear in the text
    pub entries: Vec<RegistryEntry>,

    /// Spans of every property of the collection, including spreads and
    /// keys that are not tracked as entries
    pub properties: Vec<Range<usize>>,

    /// Top-level imports in the order they appear
    pub imports: Vec<RegistryImport>,

    /// Offset of the first statement, or the end of the text if there is none
    pub body_start: usize,

    /// Offset just inside the opening brace of the collection
    pub collection_start: usize,

    /// Offset of the closing brace of the collection
    pub collection_end: usize,
}

impl<'a> RegistryFile<'a> {
    fn empty(source: &'a str, imports: Vec<RegistryImport>, body_start: usize) -> Self {
        Self {
            source,
            entries: Vec::new(),
            properties: Vec::new(),
            imports,
            body_start,
            collection_start: 0,
            collection_end: 0,
        }
    }

    /// Whether the tracked collection was located at all.
    pub fn has_collection(&self) -> bool {
        self.collection_end > 0
    }

    /// Entry names in appearance order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Index of the entry with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Look up an entry by name.
    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check if an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether `name` is imported as a value from `module`.
    pub fn imports_value(&self, name: &str, module: &str) -> bool {
        self.imports
            .iter()
            .any(|import| import.module == module && import.binds(name))
    }
}

/// Errors that can occur with a registry file.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to parse registry: {0}")]
    ParseError(String),

    #[error("Collection `{0}` not found in registry")]
    CollectionNotFound(String),

    #[error("Icons not found in registry: {}", .0.join(", "))]
    NotFound(Vec<String>),
}

/// Parse a TSX registry file and locate the entries of `collection`.
///
/// A file without the collection yields an empty view with both collection
/// offsets at zero. Source that does not parse is an error.
pub fn parse_registry<'a>(
    source: &'a str,
    collection: &str,
) -> Result<RegistryFile<'a>, RegistryError> {
    parse_registry_as(source, collection, SourceType::tsx())
}

/// Parse a registry file with an explicit source type.
///
/// Angle-bracket type assertions only parse in `.ts` sources, where JSX is
/// not available.
pub fn parse_registry_as<'a>(
    source: &'a str,
    collection: &str,
    source_type: SourceType,
) -> Result<RegistryFile<'a>, RegistryError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        return Err(RegistryError::ParseError(messages.join("; ")));
    }

    let body = &ret.program.body;
    let imports: Vec<RegistryImport> = body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::ImportDeclaration(decl) => Some(import_of(decl)),
            _ => None,
        })
        .collect();
    let body_start = body
        .first()
        .map_or(source.len(), |stmt| stmt.span().start as usize);

    let Some(object) = body
        .iter()
        .find_map(|stmt| find_collection(stmt, collection))
    else {
        tracing::debug!("collection `{}` not present in registry", collection);
        return Ok(RegistryFile::empty(source, imports, body_start));
    };

    let mut properties = Vec::with_capacity(object.properties.len());
    let mut entries = Vec::new();
    for (index, property) in object.properties.iter().enumerate() {
        let span = match property {
            ObjectPropertyKind::ObjectProperty(prop) => prop.span,
            ObjectPropertyKind::SpreadProperty(spread) => spread.span,
        };
        properties.push(span.start as usize..span.end as usize);

        if let ObjectPropertyKind::ObjectProperty(prop) = property {
            if let PropertyKey::StaticIdentifier(key) = &prop.key {
                entries.push(RegistryEntry {
                    name: key.name.to_string(),
                    start: span.start as usize,
                    end: span.end as usize,
                    property: index,
                });
            }
        }
    }

    Ok(RegistryFile {
        source,
        entries,
        properties,
        imports,
        body_start,
        collection_start: object.span.start as usize + 1,
        collection_end: object.span.end as usize - 1,
    })
}

fn import_of(decl: &ImportDeclaration<'_>) -> RegistryImport {
    let locals = decl
        .specifiers
        .iter()
        .flat_map(|specifiers| specifiers.iter())
        .filter_map(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(named)
                if !matches!(named.import_kind, ImportOrExportKind::Type) =>
            {
                Some(named.local.name.to_string())
            }
            _ => None,
        })
        .collect();

    RegistryImport {
        module: decl.source.value.to_string(),
        locals,
        type_only: matches!(decl.import_kind, ImportOrExportKind::Type),
        start: decl.span.start as usize,
        end: decl.span.end as usize,
    }
}

/// Match `export const <collection> = { ... }` and return the object literal.
fn find_collection<'b, 'a>(
    stmt: &'b Statement<'a>,
    collection: &str,
) -> Option<&'b ObjectExpression<'a>> {
    let Statement::ExportNamedDeclaration(export) = stmt else {
        return None;
    };
    let Some(Declaration::VariableDeclaration(var_decl)) = &export.declaration else {
        return None;
    };

    var_decl.declarations.iter().find_map(|decl| {
        match &decl.id.kind {
            BindingPatternKind::BindingIdentifier(ident) if ident.name.as_str() == collection => {}
            _ => return None,
        }
        match unwrap_expression(decl.init.as_ref()?) {
            Expression::ObjectExpression(object) => Some(&**object),
            _ => None,
        }
    })
}

/// Strip type assertions and parentheses wrapped around an expression.
fn unwrap_expression<'b, 'a>(mut expr: &'b Expression<'a>) -> &'b Expression<'a> {
    loop {
        expr = match expr {
            Expression::TSAsExpression(e) => &e.expression,
            Expression::TSSatisfiesExpression(e) => &e.expression,
            Expression::TSTypeAssertion(e) => &e.expression,
            Expression::TSNonNullExpression(e) => &e.expression,
            Expression::ParenthesizedExpression(e) => &e.expression,
            _ => return expr,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THREE: &str = r#"import { forwardRef } from "react";

export const Icons = {
  Arrow: (props) => (<svg {...props}><path d="M1" /></svg>),
  Home: (props) => (<svg {...props} />),
  Check: (props) => (<svg strokeWidth="2" {...props} />),
} as const;
"#;

    #[test]
    fn lists_entries_in_appearance_order() {
        let file = parse_registry(THREE, "Icons").unwrap();

        assert_eq!(file.names(), vec!["Arrow", "Home", "Check"]);
    }

    #[test]
    fn records_exact_entry_spans() {
        let file = parse_registry(THREE, "Icons").unwrap();
        let home = file.find("Home").unwrap();

        assert_eq!(home.text(THREE), "Home: (props) => (<svg {...props} />)");
        assert_eq!(&THREE[home.end..home.end + 1], ",");
    }

    #[test]
    fn collection_offsets_sit_inside_braces() {
        let source = "export const Icons = {} as const;\n";
        let file = parse_registry(source, "Icons").unwrap();

        let brace = source.find('{').unwrap();
        assert_eq!(file.collection_start, brace + 1);
        assert_eq!(file.collection_end, brace + 1);
        assert!(file.has_collection());
        assert!(file.entries.is_empty());
    }

    #[test]
    fn unwraps_nested_type_assertions() {
        let source = r#"
type Icon = () => null;
export const Icons = ({
  Bell: () => null,
} as const) satisfies Record<string, Icon>;
"#;
        let file = parse_registry(source, "Icons").unwrap();

        assert_eq!(file.names(), vec!["Bell"]);
    }

    #[test]
    fn skips_spreads_and_non_identifier_keys() {
        let source = r#"
const Base = {};
export const Icons = {
  ...Base,
  "kebab-key": () => null,
  Star: () => null,
};
"#;
        let file = parse_registry(source, "Icons").unwrap();

        assert_eq!(file.names(), vec!["Star"]);
    }

    #[test]
    fn missing_collection_is_empty_result() {
        let source = "export const Other = { A: 1 };\nconst Icons = { B: 2 };\n";
        let file = parse_registry(source, "Icons").unwrap();

        assert!(file.entries.is_empty());
        assert_eq!(file.collection_start, 0);
        assert_eq!(file.collection_end, 0);
        assert!(!file.has_collection());
    }

    #[test]
    fn honours_custom_collection_name() {
        let source = "export const Glyphs = { Dot: () => null };\n";

        assert_eq!(parse_registry(source, "Glyphs").unwrap().names(), vec!["Dot"]);
        assert!(parse_registry(source, "Icons").unwrap().entries.is_empty());
    }

    #[test]
    fn records_spans_of_untracked_properties() {
        let source = "export const Icons = { A: () => null, ...Base, B: () => null };\n";
        let file = parse_registry(source, "Icons").unwrap();

        let spans: Vec<&str> = file.properties.iter().map(|r| &source[r.clone()]).collect();
        assert_eq!(spans, vec!["A: () => null", "...Base", "B: () => null"]);
        assert_eq!(file.find("B").unwrap().property, 2);
    }

    #[test]
    fn unwraps_angle_bracket_assertions_in_ts_sources() {
        let source = "export const Icons = <Record<string, number>>{ A: 1, B: 2 };\n";

        let file = parse_registry_as(source, "Icons", SourceType::ts()).unwrap();
        assert_eq!(file.names(), vec!["A", "B"]);

        assert!(parse_registry(source, "Icons").is_err());
    }

    #[test]
    fn collects_value_and_type_imports() {
        let source = r#"// header
import type { SVGProps } from "react";
import { forwardRef as fr, memo } from "react";

export const Icons = {};
"#;
        let file = parse_registry(source, "Icons").unwrap();

        assert_eq!(file.imports.len(), 2);
        assert!(file.imports[0].type_only);
        assert_eq!(file.imports[1].locals, vec!["fr", "memo"]);
        assert!(file.imports_value("memo", "react"));
        assert!(!file.imports_value("SVGProps", "react"));
        assert!(!file.imports_value("memo", "preact"));
        assert_eq!(file.body_start, source.find("import").unwrap());
    }

    #[test]
    fn errors_on_malformed_source() {
        let result = parse_registry("export const Icons = {\n  A: (", "Icons");

        assert!(matches!(result, Err(RegistryError::ParseError(_))));
    }
}
