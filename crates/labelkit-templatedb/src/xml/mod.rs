//! XML codec for paper, category, vendor and template files
//!
//! Reading goes through `roxmltree`; writing builds a small [`Element`] tree
//! and renders it with two-space indentation. Lengths are read with an
//! optional unit suffix and written in the units given by
//! [`XmlWriteOptions`].

pub mod category;
pub mod paper;
pub mod template;
pub mod vendor;

use crate::error::{XmlError, XmlResult};
use crate::i18n::Translator;
use labelkit_core::{format_length, parse_length, Units, UnitsError};
use roxmltree::Node;
use std::fmt::Write as _;
use std::path::Path;

pub use category::{
    parse_categories_doc, read_categories_from_file, write_categories_to_file,
    write_categories_to_string,
};
pub use paper::{parse_papers_doc, read_papers_from_file, write_papers_to_file, write_papers_to_string};
pub use template::{
    parse_templates_doc, read_templates_from_file, write_template_to_file,
    write_templates_to_file, write_templates_to_string, TemplateParseContext,
};
pub use vendor::{parse_vendors_doc, read_vendors_from_file, write_vendors_to_file, write_vendors_to_string};

/// Namespace written on every document root.
pub const NAMESPACE: &str = "http://snaught.com/glabels/2.2/";

/// Options applied when writing lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XmlWriteOptions {
    pub units: Units,
}

impl XmlWriteOptions {
    pub fn new(units: Units) -> Self {
        Self { units }
    }
}

pub(crate) fn read_file(path: &Path) -> XmlResult<String> {
    std::fs::read_to_string(path).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> XmlResult<()> {
    std::fs::write(path, content).map_err(|source| XmlError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail unless the document root is the element `expected`.
pub(crate) fn check_root<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    expected: &'static str,
) -> XmlResult<Node<'a, 'input>> {
    let root = doc.root_element();
    if root.tag_name().name() != expected {
        return Err(XmlError::WrongRoot {
            expected,
            found: root.tag_name().name().to_string(),
        });
    }
    Ok(root)
}

pub(crate) fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

pub(crate) fn is_node(node: Node<'_, '_>, name: &str) -> bool {
    node.tag_name().name() == name
}

pub fn prop_string(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

/// Localizable attribute: `_name` is translated and preferred over `name`.
pub fn prop_i18n_string(
    node: Node<'_, '_>,
    name: &str,
    translator: &dyn Translator,
) -> Option<String> {
    let localized = format!("_{}", name);
    match node.attribute(localized.as_str()) {
        Some(msgid) => Some(translator.translate(msgid)),
        None => prop_string(node, name),
    }
}

pub fn prop_f64(node: Node<'_, '_>, name: &str, default: f64) -> f64 {
    match node.attribute(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(node = node.tag_name().name(), attribute = name, value = raw, "bad number");
            default
        }),
    }
}

pub fn prop_bool(node: Node<'_, '_>, name: &str, default: bool) -> bool {
    match node.attribute(name) {
        None => default,
        Some(raw) => !matches!(raw.trim(), "false" | "False" | "FALSE" | "0"),
    }
}

pub fn prop_int(node: Node<'_, '_>, name: &str, default: i64) -> i64 {
    match node.attribute(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(node = node.tag_name().name(), attribute = name, value = raw, "bad integer");
            default
        }),
    }
}

/// Unsigned integer that must be at least one.
pub fn prop_count(node: Node<'_, '_>, name: &str) -> u32 {
    let value = prop_int(node, name, 1);
    match u32::try_from(value) {
        Ok(count) if count > 0 => count,
        _ => {
            tracing::warn!(node = node.tag_name().name(), attribute = name, value, "count must be positive, using 1");
            1
        }
    }
}

/// Length attribute in points. An unknown unit is logged and the bare
/// number taken as points.
pub fn prop_length(node: Node<'_, '_>, name: &str, default: f64) -> f64 {
    match node.attribute(name) {
        None => default,
        Some(raw) => match parse_length(raw) {
            Ok(points) => points,
            Err(UnitsError::UnknownUnit { value, unit }) => {
                tracing::warn!(node = node.tag_name().name(), attribute = name, unit = %unit, "unknown unit, assuming points");
                value
            }
        },
    }
}

pub(crate) fn bad_node(parent: Node<'_, '_>, node: Node<'_, '_>) {
    tracing::warn!(
        parent = parent.tag_name().name(),
        node = node.tag_name().name(),
        "skipping unexpected node"
    );
}

/// An XML element under construction.
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push((name.to_string(), value.into()));
    }

    pub fn set_length(&mut self, name: &str, points: f64, options: XmlWriteOptions) {
        self.set_attr(name, format_length(points, options.units));
    }

    pub fn length(mut self, name: &str, points: f64, options: XmlWriteOptions) -> Self {
        self.set_length(name, points, options);
        self
    }

    pub fn set_int(&mut self, name: &str, value: i64) {
        self.set_attr(name, value.to_string());
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.set_attr(name, if value { "true" } else { "false" });
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Serialize as a standalone document.
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        self.render(&mut out, 0);
        out
    }

    fn render(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            child.render(out, depth + 1);
        }
        let _ = writeln!(out, "{}</{}>", indent, self.name);
    }
}

pub(crate) fn document_root(name: &str) -> Element {
    Element::new(name).attr("xmlns", NAMESPACE)
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
