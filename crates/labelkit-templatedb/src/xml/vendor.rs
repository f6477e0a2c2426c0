//! `Glabels-vendors` documents

use super::{
    bad_node, check_root, document_root, element_children, is_node, prop_i18n_string, read_file,
    write_file, Element,
};
use crate::error::XmlResult;
use crate::i18n::Translator;
use crate::model::Vendor;
use roxmltree::Document;
use std::path::Path;

const ROOT: &str = "Glabels-vendors";

pub fn read_vendors_from_file(path: &Path, translator: &dyn Translator) -> XmlResult<Vec<Vendor>> {
    let text = read_file(path)?;
    let doc = Document::parse(&text)?;
    parse_vendors_doc(&doc, translator)
}

pub fn parse_vendors_doc(doc: &Document<'_>, translator: &dyn Translator) -> XmlResult<Vec<Vendor>> {
    let root = check_root(doc, ROOT)?;

    let mut vendors = Vec::new();
    for node in element_children(root) {
        if !is_node(node, "Vendor") {
            bad_node(root, node);
            continue;
        }
        match prop_i18n_string(node, "name", translator) {
            Some(name) => vendors.push(Vendor {
                name,
                url: prop_i18n_string(node, "url", translator),
            }),
            None => tracing::warn!("Vendor node without name, skipping"),
        }
    }
    Ok(vendors)
}

pub fn write_vendors_to_string(vendors: &[Vendor]) -> String {
    let mut root = document_root(ROOT);
    for vendor in vendors {
        let mut node = Element::new("Vendor").attr("name", vendor.name.as_str());
        if let Some(url) = &vendor.url {
            node.set_attr("url", url.as_str());
        }
        root.push(node);
    }
    root.to_document()
}

pub fn write_vendors_to_file(path: &Path, vendors: &[Vendor]) -> XmlResult<()> {
    write_file(path, &write_vendors_to_string(vendors))
}
