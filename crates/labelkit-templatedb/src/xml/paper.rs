//! `Glabels-paper-sizes` documents

use super::{
    bad_node, check_root, document_root, element_children, is_node, prop_i18n_string,
    prop_length, prop_string, read_file, write_file, Element, XmlWriteOptions,
};
use crate::error::XmlResult;
use crate::i18n::Translator;
use crate::model::Paper;
use roxmltree::{Document, Node};
use std::path::Path;

const ROOT: &str = "Glabels-paper-sizes";

/// Read every paper size defined in `path`.
pub fn read_papers_from_file(path: &Path, translator: &dyn Translator) -> XmlResult<Vec<Paper>> {
    let text = read_file(path)?;
    let doc = Document::parse(&text)?;
    parse_papers_doc(&doc, translator)
}

pub fn parse_papers_doc(doc: &Document<'_>, translator: &dyn Translator) -> XmlResult<Vec<Paper>> {
    let root = check_root(doc, ROOT)?;

    let mut papers = Vec::new();
    for node in element_children(root) {
        if is_node(node, "Paper-size") {
            if let Some(paper) = parse_paper_node(node, translator) {
                papers.push(paper);
            }
        } else {
            bad_node(root, node);
        }
    }
    Ok(papers)
}

fn parse_paper_node(node: Node<'_, '_>, translator: &dyn Translator) -> Option<Paper> {
    let Some(id) = prop_string(node, "id") else {
        tracing::warn!("Paper-size node without id, skipping");
        return None;
    };
    let name = prop_i18n_string(node, "name", translator).unwrap_or_else(|| id.clone());
    let width = prop_length(node, "width", 0.0);
    let height = prop_length(node, "height", 0.0);

    let mut paper = Paper::new(id, name, width, height);
    if let Some(pwg_size) = prop_string(node, "pwg_size") {
        paper = paper.with_pwg_size(pwg_size);
    }
    Some(paper)
}

fn paper_element(paper: &Paper, options: XmlWriteOptions) -> Element {
    let mut node = Element::new("Paper-size")
        .attr("id", paper.id.as_str())
        .attr("name", paper.name.as_str())
        .length("width", paper.width, options)
        .length("height", paper.height, options);
    if let Some(pwg_size) = &paper.pwg_size {
        node.set_attr("pwg_size", pwg_size.as_str());
    }
    node
}

pub fn write_papers_to_string(papers: &[Paper], options: XmlWriteOptions) -> String {
    let mut root = document_root(ROOT);
    for paper in papers {
        root.push(paper_element(paper, options));
    }
    root.to_document()
}

pub fn write_papers_to_file(path: &Path, papers: &[Paper], options: XmlWriteOptions) -> XmlResult<()> {
    write_file(path, &write_papers_to_string(papers, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XmlError;
    use crate::i18n::{MessageCatalog, NoTranslation};
    use labelkit_core::Units;

    const PAPER_SIZES: &str = r#"<?xml version="1.0"?>
<Glabels-paper-sizes>
  <!-- North American -->
  <Paper-size id="US-Letter" _name="US Letter" width="8.5in" height="11in" pwg_size="na_letter_8.5x11in"/>
  <Paper-size id="A4" _name="A4" width="210mm" height="297mm"/>
  <Paper-size _name="Nameless"/>
  <Sheet id="bogus"/>
</Glabels-paper-sizes>
"#;

    #[test]
    fn test_parse_paper_sizes() {
        let doc = Document::parse(PAPER_SIZES).unwrap();
        let mut catalog = MessageCatalog::new();
        catalog.insert("US Letter", "Lettre US");

        let papers = parse_papers_doc(&doc, &catalog).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].id, "US-Letter");
        assert_eq!(papers[0].name, "Lettre US");
        assert_eq!(papers[0].width, 612.0);
        assert_eq!(papers[0].height, 792.0);
        assert_eq!(papers[0].pwg_size.as_deref(), Some("na_letter_8.5x11in"));
        assert_eq!(papers[1].id, "A4");
        assert!((papers[1].width - 595.2756).abs() < 1e-3);
        assert_eq!(papers[1].pwg_size, None);
    }

    #[test]
    fn test_wrong_root() {
        let doc = Document::parse("<Glabels-categories/>").unwrap();
        assert!(matches!(
            parse_papers_doc(&doc, &NoTranslation),
            Err(XmlError::WrongRoot { expected: "Glabels-paper-sizes", .. })
        ));
    }

    #[test]
    fn test_write_and_read_back() {
        let papers = vec![
            Paper::new("US-Letter", "US Letter", 612.0, 792.0).with_pwg_size("na_letter_8.5x11in"),
            Paper::new("Index-4x6", "4 x 6", 288.0, 432.0),
        ];
        let text = write_papers_to_string(&papers, XmlWriteOptions::new(Units::Inch));
        assert!(text.contains(r#"width="8.5in""#));

        let doc = Document::parse(&text).unwrap();
        assert_eq!(parse_papers_doc(&doc, &NoTranslation).unwrap(), papers);
    }
}
