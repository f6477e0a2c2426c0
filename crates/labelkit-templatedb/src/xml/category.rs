//! `Glabels-categories` documents

use super::{
    bad_node, check_root, document_root, element_children, is_node, prop_i18n_string,
    prop_string, read_file, write_file, Element,
};
use crate::error::XmlResult;
use crate::i18n::Translator;
use crate::model::Category;
use roxmltree::Document;
use std::path::Path;

const ROOT: &str = "Glabels-categories";

pub fn read_categories_from_file(
    path: &Path,
    translator: &dyn Translator,
) -> XmlResult<Vec<Category>> {
    let text = read_file(path)?;
    let doc = Document::parse(&text)?;
    parse_categories_doc(&doc, translator)
}

pub fn parse_categories_doc(
    doc: &Document<'_>,
    translator: &dyn Translator,
) -> XmlResult<Vec<Category>> {
    let root = check_root(doc, ROOT)?;

    let mut categories = Vec::new();
    for node in element_children(root) {
        if !is_node(node, "Category") {
            bad_node(root, node);
            continue;
        }
        match prop_string(node, "id") {
            Some(id) => {
                let name = prop_i18n_string(node, "name", translator).unwrap_or_else(|| id.clone());
                categories.push(Category::new(id, name));
            }
            None => tracing::warn!("Category node without id, skipping"),
        }
    }
    Ok(categories)
}

pub fn write_categories_to_string(categories: &[Category]) -> String {
    let mut root = document_root(ROOT);
    for category in categories {
        root.push(
            Element::new("Category")
                .attr("id", category.id.as_str())
                .attr("name", category.name.as_str()),
        );
    }
    root.to_document()
}

pub fn write_categories_to_file(path: &Path, categories: &[Category]) -> XmlResult<()> {
    write_file(path, &write_categories_to_string(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{MessageCatalog, NoTranslation};

    #[test]
    fn test_parse_categories() {
        let text = r#"<Glabels-categories>
  <Category id="label" _name="Labels"/>
  <Category id="card" name="Cards"/>
  <Paper-size id="A4"/>
</Glabels-categories>"#;
        let doc = Document::parse(text).unwrap();
        let catalog: MessageCatalog = [("Labels".to_string(), "Etiquettes".to_string())]
            .into_iter()
            .collect();

        let categories = parse_categories_doc(&doc, &catalog).unwrap();
        assert_eq!(
            categories,
            vec![Category::new("label", "Etiquettes"), Category::new("card", "Cards")]
        );
    }

    #[test]
    fn test_write_uses_plain_name() {
        let categories = vec![Category::new("mail", "Mailing labels")];
        let text = write_categories_to_string(&categories);
        assert!(text.contains(r#"<Category id="mail" name="Mailing labels"/>"#));
        assert!(!text.contains("_name"));

        let doc = Document::parse(&text).unwrap();
        assert_eq!(parse_categories_doc(&doc, &NoTranslation).unwrap(), categories);
    }
}
