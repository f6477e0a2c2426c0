//! `Glabels-templates` documents
//!
//! Template parsing needs the paper list to resolve page sizes and the
//! templates already loaded to resolve `equiv` references, so it runs
//! against a [`TemplateParseContext`].

use super::{
    bad_node, check_root, document_root, element_children, is_node, prop_count,
    prop_i18n_string, prop_length, prop_string, read_file, write_file, Element, XmlWriteOptions,
};
use crate::error::XmlResult;
use crate::i18n::Translator;
use crate::model::{
    is_other_paper_id, Frame, FrameShape, Layout, Markup, Paper, Template, TemplateAlias,
    CATEGORY_ID_USER_DEFINED,
};
use labelkit_core::utf8_eq;
use roxmltree::{Document, Node};
use std::path::Path;

const ROOT: &str = "Glabels-templates";

/// Page size used when a template names a paper nobody knows.
const FALLBACK_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// What the template parser may consult.
#[derive(Clone, Copy)]
pub struct TemplateParseContext<'a> {
    /// Known paper sizes, for resolving `size`
    pub papers: &'a [Paper],
    /// Previously loaded templates, for resolving `equiv`
    pub known: &'a [Template],
    pub translator: &'a dyn Translator,
}

impl<'a> TemplateParseContext<'a> {
    pub fn new(papers: &'a [Paper], known: &'a [Template], translator: &'a dyn Translator) -> Self {
        Self {
            papers,
            known,
            translator,
        }
    }

    fn paper(&self, id_or_name: &str) -> Option<&'a Paper> {
        self.papers
            .iter()
            .find(|p| p.id == id_or_name)
            .or_else(|| {
                tracing::debug!(size = id_or_name, "unknown paper id, trying as name");
                self.papers.iter().find(|p| utf8_eq(&p.name, id_or_name))
            })
    }
}

pub fn read_templates_from_file(
    path: &Path,
    ctx: TemplateParseContext<'_>,
) -> XmlResult<Vec<Template>> {
    let text = read_file(path)?;
    let doc = Document::parse(&text)?;
    parse_templates_doc(&doc, ctx)
}

pub fn parse_templates_doc(
    doc: &Document<'_>,
    ctx: TemplateParseContext<'_>,
) -> XmlResult<Vec<Template>> {
    let root = check_root(doc, ROOT)?;

    let mut templates: Vec<Template> = Vec::new();
    for node in element_children(root) {
        if !is_node(node, "Template") {
            bad_node(root, node);
            continue;
        }
        if let Some(template) = parse_template_node(node, ctx, &templates) {
            templates.push(template);
        }
    }
    Ok(templates)
}

fn brand_and_part(node: Node<'_, '_>) -> Option<(String, String)> {
    if let (Some(brand), Some(part)) = (prop_string(node, "brand"), prop_string(node, "part")) {
        return Some((brand, part));
    }
    let name = prop_string(node, "name")?;
    match name.split_once(' ') {
        Some((brand, part)) => Some((brand.to_string(), part.trim_start().to_string())),
        None => Some((name, String::new())),
    }
}

fn find_equiv(
    brand: &str,
    part: &str,
    ctx: TemplateParseContext<'_>,
    local: &[Template],
) -> Option<Template> {
    ctx.known
        .iter()
        .chain(local.iter())
        .find_map(|t| {
            t.aliases()
                .iter()
                .find(|a| a.matches(brand, part))
                .map(|alias| t.as_alias(alias))
        })
}

fn parse_template_node(
    node: Node<'_, '_>,
    ctx: TemplateParseContext<'_>,
    local: &[Template],
) -> Option<Template> {
    let Some((brand, part)) = brand_and_part(node) else {
        tracing::warn!("Template node without name or brand/part, skipping");
        return None;
    };

    let mut template = match prop_string(node, "equiv") {
        Some(equiv_part) => {
            let Some(mut template) = find_equiv(&brand, &equiv_part, ctx, local) else {
                tracing::warn!(
                    brand = %brand,
                    part = %part,
                    equiv = %equiv_part,
                    "equivalent part not previously defined, skipping"
                );
                return None;
            };
            template.set_brand_part(brand, part);
            template.equiv_part = Some(equiv_part);
            template.categories.retain(|c| c != CATEGORY_ID_USER_DEFINED);
            template
        }
        None => {
            let description =
                prop_i18n_string(node, "description", ctx.translator).unwrap_or_default();
            let mut paper_id = prop_string(node, "size").unwrap_or_default();

            let (page_width, page_height) = if is_other_paper_id(&paper_id) {
                (prop_length(node, "width", 0.0), prop_length(node, "height", 0.0))
            } else if let Some(paper) = ctx.paper(&paper_id) {
                paper_id = paper.id.clone();
                (paper.width, paper.height)
            } else {
                tracing::warn!(size = %paper_id, "unknown page size id or name");
                FALLBACK_PAGE_SIZE
            };

            Template::new(brand, part, description, paper_id, page_width, page_height)
        }
    };

    for child in element_children(node) {
        match child.tag_name().name() {
            "Meta" => parse_meta_node(child, &mut template),
            "Label-rectangle" | "Label-ellipse" | "Label-round" | "Label-cd" => {
                template.add_frame(parse_label_node(child));
            }
            "Alias" => parse_alias_node(child, &mut template),
            _ => bad_node(node, child),
        }
    }

    if template.frames.is_empty() {
        tracing::warn!(template = %template.name(), "no label frame, using a full page rectangle");
        let mut frame = Frame::rect("0", template.page_width, template.page_height, 0.0, 0.0, 0.0);
        frame.add_layout(Layout::single());
        template.add_frame(frame);
    }

    Some(template)
}

fn parse_meta_node(node: Node<'_, '_>, template: &mut Template) {
    if let Some(product_url) = prop_string(node, "product_url") {
        template.product_url = Some(product_url);
    }
    if let Some(category) = prop_string(node, "category") {
        template.add_category(category);
    }
}

fn parse_alias_node(node: Node<'_, '_>, template: &mut Template) {
    match brand_and_part(node) {
        Some((brand, part)) => template.add_alias(TemplateAlias::new(brand, part)),
        None => tracing::warn!(template = %template.name(), "Alias node without name, skipping"),
    }
}

fn parse_label_node(node: Node<'_, '_>) -> Frame {
    let id = prop_string(node, "id").unwrap_or_else(|| "0".to_string());

    let shape = match node.tag_name().name() {
        "Label-rectangle" => {
            let (x_waste, y_waste) = if node.attribute("waste").is_some() {
                let waste = prop_length(node, "waste", 0.0);
                (waste, waste)
            } else {
                (prop_length(node, "x_waste", 0.0), prop_length(node, "y_waste", 0.0))
            };
            FrameShape::Rect {
                width: prop_length(node, "width", 0.0),
                height: prop_length(node, "height", 0.0),
                corner_radius: prop_length(node, "round", 0.0),
                x_waste,
                y_waste,
            }
        }
        "Label-ellipse" => FrameShape::Ellipse {
            width: prop_length(node, "width", 0.0),
            height: prop_length(node, "height", 0.0),
            waste: prop_length(node, "waste", 0.0),
        },
        "Label-round" => FrameShape::Round {
            radius: prop_length(node, "radius", 0.0),
            waste: prop_length(node, "waste", 0.0),
        },
        _ => FrameShape::Cd {
            outer_radius: prop_length(node, "radius", 0.0),
            inner_hole_radius: prop_length(node, "hole", 0.0),
            clip_width: prop_length(node, "width", 0.0),
            clip_height: prop_length(node, "height", 0.0),
            waste: prop_length(node, "waste", 0.0),
        },
    };

    let mut frame = Frame::new(id, shape);
    for child in element_children(node) {
        match child.tag_name().name() {
            "Layout" => frame.add_layout(parse_layout_node(child)),
            "Markup-margin" => frame.add_markup(Markup::Margin {
                size: prop_length(child, "size", 0.0),
            }),
            "Markup-line" => frame.add_markup(Markup::Line {
                x1: prop_length(child, "x1", 0.0),
                y1: prop_length(child, "y1", 0.0),
                x2: prop_length(child, "x2", 0.0),
                y2: prop_length(child, "y2", 0.0),
            }),
            "Markup-circle" => frame.add_markup(Markup::Circle {
                x0: prop_length(child, "x0", 0.0),
                y0: prop_length(child, "y0", 0.0),
                r: prop_length(child, "radius", 0.0),
            }),
            "Markup-rect" => frame.add_markup(Markup::Rect {
                x1: prop_length(child, "x1", 0.0),
                y1: prop_length(child, "y1", 0.0),
                w: prop_length(child, "w", 0.0),
                h: prop_length(child, "h", 0.0),
                r: prop_length(child, "r", 0.0),
            }),
            "Markup-ellipse" => frame.add_markup(Markup::Ellipse {
                x1: prop_length(child, "x1", 0.0),
                y1: prop_length(child, "y1", 0.0),
                w: prop_length(child, "w", 0.0),
                h: prop_length(child, "h", 0.0),
            }),
            _ => bad_node(node, child),
        }
    }

    if frame.layouts.is_empty() {
        tracing::warn!(frame = %frame.id, "frame has no layout, using a single label");
        frame.add_layout(Layout::single());
    }

    frame
}

fn parse_layout_node(node: Node<'_, '_>) -> Layout {
    Layout::new(
        prop_count(node, "nx"),
        prop_count(node, "ny"),
        prop_length(node, "x0", 0.0),
        prop_length(node, "y0", 0.0),
        prop_length(node, "dx", 0.0),
        prop_length(node, "dy", 0.0),
    )
}

fn template_element(template: &Template, options: XmlWriteOptions) -> Element {
    let mut node = Element::new("Template")
        .attr("brand", template.brand())
        .attr("part", template.part())
        .attr("size", template.paper_id.as_str());
    if is_other_paper_id(&template.paper_id) {
        node.set_length("width", template.page_width, options);
        node.set_length("height", template.page_height, options);
    }
    node.set_attr("description", template.description.as_str());

    if let Some(product_url) = &template.product_url {
        node.push(Element::new("Meta").attr("product_url", product_url.as_str()));
    }
    for category in &template.categories {
        node.push(Element::new("Meta").attr("category", category.as_str()));
    }
    for alias in template.aliases().iter().skip(1) {
        node.push(Element::new("Alias").attr("name", alias.name()));
    }
    for frame in &template.frames {
        node.push(label_element(frame, options));
    }
    node
}

fn label_element(frame: &Frame, options: XmlWriteOptions) -> Element {
    let mut node = match frame.shape {
        FrameShape::Rect {
            width,
            height,
            corner_radius,
            x_waste,
            y_waste,
        } => Element::new("Label-rectangle")
            .attr("id", frame.id.as_str())
            .length("width", width, options)
            .length("height", height, options)
            .length("round", corner_radius, options)
            .length("x_waste", x_waste, options)
            .length("y_waste", y_waste, options),
        FrameShape::Ellipse {
            width,
            height,
            waste,
        } => Element::new("Label-ellipse")
            .attr("id", frame.id.as_str())
            .length("width", width, options)
            .length("height", height, options)
            .length("waste", waste, options),
        FrameShape::Round { radius, waste } => Element::new("Label-round")
            .attr("id", frame.id.as_str())
            .length("radius", radius, options)
            .length("waste", waste, options),
        FrameShape::Cd {
            outer_radius,
            inner_hole_radius,
            clip_width,
            clip_height,
            waste,
        } => {
            let mut node = Element::new("Label-cd")
                .attr("id", frame.id.as_str())
                .length("radius", outer_radius, options)
                .length("hole", inner_hole_radius, options);
            if clip_width != 0.0 {
                node.set_length("width", clip_width, options);
            }
            if clip_height != 0.0 {
                node.set_length("height", clip_height, options);
            }
            node.length("waste", waste, options)
        }
    };

    for markup in &frame.markups {
        node.push(markup_element(markup, options));
    }
    for layout in &frame.layouts {
        let mut child = Element::new("Layout");
        child.set_int("nx", i64::from(layout.nx));
        child.set_int("ny", i64::from(layout.ny));
        node.push(
            child
                .length("x0", layout.x0, options)
                .length("y0", layout.y0, options)
                .length("dx", layout.dx, options)
                .length("dy", layout.dy, options),
        );
    }
    node
}

fn markup_element(markup: &Markup, options: XmlWriteOptions) -> Element {
    match *markup {
        Markup::Margin { size } => Element::new("Markup-margin").length("size", size, options),
        Markup::Line { x1, y1, x2, y2 } => Element::new("Markup-line")
            .length("x1", x1, options)
            .length("y1", y1, options)
            .length("x2", x2, options)
            .length("y2", y2, options),
        Markup::Circle { x0, y0, r } => Element::new("Markup-circle")
            .length("x0", x0, options)
            .length("y0", y0, options)
            .length("radius", r, options),
        Markup::Rect { x1, y1, w, h, r } => Element::new("Markup-rect")
            .length("x1", x1, options)
            .length("y1", y1, options)
            .length("w", w, options)
            .length("h", h, options)
            .length("r", r, options),
        Markup::Ellipse { x1, y1, w, h } => Element::new("Markup-ellipse")
            .length("x1", x1, options)
            .length("y1", y1, options)
            .length("w", w, options)
            .length("h", h, options),
    }
}

pub fn write_templates_to_string(templates: &[Template], options: XmlWriteOptions) -> String {
    let mut root = document_root(ROOT);
    for template in templates {
        root.push(template_element(template, options));
    }
    root.to_document()
}

pub fn write_templates_to_file(
    path: &Path,
    templates: &[Template],
    options: XmlWriteOptions,
) -> XmlResult<()> {
    write_file(path, &write_templates_to_string(templates, options))
}

pub fn write_template_to_file(
    path: &Path,
    template: &Template,
    options: XmlWriteOptions,
) -> XmlResult<()> {
    write_templates_to_file(path, std::slice::from_ref(template), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::NoTranslation;
    use labelkit_core::Units;

    fn papers() -> Vec<Paper> {
        vec![
            Paper::new("US-Letter", "US Letter", 612.0, 792.0),
            Paper::new("A4", "A4", 595.0, 842.0),
        ]
    }

    fn parse(text: &str, papers: &[Paper], known: &[Template]) -> Vec<Template> {
        let doc = Document::parse(text).unwrap();
        parse_templates_doc(&doc, TemplateParseContext::new(papers, known, &NoTranslation)).unwrap()
    }

    #[test]
    fn test_parse_rectangle_template() {
        let text = r#"<Glabels-templates>
  <Template brand="Avery" part="5160" size="US-Letter" _description="Address labels">
    <Meta category="label"/>
    <Meta category="mail"/>
    <Meta product_url="http://www.avery.com/5160"/>
    <Label-rectangle id="0" width="2.625in" height="1in" round="0.0625in" waste="0.0625in">
      <Markup-margin size="0.0625in"/>
      <Layout nx="3" ny="10" x0="0.1875in" y0="0.5in" dx="2.75in" dy="1in"/>
    </Label-rectangle>
    <Alias brand="Avery" part="8160"/>
    <Alias name="Maco LL5805"/>
  </Template>
</Glabels-templates>"#;
        let papers = papers();
        let templates = parse(text, &papers, &[]);
        assert_eq!(templates.len(), 1);

        let t = &templates[0];
        assert_eq!(t.name(), "Avery 5160");
        assert_eq!(t.description, "Address labels");
        assert_eq!((t.page_width, t.page_height), (612.0, 792.0));
        assert_eq!(t.categories, vec!["label", "mail"]);
        assert_eq!(t.product_url.as_deref(), Some("http://www.avery.com/5160"));
        assert_eq!(
            t.aliases(),
            &[
                TemplateAlias::new("Avery", "5160"),
                TemplateAlias::new("Avery", "8160"),
                TemplateAlias::new("Maco", "LL5805"),
            ]
        );

        let frame = t.first_frame().unwrap();
        assert_eq!(
            frame.shape,
            FrameShape::Rect {
                width: 189.0,
                height: 72.0,
                corner_radius: 4.5,
                x_waste: 4.5,
                y_waste: 4.5,
            }
        );
        assert_eq!(frame.layouts, vec![Layout::new(3, 10, 13.5, 36.0, 198.0, 72.0)]);
        assert_eq!(frame.label_count(), 30);
    }

    #[test]
    fn test_name_attribute_and_paper_name() {
        let text = r#"<Glabels-templates>
  <Template name="Herma  4226" size="US Letter" description="by name">
    <Label-round id="0" radius="36pt"><Layout nx="2" ny="2" x0="0" y0="0" dx="80" dy="80"/></Label-round>
  </Template>
  <Template brand="Acme" part="X" size="Tabloid" description="unknown size">
    <Label-cd id="0" radius="166" hole="58" width="250"/>
  </Template>
</Glabels-templates>"#;
        let papers = papers();
        let templates = parse(text, &papers, &[]);

        assert_eq!(templates[0].brand(), "Herma");
        assert_eq!(templates[0].part(), "4226");
        assert_eq!(templates[0].paper_id, "US-Letter");

        assert_eq!(templates[1].paper_id, "Tabloid");
        assert_eq!((templates[1].page_width, templates[1].page_height), (612.0, 792.0));
        let frame = templates[1].first_frame().unwrap();
        assert_eq!(frame.size(), (250.0, 332.0));
        assert_eq!(frame.layouts, vec![Layout::single()]);
    }

    #[test]
    fn test_other_size_and_missing_frame() {
        let text = r#"<Glabels-templates>
  <Template brand="Custom" part="Sheet" size="Other" width="4in" height="6in" description="">
    <Label-hexagon id="0"/>
  </Template>
</Glabels-templates>"#;
        let templates = parse(text, &papers(), &[]);
        let t = &templates[0];
        assert_eq!((t.page_width, t.page_height), (288.0, 432.0));

        let frame = t.first_frame().unwrap();
        assert_eq!(frame.size(), (288.0, 432.0));
        assert_eq!(frame.label_count(), 1);
    }

    #[test]
    fn test_equiv_template() {
        let text = r#"<Glabels-templates>
  <Template brand="Avery" part="5160" size="US-Letter" description="Address labels">
    <Meta category="label"/>
    <Label-rectangle id="0" width="189" height="72" round="4.5" x_waste="0" y_waste="0">
      <Layout nx="3" ny="10" x0="13.5" y0="36" dx="198" dy="72"/>
    </Label-rectangle>
    <Alias brand="Avery" part="8160"/>
  </Template>
  <Template brand="Avery" part="5260" equiv="5160">
    <Meta category="mail"/>
  </Template>
  <Template brand="Avery" part="9999" equiv="1234"/>
</Glabels-templates>"#;
        let templates = parse(text, &papers(), &[]);
        assert_eq!(templates.len(), 2);

        let equiv = &templates[1];
        assert_eq!(equiv.name(), "Avery 5260");
        assert_eq!(equiv.equiv_part.as_deref(), Some("5160"));
        assert_eq!(equiv.aliases(), &[TemplateAlias::new("Avery", "5260")]);
        assert_eq!(equiv.categories, vec!["label", "mail"]);
        assert!(equiv.is_similar_to(&templates[0]));
    }

    #[test]
    fn test_write_layout() {
        let mut template = Template::new("Acme", "CD-1", "Disc & case", "A4", 595.0, 842.0);
        let mut frame = Frame::cd("0", 166.5, 58.5, 0.0, 0.0, 0.0);
        frame.add_layout(Layout::new(1, 2, 131.0, 57.0, 0.0, 396.0));
        template.add_frame(frame);

        let text = write_templates_to_string(&[template], XmlWriteOptions::default());
        assert_eq!(
            text,
            "<?xml version=\"1.0\"?>\n\
             <Glabels-templates xmlns=\"http://snaught.com/glabels/2.2/\">\n  \
             <Template brand=\"Acme\" part=\"CD-1\" size=\"A4\" description=\"Disc &amp; case\">\n    \
             <Label-cd id=\"0\" radius=\"166.5pt\" hole=\"58.5pt\" waste=\"0pt\">\n      \
             <Layout nx=\"1\" ny=\"2\" x0=\"131pt\" y0=\"57pt\" dx=\"0pt\" dy=\"396pt\"/>\n    \
             </Label-cd>\n  \
             </Template>\n\
             </Glabels-templates>\n"
        );
    }

    #[test]
    fn test_write_aliases_by_name() {
        let mut template = Template::new("Avery", "5160", "", "US-Letter", 612.0, 792.0);
        template.add_alias(TemplateAlias::new("Avery", "8160"));
        template.add_alias(TemplateAlias::new("Maco", "LL5805"));
        template.add_frame(Frame::round("0", 36.0, 0.0));

        let text = write_templates_to_string(&[template.clone()], XmlWriteOptions::default());
        assert!(text.contains(r#"<Alias name="Avery 8160"/>"#));
        assert!(text.contains(r#"<Alias name="Maco LL5805"/>"#));
        assert!(!text.contains(r#"<Alias name="Avery 5160"/>"#));

        let doc = Document::parse(&text).unwrap();
        let back = parse_templates_doc(&doc, TemplateParseContext::new(&papers(), &[], &NoTranslation)).unwrap();
        assert_eq!(back[0].aliases(), template.aliases());
    }

    #[test]
    fn test_write_inches() {
        let mut template = Template::new("Acme", "1", "", "Other", 72.0, 144.0);
        template.add_frame(Frame::round("0", 36.0, 0.0));
        let text = write_templates_to_string(&[template], XmlWriteOptions::new(Units::Inch));
        assert!(text.contains(r#"size="Other" width="1in" height="2in""#));
        assert!(text.contains(r#"radius="0.5in""#));
    }
}
