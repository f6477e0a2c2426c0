mod common;

use common::assert_close;
use labelkit_core::Units;
use labelkit_templatedb::xml::{
    read_templates_from_file, write_template_to_file, write_templates_to_string,
};
use labelkit_templatedb::{
    Frame, FrameShape, Layout, Markup, NoTranslation, Paper, Template, TemplateAlias,
    TemplateParseContext, XmlWriteOptions,
};
use tempfile::TempDir;

fn papers() -> Vec<Paper> {
    vec![Paper::new("US-Letter", "US Letter", 612.0, 792.0)]
}

/// Two aliases besides the primary name, two layouts and a line markup.
fn sample() -> Template {
    let mut template = Template::new("Acme", "2L", "Two grids", "US-Letter", 612.0, 792.0);
    template.add_alias(TemplateAlias::new("Acme", "2L-B"));
    template.add_alias(TemplateAlias::new("Maco", "M-2"));
    template.add_alias(TemplateAlias::new("Acme", "2L"));
    template.add_category("label");
    template.product_url = Some("https://example.com/acme/2l?a=1&b=2".to_string());

    let mut frame = Frame::rect("0", 180.0, 90.0, 4.5, 1.5, 2.25);
    frame.add_layout(Layout::new(3, 4, 18.0, 36.0, 198.0, 180.0));
    frame.add_layout(Layout::new(3, 4, 18.0, 126.0, 198.0, 180.0));
    frame.add_markup(Markup::Line {
        x1: 0.0,
        y1: 45.0,
        x2: 180.0,
        y2: 45.0,
    });
    template.add_frame(frame);
    template
}

fn read_back(path: &std::path::Path) -> Vec<Template> {
    let papers = papers();
    read_templates_from_file(path, TemplateParseContext::new(&papers, &[], &NoTranslation)).unwrap()
}

#[test]
fn test_template_round_trip_points() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Acme_2L.template");
    let template = sample();
    assert_eq!(template.aliases().len(), 3);

    write_template_to_file(&path, &template, XmlWriteOptions::default()).unwrap();
    let read = read_back(&path);

    assert_eq!(read, vec![template]);
    assert_eq!(read[0].frames[0].label_count(), 24);
}

#[test]
fn test_template_round_trip_millimeters() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Acme_2L.template");
    let template = sample();

    write_template_to_file(&path, &template, XmlWriteOptions::new(Units::Mm)).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("mm\""));
    assert!(!text.contains("pt\""));

    let read = read_back(&path);
    assert_eq!(read.len(), 1);
    let got = &read[0];
    assert_eq!(got.paper_id, template.paper_id);
    assert_eq!(got.aliases(), template.aliases());
    assert_eq!(got.product_url, template.product_url);

    let (a, b) = (&got.frames[0], &template.frames[0]);
    match (&a.shape, &b.shape) {
        (
            FrameShape::Rect { width: w1, height: h1, corner_radius: r1, x_waste: xw1, y_waste: yw1 },
            FrameShape::Rect { width: w2, height: h2, corner_radius: r2, x_waste: xw2, y_waste: yw2 },
        ) => {
            for (x, y) in [(w1, w2), (h1, h2), (r1, r2), (xw1, xw2), (yw1, yw2)] {
                assert_close(*x, *y);
            }
        }
        other => panic!("unexpected shapes: {:?}", other),
    }
    assert_eq!(a.layouts.len(), 2);
    for (la, lb) in a.layouts.iter().zip(&b.layouts) {
        assert_eq!((la.nx, la.ny), (lb.nx, lb.ny));
        for (x, y) in [(la.x0, lb.x0), (la.y0, lb.y0), (la.dx, lb.dx), (la.dy, lb.dy)] {
            assert_close(x, y);
        }
    }
    match a.markups.as_slice() {
        [Markup::Line { x1, y1, x2, y2 }] => {
            assert_close(*x1, 0.0);
            assert_close(*y1, 45.0);
            assert_close(*x2, 180.0);
            assert_close(*y2, 45.0);
        }
        other => panic!("unexpected markups: {:?}", other),
    }
}

#[test]
fn test_inch_length_round_trip() {
    let mut template = Template::new("Acme", "Inch", "", "Other", 72.0, 144.0);
    let mut frame = Frame::cd("0", 72.0, 18.0, 144.0, 0.0, 0.0);
    frame.add_layout(Layout::single());
    template.add_frame(frame);

    let text = write_templates_to_string(&[template.clone()], XmlWriteOptions::new(Units::Inch));
    assert!(text.contains(r#"width="1in""#));
    assert!(text.contains(r#"radius="1in""#));
    assert!(!text.contains(r#"height="0in""#));

    let doc = roxmltree::Document::parse(&text).unwrap();
    let papers = papers();
    let read = labelkit_templatedb::xml::parse_templates_doc(
        &doc,
        TemplateParseContext::new(&papers, &[], &NoTranslation),
    )
    .unwrap();
    assert_eq!(read, vec![template]);
}
