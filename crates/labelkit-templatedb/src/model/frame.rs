//! Label frames and sheet layout
//!
//! A [`Frame`] describes the shape and size of one label and carries the
//! grids ([`Layout`]) that place copies of it on the sheet. Expanding those
//! grids into placement points is the job of [`Frame::origins`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Shape of a label. All lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum FrameShape {
    /// Rectangle, optionally with rounded corners
    Rect {
        width: f64,
        height: f64,
        corner_radius: f64,
        x_waste: f64,
        y_waste: f64,
    },
    /// Ellipse inscribed in width x height
    Ellipse { width: f64, height: f64, waste: f64 },
    /// Circle
    Round { radius: f64, waste: f64 },
    /// CD/DVD label. A zero clip dimension means the disc is not clipped
    /// in that direction; non-zero values describe a business-card CD.
    Cd {
        outer_radius: f64,
        inner_hole_radius: f64,
        clip_width: f64,
        clip_height: f64,
        waste: f64,
    },
}

/// One rectangular grid of identical labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Number of columns
    pub nx: u32,
    /// Number of rows
    pub ny: u32,
    /// Left edge of the first column, from the sheet's left edge
    pub x0: f64,
    /// Top edge of the first row, from the sheet's top edge
    pub y0: f64,
    /// Column pitch
    pub dx: f64,
    /// Row pitch
    pub dy: f64,
}

impl Layout {
    pub fn new(nx: u32, ny: u32, x0: f64, y0: f64, dx: f64, dy: f64) -> Self {
        Self {
            nx,
            ny,
            x0,
            y0,
            dx,
            dy,
        }
    }

    /// A single label at the sheet origin.
    pub fn single() -> Self {
        Self::new(1, 1, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn label_count(&self) -> usize {
        self.nx as usize * self.ny as usize
    }
}

/// Alignment guide drawn on a label; never affects placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Markup {
    Margin { size: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { x0: f64, y0: f64, r: f64 },
    Rect { x1: f64, y1: f64, w: f64, h: f64, r: f64 },
    Ellipse { x1: f64, y1: f64, w: f64, h: f64 },
}

/// Top-left placement point of one label on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Reading order: top to bottom, then left to right. Exact comparison.
fn compare_origins(a: &Origin, b: &Origin) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// A label shape together with its layouts and markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame id; "0" for the first (and usually only) frame
    pub id: String,
    pub shape: FrameShape,
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub markups: Vec<Markup>,
}

impl Frame {
    pub fn new(id: impl Into<String>, shape: FrameShape) -> Self {
        Self {
            id: id.into(),
            shape,
            layouts: Vec::new(),
            markups: Vec::new(),
        }
    }

    pub fn rect(
        id: impl Into<String>,
        width: f64,
        height: f64,
        corner_radius: f64,
        x_waste: f64,
        y_waste: f64,
    ) -> Self {
        Self::new(
            id,
            FrameShape::Rect {
                width,
                height,
                corner_radius,
                x_waste,
                y_waste,
            },
        )
    }

    pub fn ellipse(id: impl Into<String>, width: f64, height: f64, waste: f64) -> Self {
        Self::new(
            id,
            FrameShape::Ellipse {
                width,
                height,
                waste,
            },
        )
    }

    pub fn round(id: impl Into<String>, radius: f64, waste: f64) -> Self {
        Self::new(id, FrameShape::Round { radius, waste })
    }

    pub fn cd(
        id: impl Into<String>,
        outer_radius: f64,
        inner_hole_radius: f64,
        clip_width: f64,
        clip_height: f64,
        waste: f64,
    ) -> Self {
        Self::new(
            id,
            FrameShape::Cd {
                outer_radius,
                inner_hole_radius,
                clip_width,
                clip_height,
                waste,
            },
        )
    }

    pub fn add_layout(&mut self, layout: Layout) {
        self.layouts.push(layout);
    }

    pub fn add_markup(&mut self, markup: Markup) {
        self.markups.push(markup);
    }

    /// Width and height of one label in points.
    ///
    /// For CD frames an explicit clip dimension wins over the disc diameter.
    pub fn size(&self) -> (f64, f64) {
        match self.shape {
            FrameShape::Rect { width, height, .. } => (width, height),
            FrameShape::Ellipse { width, height, .. } => (width, height),
            FrameShape::Round { radius, .. } => (2.0 * radius, 2.0 * radius),
            FrameShape::Cd {
                outer_radius,
                clip_width,
                clip_height,
                ..
            } => {
                let w = if clip_width != 0.0 {
                    clip_width
                } else {
                    2.0 * outer_radius
                };
                let h = if clip_height != 0.0 {
                    clip_height
                } else {
                    2.0 * outer_radius
                };
                (w, h)
            }
        }
    }

    /// Total number of labels on a sheet, over all layouts.
    pub fn label_count(&self) -> usize {
        self.layouts.iter().map(Layout::label_count).sum()
    }

    /// Placement origin of every label on the sheet, in reading order.
    ///
    /// Each layout is expanded row by row, then the pooled origins are
    /// sorted by y and then x, so label `i` is the i-th label reading
    /// top to bottom, left to right, whatever the number and order of
    /// layouts.
    pub fn origins(&self) -> Vec<Origin> {
        let mut origins = Vec::with_capacity(self.label_count());

        for layout in &self.layouts {
            for iy in 0..layout.ny {
                for ix in 0..layout.nx {
                    origins.push(Origin::new(
                        layout.x0 + f64::from(ix) * layout.dx,
                        layout.y0 + f64::from(iy) * layout.dy,
                    ));
                }
            }
        }

        origins.sort_by(compare_origins);
        origins
    }

    /// True if both frames describe the same label geometry and sheet layout.
    ///
    /// Ids and markup are ignored.
    pub fn is_similar_to(&self, other: &Frame) -> bool {
        self.shape == other.shape && self.layouts == other.layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_layout_origins() {
        let mut frame = Frame::rect("0", 90.0, 140.0, 0.0, 0.0, 0.0);
        frame.add_layout(Layout::new(2, 2, 10.0, 20.0, 100.0, 150.0));

        assert_eq!(frame.label_count(), 4);
        assert_eq!(
            frame.origins(),
            vec![
                Origin::new(10.0, 20.0),
                Origin::new(110.0, 20.0),
                Origin::new(10.0, 170.0),
                Origin::new(110.0, 170.0),
            ]
        );
    }

    #[test]
    fn test_interleaved_layouts_are_sorted() {
        // Two grids whose rows alternate down the sheet.
        let mut frame = Frame::round("0", 20.0, 0.0);
        frame.add_layout(Layout::new(2, 2, 50.0, 100.0, 100.0, 100.0));
        frame.add_layout(Layout::new(2, 2, 0.0, 50.0, 100.0, 100.0));

        let origins = frame.origins();
        assert_eq!(origins.len(), frame.label_count());
        assert_eq!(
            origins,
            vec![
                Origin::new(0.0, 50.0),
                Origin::new(100.0, 50.0),
                Origin::new(50.0, 100.0),
                Origin::new(150.0, 100.0),
                Origin::new(0.0, 150.0),
                Origin::new(100.0, 150.0),
                Origin::new(50.0, 200.0),
                Origin::new(150.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_origins_reading_order_invariant() {
        let mut frame = Frame::rect("0", 30.0, 30.0, 0.0, 0.0, 0.0);
        frame.add_layout(Layout::new(3, 4, 300.0, 12.5, -40.0, 60.0));
        frame.add_layout(Layout::new(1, 5, 5.0, 0.0, 0.0, 47.0));
        frame.add_layout(Layout::new(2, 1, 400.0, 12.5, 33.0, 0.0));

        let origins = frame.origins();
        assert_eq!(origins.len(), 12 + 5 + 2);
        for pair in origins.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.y < b.y || (a.y == b.y && a.x <= b.x), "{:?} before {:?}", a, b);
        }
    }

    #[test]
    fn test_no_layouts() {
        let frame = Frame::rect("0", 10.0, 10.0, 0.0, 0.0, 0.0);
        assert_eq!(frame.label_count(), 0);
        assert!(frame.origins().is_empty());
    }

    #[test]
    fn test_frame_sizes() {
        assert_eq!(Frame::rect("0", 144.0, 72.0, 5.0, 0.0, 0.0).size(), (144.0, 72.0));
        assert_eq!(Frame::ellipse("0", 100.0, 60.0, 0.0).size(), (100.0, 60.0));
        assert_eq!(Frame::round("0", 36.0, 0.0).size(), (72.0, 72.0));
        assert_eq!(Frame::cd("0", 166.0, 58.0, 0.0, 0.0, 9.0).size(), (332.0, 332.0));
    }

    #[test]
    fn test_cd_clip_overrides_diameter() {
        assert_eq!(
            Frame::cd("0", 166.0, 58.0, 250.0, 0.0, 0.0).size(),
            (250.0, 332.0)
        );
        assert_eq!(
            Frame::cd("0", 166.0, 58.0, 250.0, 170.0, 0.0).size(),
            (250.0, 170.0)
        );
    }

    #[test]
    fn test_similarity_ignores_id_and_markup() {
        let mut a = Frame::rect("0", 10.0, 20.0, 0.0, 0.0, 0.0);
        a.add_layout(Layout::new(3, 10, 1.0, 2.0, 11.0, 21.0));
        let mut b = a.clone();
        b.id = "1".to_string();
        b.add_markup(Markup::Margin { size: 5.0 });
        assert!(a.is_similar_to(&b));

        b.layouts[0].nx = 2;
        assert!(!a.is_similar_to(&b));
    }
}
