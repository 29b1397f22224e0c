use crate::layout::Margins;
use crate::rect::Rect;
use crate::units::Px;

/// An outline that text is wrapped inside of.
///
/// The shape occupies [`extent`](Shape::extent), starting at the origin. Lines are
/// asked for as horizontal bands; the shape answers with the part of the band text
/// may occupy. Below the extent nothing constrains the text any more and the full
/// width is available, which is how overflowing text still gets laid out somewhere
/// and measured.
pub trait Shape {
    /// Bounding box of the shape, its top-left corner at the origin
    fn extent(&self) -> Rect;

    /// Horizontal interval `(left, right)` available to a line occupying the
    /// vertical band `top..bottom`. An empty interval means the band cannot hold
    /// any text.
    fn interval(&self, top: Px, bottom: Px) -> (Px, Px);

    /// Width of the widest line of the given height that fits in the shape
    fn chord(&self, line_height: Px) -> Px;
}

/// A circle (an ellipse once the margins differ per side) inscribed in a square
/// container of side `diameter`, kept `margins` away from the container edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub diameter: Px,
    pub margins: Margins,
}

impl Circle {
    pub fn new(diameter: Px, margins: Margins) -> Circle {
        Circle { diameter, margins }
    }

    /// The CSS `shape-outside` polygons (left float, right float) approximating the
    /// circle, for callers that hand the wrapping over to a browser
    pub fn polygons() -> [&'static str; 2] {
        [
            concat!(
                "polygon(0 0, 98% 0, 50% 6%, 23.4% 17.3%, 6% 32.6%, 0 50%, ",
                "6% 65.6%, 23.4% 82.7%, 50% 94%, 98% 100%, 0 100%)",
            ),
            concat!(
                "polygon(2% 0%, 100% 0%, 100% 100%, 2% 100%, 50% 94%, 76.6% 82.7%, ",
                "94% 65.6%, 100% 50%, 94% 32.6%, 76.6% 17.3%, 50% 6%)",
            ),
        ]
    }

    /// Centre and semi-axes of the area text may occupy
    fn ellipse(&self) -> (Px, Px, f32, f32) {
        let inner = self.margins.inset(&self.extent());
        let cx = (inner.x1 + inner.x2) / 2.0;
        let cy = (inner.y1 + inner.y2) / 2.0;
        (cx, cy, inner.width().0 / 2.0, inner.height().0 / 2.0)
    }
}

impl Shape for Circle {
    fn extent(&self) -> Rect {
        Rect::new(Px::ZERO, Px::ZERO, self.diameter, self.diameter)
    }

    fn interval(&self, top: Px, bottom: Px) -> (Px, Px) {
        let extent = self.extent();
        if top >= extent.y2 {
            return (extent.x1, extent.x2);
        }

        let (cx, cy, a, b) = self.ellipse();
        let bottom = bottom.min(extent.y2);
        if a <= 0.0 || b <= 0.0 || top < cy - Px(b) || bottom > cy + Px(b) {
            return (cx, cx);
        }

        // the band is as wide as its narrowest edge
        let dy = (top - cy).abs().max((bottom - cy).abs()).0;
        let half = Px(a * (1.0 - (dy / b).powi(2)).max(0.0).sqrt());
        (cx - half, cx + half)
    }

    fn chord(&self, line_height: Px) -> Px {
        let (_, _, a, b) = self.ellipse();
        if b <= 0.0 {
            return Px::ZERO;
        }
        // for a circle of radius r this is sqrt(4r² - h²)
        let h = line_height.0 / 2.0;
        Px(2.0 * a * (1.0 - (h / b).powi(2)).max(0.0).sqrt())
    }
}
