use crate::rect::Rect;
use crate::units::Px;

/// Margins inset a shape's bounding box. The content box used for fit checks is the
/// bounding box shrunk by these margins, and [`Circle`](crate::Circle) uses them as
/// its shape margin: text keeps this distance from the outline on every side.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Px>>(value: D) -> Margins {
        let value: Px = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Px, horizontal: Px) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Px::ZERO)
    }

    /// Shrink `rect` by the margins
    pub fn inset(&self, rect: &Rect) -> Rect {
        Rect {
            x1: rect.x1 + self.left,
            y1: rect.y1 + self.top,
            x2: rect.x2 - self.right,
            y2: rect.y2 - self.bottom,
        }
    }
}
