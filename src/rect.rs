use crate::units::*;
use serde::Serialize;

/// A rectangle, specified by two opposite corners in screen space: `y` grows
/// downwards, so `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub x1: Px,
    /// The y-coordinate of the top edge.
    pub y1: Px,
    /// The x-coordinate of the right edge.
    pub x2: Px,
    /// The y-coordinate of the bottom edge.
    pub y2: Px,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its dimensions
    pub fn new<X: Into<Px>, Y: Into<Px>, W: Into<Px>, H: Into<Px>>(
        x: X,
        y: Y,
        width: W,
        height: H,
    ) -> Rect {
        let (x, y) = (x.into(), y.into());
        Rect {
            x1: x,
            y1: y,
            x2: x + width.into(),
            y2: y + height.into(),
        }
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }

    /// The smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 5.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 15.0, 25.0));
        assert_eq!(u.width(), Px(15.0));
        assert_eq!(u.height(), Px(25.0));
    }
}
