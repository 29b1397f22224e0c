use crate::rect::Rect;
use crate::surface::{block_fits, Surface};
use crate::units::Px;

const MAX_TRIES: usize = 4;
/// Close enough to centred, in pixels
const TOLERANCE: f32 = 5.0;

/// Push the staged text block down until the space left above it roughly matches
/// the space left below it. Returns the top margin that was settled on.
///
/// Lines reflow whenever the block moves, so this converges iteratively instead of
/// computing the offset once. The block never ends up moved somewhere it no longer
/// fits.
pub(crate) fn center_vertically<S: Surface + ?Sized>(surface: &mut S, content_box: &Rect) -> Px {
    let mut margin = Px::ZERO;
    let mut last_fitting = Px::ZERO;
    let mut tries = 0;

    surface.set_margin_top(margin);
    loop {
        let Some(block) = text_block(surface) else {
            break;
        };
        let top_space = block.y1 - content_box.y1;
        let bottom_space = content_box.y2 - block.y2;
        if bottom_space > Px::ZERO {
            last_fitting = margin;
        }

        let difference = bottom_space - top_space;
        let next = (margin + difference / 2.0).trunc();
        if next == last_fitting {
            break;
        }
        margin = next;
        surface.set_margin_top(margin);
        tries += 1;
        log::trace!("centring try {tries}: margin {margin}, off by {difference}");

        if tries >= MAX_TRIES || difference.abs() <= Px(TOLERANCE) {
            break;
        }
    }

    if !block_fits(surface, content_box) {
        margin = last_fitting;
        surface.set_margin_top(margin);
    }

    margin
}

/// Box around the glyphs of the staged text
fn text_block<S: Surface + ?Sized>(surface: &mut S) -> Option<Rect> {
    let len = surface.text().len();
    surface.span_bounds(0..len)
}
