use std::ops::Range;

use crate::layout::truncate::truncate;
use crate::rect::Rect;
use crate::settings::Settings;
use crate::surface::{block_fits, Surface};
use crate::units::Px;

/// What it took to make the staged text fit
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolution {
    pub overflowed: bool,
    pub modified: bool,
    pub font_size: f32,
    pub line_height: f32,
    /// Length of the prefix of the staged text still on the surface
    pub kept: usize,
    /// Ranges of the staged text that were cut off, empty when everything fits
    pub leftover: Vec<Range<usize>>,
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Degrade the staged text until it fits the content box: shrink the font size,
/// then the line height, then truncate. Each step only runs if the previous ones
/// left the text overflowing, and shrinking only happens towards a configured `min`.
///
/// Shrinking walks down one step at a time rather than bisecting: wrapping inside a
/// curved outline reflows the text at every size, and whether it fits is not
/// monotonic in the size.
pub(crate) fn resolve_overflow<S: Surface + ?Sized>(
    surface: &mut S,
    content_box: &Rect,
    settings: &Settings,
) -> Resolution {
    let mut font_size = settings.font_size.value;
    let mut line_height = settings.line_height.value;
    let mut fits = block_fits(surface, content_box);
    let mut modified = false;
    let mut kept = surface.text().len();
    let mut leftover = Vec::new();

    if let Some(min) = settings.font_size.min.filter(|_| !fits) {
        modified = true;
        log::debug!("text overflows at font size {font_size}, trying {min}");

        // if the smallest size doesn't fit either there is nothing to search for
        surface.set_font_size(Px(min));
        fits = block_fits(surface, content_box);
        if fits {
            fits = false;
            while !fits && font_size > min {
                font_size = (font_size - 1.0).max(min);
                surface.set_font_size(Px(font_size));
                fits = block_fits(surface, content_box);
            }
        } else {
            font_size = min;
        }
        log::debug!("settled on font size {font_size}");
    }

    if let Some(min) = settings.line_height.min.filter(|_| !fits) {
        modified = true;
        log::debug!("text overflows at line height {line_height}, trying {min}");

        surface.set_line_height(min);
        fits = block_fits(surface, content_box);
        if fits {
            fits = false;
            while !fits && line_height > min {
                line_height = round_tenth(line_height - 0.1).max(min);
                surface.set_line_height(line_height);
                fits = block_fits(surface, content_box);
            }
        } else {
            line_height = min;
        }
        log::debug!("settled on line height {line_height}");
    }

    if !fits {
        modified = true;
        let cut = truncate(surface, content_box, settings);
        fits = cut.leftover.is_empty();
        log::debug!("truncated after {} bytes", cut.kept);
        kept = cut.kept;
        leftover = cut.leftover;
    }

    Resolution {
        overflowed: !fits,
        modified,
        font_size,
        line_height: round_tenth(line_height),
        kept,
        leftover,
    }
}
