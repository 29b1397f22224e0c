use crate::units::Px;

/// Per-character font metrics used by [`FlowSurface`](crate::FlowSurface) to lay text out.
///
/// Implemented by [`Font`](crate::Font) for real TrueType/OpenType faces and by
/// [`HeuristicMetrics`] when no font file is at hand.
pub trait GlyphMetrics {
    /// Horizontal advance of `ch` at the given font size
    fn advance(&self, ch: char, size: Px) -> Px;

    /// Distance from the baseline to the top of the font
    fn ascent(&self, size: Px) -> Px;

    /// Distance from the baseline to the bottom of the font. Note: this is usually negative
    fn descent(&self, size: Px) -> Px;

    /// Height of the area glyphs are painted in, which is also the height of a
    /// measured text rectangle
    fn content_height(&self, size: Px) -> Px {
        self.ascent(size) - self.descent(size)
    }

    /// Calculate the width of a given string of text
    fn width_of_text(&self, text: &str, size: Px) -> Px {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for &M {
    fn advance(&self, ch: char, size: Px) -> Px {
        (**self).advance(ch, size)
    }

    fn ascent(&self, size: Px) -> Px {
        (**self).ascent(size)
    }

    fn descent(&self, size: Px) -> Px {
        (**self).descent(size)
    }
}

/// Characters that take up no horizontal space
pub(crate) fn is_zero_width(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

/// Fixed-advance metrics, expressed as fractions of the font size.
///
/// Every visible character advances by `advance_em`, which makes layouts easy to
/// predict; useful for tests and for estimating before a real font is loaded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeuristicMetrics {
    pub advance_em: f32,
    pub ascent_em: f32,
    pub descent_em: f32,
}

impl Default for HeuristicMetrics {
    fn default() -> Self {
        HeuristicMetrics {
            advance_em: 0.6,
            ascent_em: 0.8,
            descent_em: -0.2,
        }
    }
}

impl GlyphMetrics for HeuristicMetrics {
    fn advance(&self, ch: char, size: Px) -> Px {
        if is_zero_width(ch) {
            Px::ZERO
        } else {
            size * self.advance_em
        }
    }

    fn ascent(&self, size: Px) -> Px {
        size * self.ascent_em
    }

    fn descent(&self, size: Px) -> Px {
        size * self.descent_em
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_widths() {
        let metrics = HeuristicMetrics {
            advance_em: 0.5,
            ascent_em: 0.75,
            descent_em: -0.25,
        };
        assert_eq!(metrics.advance('a', Px(10.0)), Px(5.0));
        assert_eq!(metrics.advance('\u{200B}', Px(10.0)), Px::ZERO);
        assert_eq!(metrics.content_height(Px(10.0)), Px(10.0));
        assert_eq!(metrics.width_of_text("abc\n", Px(10.0)), Px(15.0));
    }
}
