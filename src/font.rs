use crate::metrics::{is_zero_width, GlyphMetrics};
use crate::{FitError, Px};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

/// A parsed font object. Fonts can be TTF or OTF fonts; only their horizontal
/// metrics are used, glyph outlines are never rasterized.
///
/// Advances are summed per character: there is no kerning, no ligature
/// substitution and no complex-script shaping.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, FitError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the family name of the font, if it declares one. Handy as the
    /// `font_family` option so formatted output names the face that was measured.
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Px) -> Px {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.face.as_face_ref().glyph_index(ch)
    }

    /// Glyph used for `ch`, falling back to a plain hyphen for the non-breaking one
    /// and then to the replacement character or a question mark
    fn resolve_glyph(&self, ch: char) -> Option<GlyphId> {
        self.glyph_id(ch)
            .or_else(|| match ch {
                '\u{2011}' => self.glyph_id('-'),
                '\u{00A0}' => self.glyph_id(' '),
                _ => None,
            })
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
    }
}

impl GlyphMetrics for Font {
    fn advance(&self, ch: char, size: Px) -> Px {
        let glyph = match self.glyph_id(ch) {
            Some(gid) => Some(gid),
            None if is_zero_width(ch) => None,
            None => self.resolve_glyph(ch),
        };

        glyph
            .and_then(|gid| self.face.as_face_ref().glyph_hor_advance(gid))
            .map(|advance| self.scaling(size) * advance as f32)
            .unwrap_or_default()
    }

    fn ascent(&self, size: Px) -> Px {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    fn descent(&self, size: Px) -> Px {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }
}
