use serde::Serialize;

use crate::rect::Rect;
use crate::settings::{Origin, Settings};
use crate::surface::Surface;
use crate::units::Px;

/// Tops closer than this belong to the same line
const LINE_TOLERANCE: f32 = 2.0;

/// Placeholder for `-` that keeps the layout from breaking lines at hyphens
const HYPHEN_PLACEHOLDER: char = '\u{2011}';

/// Where `-` was swapped for [`HYPHEN_PLACEHOLDER`] in the staged text, so that
/// only those are swapped back and placeholders typed by the caller survive
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Hyphens {
    /// Byte offsets into the staged text, ascending
    offsets: Vec<usize>,
    /// Offsets at or past this are no longer the staged text
    limit: usize,
}

impl Hyphens {
    /// The staged form of `text`
    pub(crate) fn stage(text: &str) -> (String, Hyphens) {
        let mut staged = String::with_capacity(text.len());
        let mut offsets = Vec::new();
        for ch in text.chars() {
            if ch == '-' {
                offsets.push(staged.len());
                staged.push(HYPHEN_PLACEHOLDER);
            } else {
                staged.push(ch);
            }
        }
        (staged, Hyphens { offsets, limit: usize::MAX })
    }

    /// Only restore placeholders before `kept`; whatever follows is the ellipsis
    pub(crate) fn within(&self, kept: usize) -> Hyphens {
        Hyphens {
            offsets: self.offsets.clone(),
            limit: kept,
        }
    }

    /// Swap the placeholders in `piece`, found at byte `start` of the staged text,
    /// back to `-`
    pub(crate) fn restore(&self, piece: &str, start: usize) -> String {
        piece
            .char_indices()
            .map(|(offset, ch)| {
                let at = start + offset;
                let staged = at < self.limit && self.offsets.binary_search(&at).is_ok();
                if ch == HYPHEN_PLACEHOLDER && staged {
                    '-'
                } else {
                    ch
                }
            })
            .collect()
    }
}

/// One visually contiguous run of text on a single line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    /// Left edge of the first glyph
    pub x: Px,
    /// Top edge of the glyphs
    pub y: Px,
    pub width: Px,
    pub height: Px,
}

impl TextLine {
    fn start(text: &str, rect: &Rect) -> TextLine {
        TextLine {
            text: text.to_string(),
            x: rect.x1,
            y: rect.y1,
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn extend(&mut self, text: &str, rect: &Rect) {
        self.text.push_str(text);
        self.width = rect.x2 - self.x;
    }
}

fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\u{00A0}' | '\u{200B}')
}

/// Split text into alternating runs of words and separators, as byte ranges
fn tokens(text: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut separator = None;
    for (offset, ch) in text.char_indices() {
        let current = is_separator(ch);
        if separator.is_some_and(|previous| previous != current) {
            tokens.push((start, offset));
            start = offset;
        }
        separator = Some(current);
    }
    if start < text.len() {
        tokens.push((start, text.len()));
    }
    tokens
}

/// Collects measured pieces of text into lines
#[derive(Default)]
struct LineBuilder {
    lines: Vec<TextLine>,
    current: Option<(Px, TextLine)>,
}

impl LineBuilder {
    /// Add a piece, starting a new line when its top is off the current one. A
    /// piece with no width starting a line contributes no text.
    fn push(&mut self, text: &str, rect: &Rect, skip_invisible: bool) {
        match self.current.as_mut() {
            Some((top, line)) if (rect.y1 - *top).abs() <= Px(LINE_TOLERANCE) => {
                line.extend(text, rect)
            }
            _ => {
                let text = if skip_invisible && rect.width() <= Px::ZERO { "" } else { text };
                self.lines.extend(self.current.take().map(|(_, line)| line));
                self.current = Some((rect.y1, TextLine::start(text, rect)));
            }
        }
    }

    fn finish(mut self) -> Vec<TextLine> {
        if let Some((_, line)) = self.current.take() {
            if !line.text.is_empty() {
                self.lines.push(line);
            }
        }
        self.lines
    }
}

/// Read the lines of the text staged on `surface` back out, top to bottom.
///
/// Words wrapped across lines are broken up character by character.
pub(crate) fn extract_lines<S: Surface + ?Sized>(
    surface: &mut S,
    settings: &Settings,
    hyphens: &Hyphens,
) -> Vec<TextLine> {
    let text = surface.text().to_string();
    let mut builder = LineBuilder::default();

    for (start, end) in tokens(&text) {
        let rects = surface.measure(start..end);
        match rects.as_slice() {
            [] => {}
            [rect] => builder.push(&hyphens.restore(&text[start..end], start), rect, false),
            _ => {
                for (offset, ch) in text[start..end].char_indices() {
                    let from = start + offset;
                    let to = from + ch.len_utf8();
                    if let Some(rect) = surface.measure(from..to).first() {
                        builder.push(&hyphens.restore(&text[from..to], from), rect, true);
                    }
                }
            }
        }
    }

    let mut lines = builder.finish();
    for line in &mut lines {
        finalize(line, settings);
    }
    lines
}

fn finalize(line: &mut TextLine, settings: &Settings) {
    if settings.origin == Origin::Center {
        line.x -= settings.size / 2.0;
        line.y -= settings.size / 2.0;
    }
}
