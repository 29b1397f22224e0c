//! The measurement surface: a staging area that text is laid out on and then measured.
//!
//! Fitting never computes geometry itself. It stages a candidate (text, font size,
//! line height, top margin, wrapping mode) on a [`Surface`] and asks where things
//! ended up. [`FlowSurface`] is the built-in surface: it wraps text inside a
//! [`Shape`] using [`GlyphMetrics`]. A surface belongs to a single layout call and
//! is borrowed mutably for its whole duration.

use std::collections::VecDeque;
use std::ops::Range;

use crate::metrics::GlyphMetrics;
use crate::rect::Rect;
use crate::settings::{HorizontalAlign, Settings};
use crate::shape::{Circle, Shape};
use crate::units::Px;

/// Whether text may break onto multiple lines
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Wrap {
    /// Break at whitespace and after hyphens, or anywhere inside a word that
    /// does not fit on a line of its own
    #[default]
    Normal,
    /// Keep everything on a single line
    NoWrap,
}

/// A text staging area that can be measured.
///
/// Ranges are byte ranges into [`text`](Surface::text) and must fall on character
/// boundaries.
pub trait Surface {
    fn set_text(&mut self, text: &str);

    fn text(&self) -> &str;

    fn set_font_size(&mut self, size: Px);

    /// Line height as a multiple of the font size
    fn set_line_height(&mut self, line_height: f32);

    /// Offset of the top of the text block from the top of the shape
    fn set_margin_top(&mut self, margin: Px);

    fn set_wrap(&mut self, wrap: Wrap);

    /// Box of the whole text block, from its top margin to the bottom of its last line
    fn bounds(&mut self) -> Rect;

    /// One rectangle per line the range has text on, top to bottom. More than one
    /// rectangle means the range wraps.
    fn measure(&mut self, range: Range<usize>) -> Vec<Rect>;

    /// Smallest rectangle containing everything in `range`, `None` if it holds no text
    fn span_bounds(&mut self, range: Range<usize>) -> Option<Rect> {
        self.measure(range).into_iter().reduce(|a, b| a.union(&b))
    }
}

/// Whether `rect` ends strictly above the bottom of the content box
pub fn fits(content_box: &Rect, rect: &Rect) -> bool {
    rect.y2 < content_box.y2
}

/// Whether the whole text block currently staged on `surface` fits
pub(crate) fn block_fits<S: Surface + ?Sized>(surface: &mut S, content_box: &Rect) -> bool {
    let bounds = surface.bounds();
    fits(content_box, &bounds)
}

/// Whitespace that lines may break at. No-break spaces stay inside words.
fn is_break_space(ch: char) -> bool {
    ch != '\u{00A0}' && (ch.is_whitespace() || ch == '\u{200B}')
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum PieceKind {
    Word,
    Space,
    Break,
}

/// An unbreakable run of text
#[derive(Debug, Clone)]
struct Piece {
    kind: PieceKind,
    range: Range<usize>,
    width: Px,
}

#[derive(Debug, Copy, Clone)]
struct Glyph {
    start: usize,
    end: usize,
    line: usize,
    x: Px,
    advance: Px,
}

/// Staged text after layout
#[derive(Debug)]
struct Flow {
    line_box: Px,
    content_height: Px,
    /// Top edge of every line box
    tops: Vec<Px>,
    /// One per character, in text order
    glyphs: Vec<Glyph>,
}

/// The built-in [`Surface`]: lays text out inside a [`Shape`] line by line.
///
/// Lines are `font_size × line_height` tall and are placed top to bottom starting at
/// the top margin. When the first word of a line is wider than the shape allows at
/// that height, the line slides down pixel by pixel until the word fits, or until it
/// clears the shape, where the full width is available. A word that fits nowhere is
/// broken between characters. Trailing whitespace hangs past the end of its line,
/// and each line is aligned within the room the shape leaves it.
///
/// Layout happens lazily, on the first measurement after something was staged.
pub struct FlowSurface<M, S = Circle> {
    metrics: M,
    shape: S,
    align: HorizontalAlign,
    text: String,
    font_size: Px,
    line_height: f32,
    margin_top: Px,
    wrap: Wrap,
    flow: Option<Flow>,
}

impl<M: GlyphMetrics> FlowSurface<M, Circle> {
    /// A surface with the shape, alignment and initial font settings of `settings`
    pub fn for_settings(metrics: M, settings: &Settings) -> Self {
        let mut surface = FlowSurface::new(metrics, settings.shape())
            .with_align(settings.horizontal_align);
        surface.font_size = Px(settings.font_size.value);
        surface.line_height = settings.line_height.value;
        surface
    }
}

impl<M: GlyphMetrics, S: Shape> FlowSurface<M, S> {
    pub fn new(metrics: M, shape: S) -> Self {
        FlowSurface {
            metrics,
            shape,
            align: HorizontalAlign::Center,
            text: String::new(),
            font_size: Px(16.0),
            line_height: 1.2,
            margin_top: Px::ZERO,
            wrap: Wrap::Normal,
            flow: None,
        }
    }

    pub fn with_align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self.flow = None;
        self
    }

    fn flow(&mut self) -> &Flow {
        let flow = match self.flow.take() {
            Some(flow) => flow,
            None => self.typeset(),
        };
        self.flow.insert(flow)
    }

    fn typeset(&self) -> Flow {
        let line_box = self.font_size * self.line_height;
        let mut flow = Flow {
            line_box,
            content_height: self.metrics.content_height(self.font_size),
            tops: Vec::new(),
            glyphs: Vec::with_capacity(self.text.len()),
        };

        let mut pieces = self.pieces();
        let mut y = self.margin_top;
        while !pieces.is_empty() {
            let lead = match self.wrap {
                Wrap::Normal => leading_width(&pieces),
                Wrap::NoWrap => pieces.iter().map(|piece| piece.width).sum(),
            };
            let (top, left, right) = self.place(y, lead, line_box);
            let line: Vec<Piece> = match self.wrap {
                Wrap::Normal => self.fill_line(&mut pieces, right - left),
                Wrap::NoWrap => pieces.drain(..).collect(),
            };
            self.set_line(&mut flow, &line, top, (left, right));
            y = top + line_box;
        }

        flow
    }

    /// Split the text into words, break spaces and forced line breaks. Words end
    /// after a hyphen so lines can break there.
    fn pieces(&self) -> VecDeque<Piece> {
        let mut pieces: VecDeque<Piece> = VecDeque::new();
        let mut current: Option<Piece> = None;

        for (offset, ch) in self.text.char_indices() {
            let kind = match ch {
                '\n' => PieceKind::Break,
                ch if is_break_space(ch) => PieceKind::Space,
                _ => PieceKind::Word,
            };
            let end = offset + ch.len_utf8();
            let advance = self.metrics.advance(ch, self.font_size);

            match current.as_mut() {
                Some(piece) if piece.kind == kind && kind != PieceKind::Break => {
                    piece.range.end = end;
                    piece.width += advance;
                }
                _ => {
                    pieces.extend(current.take());
                    current = Some(Piece {
                        kind,
                        range: offset..end,
                        width: advance,
                    });
                }
            }

            if ch == '-' || kind == PieceKind::Break {
                pieces.extend(current.take());
            }
        }
        pieces.extend(current);

        pieces
    }

    /// Find the first line position at or below `y` where the shape leaves at
    /// least `lead` of room
    fn place(&self, y: Px, lead: Px, line_box: Px) -> (Px, Px, Px) {
        let floor = self.shape.extent().y2;
        let mut top = y;
        loop {
            let (left, right) = self.shape.interval(top, top + line_box);
            if right - left >= lead || top >= floor {
                return (top, left, right);
            }
            top += Px(1.0);
        }
    }

    /// Take as many pieces as fit in `room` off the front of `pieces`
    fn fill_line(&self, pieces: &mut VecDeque<Piece>, room: Px) -> Vec<Piece> {
        let mut line: Vec<Piece> = Vec::new();
        let mut width = Px::ZERO;
        let mut pending = Px::ZERO;
        let mut has_word = false;

        while let Some(piece) = pieces.pop_front() {
            match piece.kind {
                PieceKind::Break => {
                    line.push(piece);
                    break;
                }
                PieceKind::Space => {
                    pending += piece.width;
                    line.push(piece);
                }
                PieceKind::Word if width + pending + piece.width <= room => {
                    width += pending + piece.width;
                    pending = Px::ZERO;
                    has_word = true;
                    line.push(piece);
                }
                PieceKind::Word if has_word => {
                    pieces.push_front(piece);
                    break;
                }
                PieceKind::Word => {
                    // nothing else on this line: break the word wherever it overflows
                    let (head, tail) = self.split_word(piece, room - width - pending);
                    line.push(head);
                    if let Some(tail) = tail {
                        pieces.push_front(tail);
                    }
                    break;
                }
            }
        }

        line
    }

    /// Split a word after the last character that fits in `room`, keeping at
    /// least one character in the head
    fn split_word(&self, piece: Piece, room: Px) -> (Piece, Option<Piece>) {
        let text = &self.text[piece.range.clone()];
        let mut width = Px::ZERO;
        let mut split = None;
        for (offset, ch) in text.char_indices() {
            let advance = self.metrics.advance(ch, self.font_size);
            if offset > 0 && width + advance > room {
                split = Some(piece.range.start + offset);
                break;
            }
            width += advance;
        }

        match split {
            None => (piece, None),
            Some(mid) => {
                let tail_text = &self.text[mid..piece.range.end];
                let tail = Piece {
                    kind: PieceKind::Word,
                    range: mid..piece.range.end,
                    width: self.metrics.width_of_text(tail_text, self.font_size),
                };
                let head = Piece {
                    kind: PieceKind::Word,
                    range: piece.range.start..mid,
                    width,
                };
                (head, Some(tail))
            }
        }
    }

    fn set_line(&self, flow: &mut Flow, line: &[Piece], top: Px, (left, right): (Px, Px)) {
        let index = flow.tops.len();
        flow.tops.push(top);

        // trailing whitespace hangs and does not take part in alignment
        let visible = line
            .iter()
            .rposition(|piece| piece.kind == PieceKind::Word)
            .map_or(0, |last| last + 1);
        let width: Px = line[..visible].iter().map(|piece| piece.width).sum();

        let mut x = match self.align {
            HorizontalAlign::Start => left,
            HorizontalAlign::Center => left + (right - left - width) / 2.0,
            HorizontalAlign::End => right - width,
        };
        for piece in line {
            for (offset, ch) in self.text[piece.range.clone()].char_indices() {
                let start = piece.range.start + offset;
                let advance = self.metrics.advance(ch, self.font_size);
                flow.glyphs.push(Glyph {
                    start,
                    end: start + ch.len_utf8(),
                    line: index,
                    x,
                    advance,
                });
                x += advance;
            }
        }
    }
}

/// Width of the first thing that has to go on a line: any leading spaces and the
/// word after them
fn leading_width(pieces: &VecDeque<Piece>) -> Px {
    let mut width = Px::ZERO;
    for piece in pieces {
        match piece.kind {
            PieceKind::Space => width += piece.width,
            PieceKind::Word => return width + piece.width,
            PieceKind::Break => break,
        }
    }
    width
}

impl<M: GlyphMetrics, S: Shape> Surface for FlowSurface<M, S> {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.flow = None;
        }
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_font_size(&mut self, size: Px) {
        if self.font_size != size {
            self.font_size = size;
            self.flow = None;
        }
    }

    fn set_line_height(&mut self, line_height: f32) {
        if self.line_height != line_height {
            self.line_height = line_height;
            self.flow = None;
        }
    }

    fn set_margin_top(&mut self, margin: Px) {
        if self.margin_top != margin {
            self.margin_top = margin;
            self.flow = None;
        }
    }

    fn set_wrap(&mut self, wrap: Wrap) {
        if self.wrap != wrap {
            self.wrap = wrap;
            self.flow = None;
        }
    }

    fn bounds(&mut self) -> Rect {
        let extent = self.shape.extent();
        let top = self.margin_top;
        let flow = self.flow();
        let bottom = flow.tops.last().map_or(top, |&last| last + flow.line_box);
        Rect {
            x1: extent.x1,
            y1: top,
            x2: extent.x2,
            y2: bottom,
        }
    }

    fn measure(&mut self, range: Range<usize>) -> Vec<Rect> {
        let flow = self.flow();
        let inset = (flow.line_box - flow.content_height) / 2.0;
        let first = flow.glyphs.partition_point(|glyph| glyph.start < range.start);

        let mut rects: Vec<Rect> = Vec::new();
        let mut current: Option<(usize, Rect)> = None;
        for glyph in flow.glyphs[first..].iter().take_while(|glyph| glyph.end <= range.end) {
            let y1 = flow.tops[glyph.line] + inset;
            let rect = Rect {
                x1: glyph.x,
                y1,
                x2: glyph.x + glyph.advance,
                y2: y1 + flow.content_height,
            };
            if let Some((line, acc)) = current.as_mut() {
                if *line == glyph.line {
                    *acc = acc.union(&rect);
                    continue;
                }
            }
            rects.extend(current.replace((glyph.line, rect)).map(|(_, acc)| acc));
        }
        rects.extend(current.map(|(_, acc)| acc));

        rects
    }
}
