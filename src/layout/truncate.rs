use std::ops::Range;

use crate::rect::Rect;
use crate::settings::Settings;
use crate::shape::Shape;
use crate::surface::{block_fits, fits, Surface, Wrap};
use crate::units::Px;

/// Byte offsets where words start: the end of every run of whitespace
pub(crate) fn word_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries = Vec::new();
    let mut in_space = false;
    for (offset, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_space = true;
        } else if in_space {
            boundaries.push(offset);
            in_space = false;
        }
    }
    if in_space {
        boundaries.push(text.len());
    }
    boundaries
}

/// Bisect `low..high` for the last index that still passes `fits`, assuming `low` does
/// and `high` does not
fn bisect(mut low: usize, mut high: usize, mut fits: impl FnMut(usize, usize) -> bool) -> usize {
    while low + 1 < high {
        let mid = (low + high) / 2;
        if fits(low, mid) {
            low = mid;
        } else {
            high = mid;
        }
    }
    low
}

/// Where truncation cut the staged text
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Cut {
    /// Length of the prefix of the staged text still on the surface, ahead of the
    /// ellipsis
    pub kept: usize,
    /// Ranges of the staged text that were cut off, read back joined by a single space
    pub leftover: Vec<Range<usize>>,
}

/// Cut the staged text down to its longest fitting prefix, ending it with the
/// ellipsis.
///
/// Words are dropped first; when not even the first word fits, it is cut between
/// characters instead.
pub(crate) fn truncate<S: Surface + ?Sized>(
    surface: &mut S,
    content_box: &Rect,
    settings: &Settings,
) -> Cut {
    let text = surface.text().to_string();
    let ellipsis = settings.ellipsis.as_str();
    let boundaries = word_boundaries(&text);

    if boundaries.len() < 2 {
        let (kept, cut) = truncate_word(surface, content_box, settings);
        let leftover = if cut.is_empty() { Vec::new() } else { vec![cut] };
        return Cut { kept, leftover };
    }

    let mut index = bisect(0, boundaries.len(), |low, mid| {
        surface
            .span_bounds(boundaries[low]..boundaries[mid])
            .map_or(true, |rect| fits(content_box, &rect))
    });

    // trimming the whitespace and adding the ellipsis changes the layout, so step
    // back word by word until it really fits
    loop {
        let boundary = boundaries[index];
        let kept = text[..boundary].trim_end().len();
        let marker = if index > 0 { ellipsis } else { "" };
        surface.set_text(&format!("{}{marker}", &text[..kept]));

        if index == 0 {
            let (kept, cut) = truncate_word(surface, content_box, settings);
            return Cut {
                kept,
                leftover: vec![cut, boundary..text.len()],
            };
        }
        if block_fits(surface, content_box) {
            return Cut {
                kept,
                leftover: vec![boundary..text.len()],
            };
        }
        index -= 1;
    }
}

/// Cut a single word (the staged text) between characters. Returns how much of it
/// was kept and the range that was cut off.
fn truncate_word<S: Surface + ?Sized>(
    surface: &mut S,
    content_box: &Rect,
    settings: &Settings,
) -> (usize, Range<usize>) {
    let word = surface.text().to_string();
    let ellipsis = settings.ellipsis.as_str();

    surface.set_text(&format!("{word}{ellipsis}"));
    if block_fits(surface, content_box) {
        return (word.len(), word.len()..word.len());
    }

    let (ellipsis_width, line_height) = if ellipsis.is_empty() {
        let first = word.chars().next().map_or(0, char::len_utf8);
        let height = surface.span_bounds(0..first).map_or(Px::ZERO, |rect| rect.height());
        (Px::ZERO, height)
    } else {
        let rect = surface
            .span_bounds(word.len()..word.len() + ellipsis.len())
            .unwrap_or_default();
        (rect.width(), rect.height())
    };

    surface.set_wrap(Wrap::NoWrap);

    let max_width = settings.shape().chord(line_height);
    let offsets: Vec<usize> = word
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(word.len()))
        .collect();
    let chars = offsets.len() - 1;

    let mut count = bisect(0, chars, |_, mid| {
        let width = surface.span_bounds(0..offsets[mid]).map_or(Px::ZERO, |rect| rect.width());
        width + ellipsis_width < max_width
    });

    surface.set_text(&format!("{}{ellipsis}", &word[..offsets[count]]));
    surface.set_wrap(Wrap::Normal);

    let nothing_fits = if count == 0 {
        true
    } else if !block_fits(surface, content_box) {
        if count > 1 {
            count -= 1;
            surface.set_text(&format!("{}{ellipsis}", &word[..offsets[count]]));
            false
        } else {
            true
        }
    } else {
        false
    };

    if nothing_fits {
        surface.set_text("");
        return (0, 0..word.len());
    }

    (offsets[count], offsets[count]..word.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::HeuristicMetrics;
    use crate::settings::Options;
    use crate::surface::FlowSurface;
    use pretty_assertions::assert_eq;

    #[test]
    fn boundaries_are_ends_of_whitespace_runs() {
        assert_eq!(word_boundaries("one two  three"), vec![4, 9]);
        assert_eq!(word_boundaries("single"), Vec::<usize>::new());
        assert_eq!(word_boundaries("trailing "), vec![9]);
        assert_eq!(word_boundaries("tab\tand\nnewline"), vec![4, 8]);
    }

    #[test]
    fn bisect_finds_last_passing_index() {
        assert_eq!(bisect(0, 10, |_, mid| mid <= 6), 6);
        assert_eq!(bisect(0, 10, |_, _| false), 0);
        assert_eq!(bisect(0, 10, |_, _| true), 9);
        assert_eq!(bisect(0, 1, |_, _| unreachable!()), 0);
    }

    fn staged(text: &str, options: &Options) -> (FlowSurface<HeuristicMetrics>, Settings) {
        let settings = Settings::resolve(options).expect("valid options");
        let mut surface = FlowSurface::for_settings(HeuristicMetrics::default(), &settings);
        surface.set_text(text);
        (surface, settings)
    }

    fn cut_off(text: &str, cut: &Cut) -> String {
        let pieces: Vec<&str> = cut.leftover.iter().map(|range| &text[range.clone()]).collect();
        pieces.join(" ")
    }

    #[test]
    fn words_are_dropped_until_the_rest_fits() {
        let text = "lorem ipsum dolor sit amet ".repeat(12);
        let text = text.trim_end();
        let (mut surface, settings) = staged(text, Options::new(120.0).ellipsis(true));
        let content_box = settings.content_box();
        assert!(!block_fits(&mut surface, &content_box));

        let cut = truncate(&mut surface, &content_box, &settings);
        let leftover = cut_off(text, &cut);
        assert!(block_fits(&mut surface, &content_box));

        let shown = surface.text().strip_suffix('…').expect("ends with the ellipsis");
        assert_eq!(shown, &text[..cut.kept]);
        assert!(text.ends_with(&leftover));
        assert!(!leftover.is_empty());
        assert!(shown.len() + leftover.len() < text.len());
    }

    #[test]
    fn long_word_is_cut_between_characters() {
        let word = "Pneumonoultramicroscopicsilicovolcanoconiosis";
        let (mut surface, settings) = staged(word, Options::new(60.0).ellipsis(true));
        let content_box = settings.content_box();

        let cut = truncate(&mut surface, &content_box, &settings);
        let shown = surface.text().strip_suffix('…').expect("ends with the ellipsis");
        assert!(!shown.is_empty());
        assert_eq!(shown, &word[..cut.kept]);
        assert_eq!(format!("{shown}{}", cut_off(word, &cut)), word);
        assert!(block_fits(&mut surface, &content_box));
    }

    #[test]
    fn nothing_fits_clears_the_text() {
        let (mut surface, settings) =
            staged("Wide", Options::new(10.0).font_size(40.0_f32).ellipsis(true));
        let content_box = settings.content_box();

        let cut = truncate(&mut surface, &content_box, &settings);
        assert_eq!(cut, Cut { kept: 0, leftover: vec![0..4] });
        assert_eq!(surface.text(), "");
    }

    #[test]
    fn first_word_fallback_keeps_the_rest() {
        let text = "Pneumonoultramicroscopicsilicovolcanoconiosis is long";
        let (mut surface, settings) = staged(text, &Options::new(60.0));
        let content_box = settings.content_box();

        let cut = truncate(&mut surface, &content_box, &settings);
        let leftover = cut_off(text, &cut);
        assert_eq!(cut.leftover.len(), 2);
        assert!(leftover.ends_with(" is long"));
        assert_eq!(format!("{}{leftover}", surface.text()), text);
    }

    /// Lays ASCII text out on a grid of 10px cells, `columns` to a row, breaking
    /// anywhere. Knows nothing about words or the shape, so fitting a prefix says
    /// nothing about how the prefix and an ellipsis will fit.
    struct Grid {
        text: String,
        columns: usize,
        wrap: Wrap,
    }

    impl Grid {
        fn new(text: &str, columns: usize) -> Grid {
            Grid {
                text: text.to_string(),
                columns,
                wrap: Wrap::Normal,
            }
        }

        fn cell(&self, index: usize) -> (usize, usize) {
            match self.wrap {
                Wrap::Normal => (index / self.columns, index % self.columns),
                Wrap::NoWrap => (0, index),
            }
        }
    }

    impl Surface for Grid {
        fn set_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn text(&self) -> &str {
            &self.text
        }

        fn set_font_size(&mut self, _: Px) {}

        fn set_line_height(&mut self, _: f32) {}

        fn set_margin_top(&mut self, _: Px) {}

        fn set_wrap(&mut self, wrap: Wrap) {
            self.wrap = wrap;
        }

        fn bounds(&mut self) -> Rect {
            let rows = match self.text.len() {
                0 => 0,
                len => self.cell(len - 1).0 + 1,
            };
            Rect::new(0.0, 0.0, self.columns as f64 * 10.0, rows as f64 * 10.0)
        }

        fn measure(&mut self, range: Range<usize>) -> Vec<Rect> {
            let mut rects: Vec<(usize, Rect)> = Vec::new();
            for index in range {
                let (row, column) = self.cell(index);
                let rect = Rect::new(column as f64 * 10.0, row as f64 * 10.0, 10.0, 10.0);
                match rects.last_mut() {
                    Some((last, line)) if *last == row => *line = line.union(&rect),
                    _ => rects.push((row, rect)),
                }
            }
            rects.into_iter().map(|(_, rect)| rect).collect()
        }
    }

    #[test]
    fn ellipsis_pushing_the_prefix_over_steps_back_a_word() {
        // two rows of ten fit; the last fitting word boundary is after "dddd "
        let text = "aaaa bbbb cccc dddd eeee";
        let mut surface = Grid::new(text, 10);
        let settings = Settings::resolve(Options::new(25.0).ellipsis("...")).expect("valid");
        let content_box = settings.content_box();
        assert_eq!(surface.span_bounds(15..20).map(|rect| rect.y2), Some(Px(20.0)));

        // "aaaa bbbb cccc dddd..." needs a third row, so "dddd" goes too
        let cut = truncate(&mut surface, &content_box, &settings);
        assert_eq!(surface.text(), "aaaa bbbb cccc...");
        assert_eq!(cut, Cut { kept: 14, leftover: vec![15..24] });
        assert!(block_fits(&mut surface, &content_box));
    }

    #[test]
    fn character_cut_steps_back_when_the_ellipsis_wraps() {
        // one character per row: ten rows reach the bottom of the content box, while
        // the chord of the circle leaves room for eight characters and the ellipsis
        let word = "abcdefghijkl";
        let mut surface = Grid::new(word, 1);
        let settings = Settings::resolve(Options::new(100.0).ellipsis("..")).expect("valid");
        let content_box = settings.content_box();

        let cut = truncate(&mut surface, &content_box, &settings);
        assert_eq!(surface.text(), "abcdefg..");
        assert_eq!(cut, Cut { kept: 7, leftover: vec![7..12] });
        assert!(block_fits(&mut surface, &content_box));
    }
}
