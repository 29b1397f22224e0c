use std::time::Instant;

use serde::Serialize;

use crate::layout::center::center_vertically;
use crate::layout::lines::{extract_lines, Hyphens, TextLine};
use crate::layout::overflow::resolve_overflow;
use crate::metrics::GlyphMetrics;
use crate::settings::{Options, Origin, Settings, VerticalAlign};
use crate::surface::{FlowSurface, Surface, Wrap};
use crate::units::Px;
use crate::FitError;

/// The text that was asked for and the part of it that did not make it in
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub full: String,
    /// Empty when everything fit
    pub leftover: String,
}

/// How the text was fitted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub font_family: String,
    pub origin: Origin,
    /// Font size the lines were laid out at
    pub font_size: f32,
    /// Line height the lines were laid out at, rounded to one decimal
    pub line_height: f32,
    /// Some of the text could not be fitted
    pub overflowed: bool,
    /// The font size, line height or text had to be changed to fit
    pub modified: bool,
    pub text: TextSummary,
}

/// Lines of text positioned inside the shape, top to bottom
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    pub lines: Vec<TextLine>,
    pub meta: Meta,
}

impl LayoutResult {
    /// A result without any lines, at the configured font settings
    pub fn empty(settings: &Settings) -> LayoutResult {
        LayoutResult {
            lines: Vec::new(),
            meta: Meta {
                font_family: settings.font_family.clone(),
                origin: settings.origin,
                font_size: settings.font_size.value,
                line_height: settings.line_height.value,
                overflowed: false,
                modified: false,
                text: TextSummary::default(),
            },
        }
    }
}

/// Fit `text` into the circle described by `options`, measuring glyphs with `metrics`.
///
/// Options are validated before anything is measured. Text that cannot be fitted
/// completely is not an error: it is shrunk and cut, and the result's
/// [`Meta`] reports what was done and what was left over.
///
/// ```
/// use shapefit::{shape_text, HeuristicMetrics, Options};
///
/// let mut options = Options::new(200.0);
/// options.font_size(24.0_f32);
///
/// let result = shape_text("Hello, circle", &options, HeuristicMetrics::default())
///     .expect("options are valid");
/// assert!(!result.meta.overflowed);
/// assert!(!result.lines.is_empty());
/// ```
pub fn shape_text<M: GlyphMetrics>(
    text: &str,
    options: &Options,
    metrics: M,
) -> Result<LayoutResult, FitError> {
    let settings = Settings::resolve(options)?;
    let mut surface = FlowSurface::for_settings(metrics, &settings);
    Ok(shape_text_on(&mut surface, text, &settings))
}

/// Fit `text` using a caller-provided [`Surface`] for layout and measurement.
///
/// Whatever was staged on the surface before is overwritten.
pub fn shape_text_on<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    settings: &Settings,
) -> LayoutResult {
    if text.is_empty() {
        return LayoutResult::empty(settings);
    }

    let started = Instant::now();
    let (staged, hyphens) = Hyphens::stage(text);
    let content_box = settings.content_box();

    surface.set_text(&staged);
    surface.set_font_size(Px(settings.font_size.value));
    surface.set_line_height(settings.line_height.value);
    surface.set_margin_top(Px::ZERO);
    surface.set_wrap(Wrap::Normal);

    let resolution = resolve_overflow(surface, &content_box, settings);
    if settings.debug {
        log::debug!("overflow resolved after {:?}", started.elapsed());
        if surface.text().is_empty() {
            log::error!(
                "the shape is too small to fit any part of the text at the given font settings"
            );
        }
    }

    if settings.vertical_align == VerticalAlign::Middle {
        let margin = center_vertically(surface, &content_box);
        if settings.debug {
            log::debug!("centred at {margin} after {:?}", started.elapsed());
        }
    }

    let lines = extract_lines(surface, settings, &hyphens.within(resolution.kept));
    if settings.debug {
        log::debug!("{} lines laid out in {:?}", lines.len(), started.elapsed());
    }

    let leftover: Vec<String> = resolution
        .leftover
        .iter()
        .map(|range| hyphens.restore(&staged[range.clone()], range.start))
        .collect();
    let leftover = leftover.join(" ");

    LayoutResult {
        lines,
        meta: Meta {
            font_family: settings.font_family.clone(),
            origin: settings.origin,
            font_size: resolution.font_size,
            line_height: resolution.line_height,
            overflowed: resolution.overflowed,
            modified: resolution.modified,
            text: TextSummary {
                full: text.to_string(),
                leftover,
            },
        },
    }
}
