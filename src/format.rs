//! Renderer-specific views of a [`LayoutResult`].
//!
//! The layout itself is renderer-agnostic: lines carry the top-left corner of their
//! glyph box. These adapters turn that into what HTML, SVG and the canvas 2D API
//! expect, including the anchor and baseline adjustments for `text_align` and
//! `text_baseline`. Every view serializes to the JSON shape a browser-side renderer
//! can consume directly.

use serde::Serialize;

use crate::error::FitError;
use crate::layout::{shape_text_on, LayoutResult, TextLine, TextSummary};
use crate::metrics::GlyphMetrics;
use crate::settings::{HorizontalAlign, Options, Origin, Settings, VerticalAlign};
use crate::surface::FlowSurface;

/// Move a line's anchor point from its top-left corner to where `text_align` and
/// `text_baseline` expect it
fn anchor(line: &TextLine, settings: &Settings) -> (f32, f32) {
    let mut x = line.x.0;
    let mut y = line.y.0;
    match settings.text_align {
        HorizontalAlign::Start => {}
        HorizontalAlign::Center => x += line.width.0 / 2.0,
        HorizontalAlign::End => x += line.width.0,
    }
    match settings.text_baseline {
        VerticalAlign::Top => {}
        VerticalAlign::Middle => y += line.height.0 / 2.0,
        VerticalAlign::Bottom => y += line.height.0,
    }
    (x, y)
}

/// CSS shorthand for the fitted font, e.g. `16px Arial, sans-serif`
fn css_font(result: &LayoutResult) -> String {
    format!("{}px {}", result.meta.font_size, result.meta.font_family)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlLineStyle {
    pub position: &'static str,
    pub left: String,
    pub top: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlLine {
    pub text: String,
    pub style: HtmlLineStyle,
}

/// Style for the element holding the absolutely positioned lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlContainerStyle {
    pub position: &'static str,
    pub top: String,
    pub left: String,
    #[serde(rename = "font-family")]
    pub font_family: String,
    #[serde(rename = "font-size")]
    pub font_size: String,
    #[serde(rename = "line-height")]
    pub line_height: u8,
    #[serde(rename = "white-space")]
    pub white_space: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMeta {
    pub font: String,
    pub line_height: String,
    pub overflowed: bool,
    pub modified: bool,
    pub text: TextSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlOutput {
    pub lines: Vec<HtmlLine>,
    pub container_style: HtmlContainerStyle,
    pub meta: HtmlMeta,
}

/// Absolutely positioned lines inside a container the size of the shape
pub fn format_for_html(result: &LayoutResult, settings: &Settings) -> HtmlOutput {
    let offset = match result.meta.origin {
        Origin::TopLeft => "0".to_string(),
        Origin::Center => format!("{}px", settings.size.0 / 2.0),
    };

    HtmlOutput {
        lines: result
            .lines
            .iter()
            .map(|line| HtmlLine {
                text: line.text.clone(),
                style: HtmlLineStyle {
                    position: "absolute",
                    left: format!("{:.2}px", line.x.0),
                    top: format!("{:.2}px", line.y.0),
                },
            })
            .collect(),
        container_style: HtmlContainerStyle {
            position: "absolute",
            top: offset.clone(),
            left: offset,
            font_family: result.meta.font_family.clone(),
            font_size: format!("{}px", result.meta.font_size),
            line_height: 1,
            white_space: "nowrap",
        },
        meta: HtmlMeta {
            font: format!("{}px {}", result.meta.font_size, settings.font_family),
            line_height: result.meta.line_height.to_string(),
            overflowed: result.meta.overflowed,
            modified: result.meta.modified,
            text: result.meta.text.clone(),
        },
    }
}

/// Values of the SVG `text-anchor` attribute
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl From<HorizontalAlign> for TextAnchor {
    fn from(align: HorizontalAlign) -> Self {
        match align {
            HorizontalAlign::Start => TextAnchor::Start,
            HorizontalAlign::Center => TextAnchor::Middle,
            HorizontalAlign::End => TextAnchor::End,
        }
    }
}

/// Values of the SVG `dominant-baseline` attribute
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantBaseline {
    Hanging,
    Middle,
    Ideographic,
}

impl From<VerticalAlign> for DominantBaseline {
    fn from(baseline: VerticalAlign) -> Self {
        match baseline {
            VerticalAlign::Top => DominantBaseline::Hanging,
            VerticalAlign::Middle => DominantBaseline::Middle,
            VerticalAlign::Bottom => DominantBaseline::Ideographic,
        }
    }
}

/// Attributes of a `<text>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgAttrs {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "font-family")]
    pub font_family: String,
    #[serde(rename = "font-size")]
    pub font_size: f32,
    #[serde(rename = "text-anchor")]
    pub text_anchor: TextAnchor,
    #[serde(rename = "dominant-baseline")]
    pub dominant_baseline: DominantBaseline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgLine {
    pub text: String,
    pub attrs: SvgAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgMeta {
    pub font_size: f32,
    pub font_family: String,
    pub line_height: f32,
    pub overflowed: bool,
    pub modified: bool,
    pub text_anchor: TextAnchor,
    pub dominant_baseline: DominantBaseline,
    pub text: TextSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgOutput {
    pub lines: Vec<SvgLine>,
    pub meta: SvgMeta,
}

/// One `<text>` element per line
pub fn format_for_svg(result: &LayoutResult, settings: &Settings) -> SvgOutput {
    let text_anchor = TextAnchor::from(settings.text_align);
    let dominant_baseline = DominantBaseline::from(settings.text_baseline);

    SvgOutput {
        lines: result
            .lines
            .iter()
            .map(|line| {
                let (x, y) = anchor(line, settings);
                SvgLine {
                    text: line.text.clone(),
                    attrs: SvgAttrs {
                        x,
                        y,
                        font_family: result.meta.font_family.clone(),
                        font_size: result.meta.font_size,
                        text_anchor,
                        dominant_baseline,
                    },
                }
            })
            .collect(),
        meta: SvgMeta {
            font_size: result.meta.font_size,
            font_family: result.meta.font_family.clone(),
            line_height: result.meta.line_height,
            overflowed: result.meta.overflowed,
            modified: result.meta.modified,
            text_anchor,
            dominant_baseline,
            text: result.meta.text.clone(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Context state to set before the `fillText` calls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMeta {
    pub font: String,
    pub text_align: HorizontalAlign,
    pub text_baseline: VerticalAlign,
    pub overflowed: bool,
    pub modified: bool,
    pub text: TextSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasOutput {
    pub lines: Vec<CanvasLine>,
    pub meta: CanvasMeta,
}

/// One `fillText` call per line
pub fn format_for_canvas(result: &LayoutResult, settings: &Settings) -> CanvasOutput {
    CanvasOutput {
        lines: result
            .lines
            .iter()
            .map(|line| {
                let (x, y) = anchor(line, settings);
                CanvasLine {
                    text: line.text.clone(),
                    x,
                    y,
                }
            })
            .collect(),
        meta: CanvasMeta {
            font: css_font(result),
            text_align: settings.text_align,
            text_baseline: settings.text_baseline,
            overflowed: result.meta.overflowed,
            modified: result.meta.modified,
            text: result.meta.text.clone(),
        },
    }
}

fn shape_and_format<M: GlyphMetrics, T>(
    text: &str,
    options: &Options,
    metrics: M,
    format: fn(&LayoutResult, &Settings) -> T,
) -> Result<T, FitError> {
    let settings = Settings::resolve(options)?;
    let mut surface = FlowSurface::for_settings(metrics, &settings);
    let result = shape_text_on(&mut surface, text, &settings);
    Ok(format(&result, &settings))
}

/// Fit `text` and format it for HTML in one go. Invalid options are rejected
/// before anything is measured.
///
/// ```
/// use shapefit::{shape_for_html, HeuristicMetrics, Options};
///
/// let html = shape_for_html("Hi", &Options::new(100.0), HeuristicMetrics::default())
///     .expect("options are valid");
/// assert_eq!(html.lines[0].style.position, "absolute");
/// ```
pub fn shape_for_html<M: GlyphMetrics>(
    text: &str,
    options: &Options,
    metrics: M,
) -> Result<HtmlOutput, FitError> {
    shape_and_format(text, options, metrics, format_for_html)
}

/// Fit `text` and format it as SVG `<text>` elements
pub fn shape_for_svg<M: GlyphMetrics>(
    text: &str,
    options: &Options,
    metrics: M,
) -> Result<SvgOutput, FitError> {
    shape_and_format(text, options, metrics, format_for_svg)
}

/// Fit `text` and format it as canvas `fillText` calls
pub fn shape_for_canvas<M: GlyphMetrics>(
    text: &str,
    options: &Options,
    metrics: M,
) -> Result<CanvasOutput, FitError> {
    shape_and_format(text, options, metrics, format_for_canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{shape_text, Meta};
    use crate::metrics::HeuristicMetrics;
    use crate::units::Px;
    use pretty_assertions::assert_eq;

    fn result(origin: Origin) -> LayoutResult {
        LayoutResult {
            lines: vec![TextLine {
                text: "Hello".to_string(),
                x: Px(10.0),
                y: Px(20.5),
                width: Px(40.0),
                height: Px(16.0),
            }],
            meta: Meta {
                font_family: "Georgia".to_string(),
                origin,
                font_size: 16.0,
                line_height: 1.2,
                overflowed: false,
                modified: false,
                text: TextSummary {
                    full: "Hello".to_string(),
                    leftover: String::new(),
                },
            },
        }
    }

    fn settings(options: &Options) -> Settings {
        Settings::resolve(options).expect("valid options")
    }

    #[test]
    fn html_positions_lines_absolutely() {
        let settings = settings(Options::new(100.0).font_family("Georgia"));
        let html = format_for_html(&result(Origin::TopLeft), &settings);
        assert_eq!(
            html.lines[0].style,
            HtmlLineStyle {
                position: "absolute",
                left: "10.00px".to_string(),
                top: "20.50px".to_string(),
            }
        );
        assert_eq!(html.container_style.top, "0");
        assert_eq!(html.container_style.font_size, "16px");
        assert_eq!(html.meta.font, "16px Georgia");
        assert_eq!(html.meta.line_height, "1.2");

        let centred = format_for_html(&result(Origin::Center), &settings);
        assert_eq!(centred.container_style.left, "50px");

        let json = serde_json::to_value(&html).expect("serializes");
        assert_eq!(json["containerStyle"]["white-space"], "nowrap");
        assert_eq!(json["containerStyle"]["line-height"], 1);
    }

    #[test]
    fn svg_anchors_follow_alignment() {
        let settings = settings(
            Options::new(100.0)
                .text_align(HorizontalAlign::Center)
                .text_baseline(VerticalAlign::Bottom),
        );
        let svg = format_for_svg(&result(Origin::TopLeft), &settings);
        let attrs = &svg.lines[0].attrs;
        assert_eq!((attrs.x, attrs.y), (30.0, 36.5));
        assert_eq!(attrs.text_anchor, TextAnchor::Middle);
        assert_eq!(attrs.dominant_baseline, DominantBaseline::Ideographic);

        let json = serde_json::to_value(&svg).expect("serializes");
        assert_eq!(json["lines"][0]["attrs"]["text-anchor"], "middle");
        assert_eq!(json["meta"]["dominantBaseline"], "ideographic");
    }

    #[test]
    fn canvas_uses_context_state() {
        let settings = settings(
            Options::new(100.0)
                .text_align(HorizontalAlign::End)
                .text_baseline(VerticalAlign::Middle),
        );
        let canvas = format_for_canvas(&result(Origin::TopLeft), &settings);
        assert_eq!(
            canvas.lines,
            vec![CanvasLine {
                text: "Hello".to_string(),
                x: 50.0,
                y: 28.5,
            }]
        );
        assert_eq!(canvas.meta.font, "16px Georgia");

        let json = serde_json::to_value(&canvas.meta).expect("serializes");
        assert_eq!(json["textAlign"], "end");
        assert_eq!(json["textBaseline"], "middle");
    }

    #[test]
    fn one_call_entry_points_match_the_two_step_path() {
        let text = "The quick brown fox jumps over the lazy dog";
        let mut options = Options::new(120.0);
        options
            .font_size(crate::settings::SizeInput::shrinking(20.0, 8.0))
            .text_align(HorizontalAlign::Center)
            .ellipsis(true);
        let settings = settings(&options);
        let result = shape_text(text, &options, HeuristicMetrics::default()).expect("valid");

        let html = shape_for_html(text, &options, HeuristicMetrics::default()).expect("valid");
        assert_eq!(html, format_for_html(&result, &settings));

        let svg = shape_for_svg(text, &options, HeuristicMetrics::default()).expect("valid");
        assert_eq!(svg, format_for_svg(&result, &settings));

        let canvas = shape_for_canvas(text, &options, HeuristicMetrics::default()).expect("valid");
        assert_eq!(canvas, format_for_canvas(&result, &settings));
        assert_eq!(canvas.lines.len(), result.lines.len());
    }

    #[test]
    fn one_call_entry_points_reject_invalid_options() {
        let options = Options::new(100.0).margin(60.0).clone();
        let metrics = HeuristicMetrics::default();
        assert!(matches!(
            shape_for_html("Hi", &options, metrics),
            Err(FitError::InvalidMargin(_))
        ));
        assert!(matches!(
            shape_for_svg("Hi", &options, metrics),
            Err(FitError::InvalidMargin(_))
        ));
        assert!(matches!(
            shape_for_canvas("Hi", &options, metrics),
            Err(FitError::InvalidMargin(_))
        ));
    }
}
