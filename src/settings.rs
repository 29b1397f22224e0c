//! Options as callers provide them, and the validated settings a layout runs on.
//!
//! [`Options`] mirrors a loosely-typed configuration object: every field is optional
//! and it can be deserialized from JSON with camelCase keys. [`Settings::resolve`]
//! validates it once, up front; nothing is measured before it succeeds.

use crate::layout::Margins;
use crate::rect::Rect;
use crate::shape::Circle;
use crate::units::Px;
use crate::FitError;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Marker appended to truncated text when `ellipsis` is `true`
pub const ELLIPSIS: &str = "…";

const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_LINE_HEIGHT: f32 = 1.2;
const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Where the coordinates of the produced lines are measured from
#[derive(Debug, Default, Display, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The top-left corner of the shape's bounding box
    #[default]
    #[display("topleft")]
    TopLeft,
    /// The centre of the shape
    #[display("center")]
    Center,
}

impl std::str::FromStr for Origin {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topleft" => Ok(Origin::TopLeft),
            "center" => Ok(Origin::Center),
            other => Err(FitError::InvalidOrigin(other.to_string())),
        }
    }
}

/// Vertical placement, used both for the text block and for the text baseline
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Horizontal placement, used both for lines within the shape and for text anchors
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Start,
    Center,
    End,
}

/// A font size or line height as given by the caller: either a bare value, or a
/// value with an optional floor (`min`) that enables shrinking
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SizeInput {
    Value(f32),
    Range {
        value: f32,
        #[serde(default)]
        min: Option<f32>,
        #[serde(default)]
        max: Option<f32>,
    },
}

impl From<f32> for SizeInput {
    fn from(value: f32) -> Self {
        SizeInput::Value(value)
    }
}

impl SizeInput {
    /// A value that may shrink down to `min`
    pub fn shrinking(value: f32, min: f32) -> SizeInput {
        SizeInput::Range {
            value,
            min: Some(min),
            max: None,
        }
    }
}

/// The ellipsis option: `true` for [`ELLIPSIS`], `false` to clip, or a custom marker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Ellipsis {
    Enabled(bool),
    Marker(String),
}

impl From<bool> for Ellipsis {
    fn from(enabled: bool) -> Self {
        Ellipsis::Enabled(enabled)
    }
}

impl From<&str> for Ellipsis {
    fn from(marker: &str) -> Self {
        Ellipsis::Marker(marker.to_string())
    }
}

impl Ellipsis {
    fn resolve(&self) -> String {
        match self {
            Ellipsis::Marker(marker) => marker.clone(),
            Ellipsis::Enabled(true) => ELLIPSIS.to_string(),
            Ellipsis::Enabled(false) => String::new(),
        }
    }
}

/// User-provided layout options. Only `size` is required.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Diameter of the circle
    pub size: Option<f32>,
    /// Distance kept between the text and the outline
    pub margin: Option<f32>,
    pub font_size: Option<SizeInput>,
    /// Line height, as a multiple of the font size
    pub line_height: Option<SizeInput>,
    pub font_family: Option<String>,
    pub ellipsis: Option<Ellipsis>,
    /// `"topleft"` or `"center"`
    pub origin: Option<String>,
    pub vertical_align: Option<VerticalAlign>,
    pub horizontal_align: Option<HorizontalAlign>,
    pub text_baseline: Option<VerticalAlign>,
    pub text_align: Option<HorizontalAlign>,
    /// Log diagnostics and timings while laying out
    pub debug: bool,
}

impl Options {
    /// Create options for a circle of the given diameter, everything else defaulted
    pub fn new(size: f32) -> Options {
        Options {
            size: Some(size),
            ..Options::default()
        }
    }

    /// Parse options from a JSON object such as
    /// `{"size": 250, "fontSize": {"value": 20, "min": 12}}`
    pub fn from_json(json: &str) -> Result<Options, FitError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn margin(&mut self, margin: f32) -> &mut Self {
        self.margin = Some(margin);
        self
    }

    pub fn font_size<S: Into<SizeInput>>(&mut self, font_size: S) -> &mut Self {
        self.font_size = Some(font_size.into());
        self
    }

    pub fn line_height<S: Into<SizeInput>>(&mut self, line_height: S) -> &mut Self {
        self.line_height = Some(line_height.into());
        self
    }

    pub fn font_family<S: ToString>(&mut self, font_family: S) -> &mut Self {
        self.font_family = Some(font_family.to_string());
        self
    }

    pub fn ellipsis<E: Into<Ellipsis>>(&mut self, ellipsis: E) -> &mut Self {
        self.ellipsis = Some(ellipsis.into());
        self
    }

    pub fn origin(&mut self, origin: Origin) -> &mut Self {
        self.origin = Some(origin.to_string());
        self
    }

    pub fn vertical_align(&mut self, align: VerticalAlign) -> &mut Self {
        self.vertical_align = Some(align);
        self
    }

    pub fn horizontal_align(&mut self, align: HorizontalAlign) -> &mut Self {
        self.horizontal_align = Some(align);
        self
    }

    pub fn text_baseline(&mut self, baseline: VerticalAlign) -> &mut Self {
        self.text_baseline = Some(baseline);
        self
    }

    pub fn text_align(&mut self, align: HorizontalAlign) -> &mut Self {
        self.text_align = Some(align);
        self
    }

    pub fn debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }
}

/// A starting value with an optional floor. `max` is accepted and validated but
/// nothing grows towards it.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SizeRange {
    pub value: f32,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl SizeRange {
    fn resolve(
        input: Option<SizeInput>,
        default: f32,
        name: &'static str,
    ) -> Result<SizeRange, FitError> {
        let (value, min, max) = match input {
            None => (default, None, None),
            Some(SizeInput::Value(value)) => (value, None, None),
            Some(SizeInput::Range { value, min, max }) => (value, min, max),
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(FitError::InvalidRange(name));
        }

        Ok(SizeRange {
            value,
            min: min.filter(|&min| min > 0.0 && min < value),
            max: max.filter(|&max| max.is_finite() && max > value),
        })
    }
}

/// Validated, canonical layout settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub size: Px,
    pub margin: Px,
    pub font_size: SizeRange,
    pub line_height: SizeRange,
    pub font_family: String,
    /// Resolved marker; empty means truncated text is clipped without one
    pub ellipsis: String,
    pub origin: Origin,
    pub vertical_align: VerticalAlign,
    pub horizontal_align: HorizontalAlign,
    pub text_baseline: VerticalAlign,
    pub text_align: HorizontalAlign,
    pub debug: bool,
}

impl Settings {
    /// Validate user options and fill in the defaults
    pub fn resolve(options: &Options) -> Result<Settings, FitError> {
        let size = options
            .size
            .filter(|size| size.is_finite() && *size > 0.0)
            .ok_or(FitError::InvalidSize)?;

        let origin = match options.origin.as_deref() {
            Some(origin) => origin.parse()?,
            None => Origin::default(),
        };

        let margin = options.margin.unwrap_or(0.0);
        if !margin.is_finite() || margin < 0.0 || margin >= size / 2.0 {
            return Err(FitError::InvalidMargin(margin));
        }

        Ok(Settings {
            size: Px(size),
            margin: Px(margin),
            font_size: SizeRange::resolve(options.font_size, DEFAULT_FONT_SIZE, "fontSize")?,
            line_height: SizeRange::resolve(
                options.line_height,
                DEFAULT_LINE_HEIGHT,
                "lineHeight",
            )?,
            font_family: options
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            ellipsis: options
                .ellipsis
                .as_ref()
                .map(Ellipsis::resolve)
                .unwrap_or_default(),
            origin,
            vertical_align: options.vertical_align.unwrap_or(VerticalAlign::Middle),
            horizontal_align: options.horizontal_align.unwrap_or(HorizontalAlign::Center),
            text_baseline: options.text_baseline.unwrap_or(VerticalAlign::Top),
            text_align: options.text_align.unwrap_or(HorizontalAlign::Start),
            debug: options.debug,
        })
    }

    /// The shape the text is wrapped inside of
    pub fn shape(&self) -> Circle {
        Circle::new(self.size, Margins::all(self.margin))
    }

    /// The shape's bounding box inset by the margin
    pub fn content_box(&self) -> Rect {
        let container = Rect::new(Px::ZERO, Px::ZERO, self.size, self.size);
        Margins::all(self.margin).inset(&container)
    }
}

impl TryFrom<&Options> for Settings {
    type Error = FitError;

    fn try_from(options: &Options) -> Result<Self, Self::Error> {
        Settings::resolve(options)
    }
}
