//! Fit a run of text into a circle.
//!
//! Text is wrapped inside the circle line by line. When it does not fit, it is
//! degraded in a fixed order until it does: the font size shrinks, then the line
//! height, and finally the text is truncated with an optional ellipsis. The result
//! is a list of positioned [`TextLine`]s plus [`Meta`] describing what was changed,
//! ready to be drawn with any renderer (see [`format`] for HTML, SVG and canvas,
//! or [`shape_for_html`] and friends to fit and format in one call).
//!
//! Glyph widths come from a [`GlyphMetrics`] implementation: a real [`Font`], or
//! [`HeuristicMetrics`] when an estimate is good enough.
//!
//! ```
//! use shapefit::{shape_text, HeuristicMetrics, Options};
//!
//! let mut options = Options::new(250.0);
//! options.ellipsis(true);
//!
//! let result = shape_text("Hi", &options, HeuristicMetrics::default())
//!     .expect("options are valid");
//! assert_eq!(result.lines.len(), 1);
//! assert_eq!(result.lines[0].text, "Hi");
//! assert!(!result.meta.modified);
//! ```

mod error;
pub use error::*;

mod font;
pub use font::*;

mod metrics;
pub use metrics::*;

mod rect;
pub use rect::*;

mod settings;
pub use settings::*;

mod shape;
pub use shape::*;

mod surface;
pub use surface::*;

mod units;
pub use units::*;

/// Fitting text into a shape: overflow resolution, truncation, centring and line extraction
pub mod layout;
pub use layout::{shape_text, shape_text_on, LayoutResult, Meta, TextLine, TextSummary};

pub mod format;
pub use format::{shape_for_canvas, shape_for_html, shape_for_svg};
