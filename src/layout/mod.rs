//! Fitting text into a shape.
//!
//! A layout runs in fixed stages over a [`Surface`](crate::Surface) the text is staged on:
//!
//! 1. the options are resolved into [`Settings`](crate::Settings); invalid options
//!    fail here, before anything is measured
//! 2. if the text overflows, the font size shrinks towards its `min`, then the line
//!    height towards its `min`, and whatever still does not fit is truncated, word by
//!    word and then character by character
//! 3. the text block is centred vertically when `vertical_align` is `middle`
//! 4. the lines are read back off the surface as [`TextLine`]s
//!
//! # Example
//!
//! ```
//! use shapefit::{shape_text, HeuristicMetrics, Options, SizeInput};
//!
//! let mut options = Options::new(120.0);
//! options.font_size(SizeInput::shrinking(24.0, 10.0)).ellipsis(true);
//!
//! let text = "Far out in the uncharted backwaters of the unfashionable end \
//!             of the western spiral arm";
//! let result = shape_text(text, &options, HeuristicMetrics::default())
//!     .expect("options are valid");
//!
//! assert!(result.meta.modified);
//! assert!(result.meta.font_size <= 24.0);
//! for line in &result.lines {
//!     println!("{:>8.2} {:>8.2} {}", line.x.0, line.y.0, line.text);
//! }
//! ```

mod center;
mod lines;
mod margins;
mod overflow;
mod shaper;
mod truncate;

pub use lines::TextLine;
pub use margins::*;
pub use shaper::*;
