use thiserror::Error;

/// All errors that the crate can generate. Every one of them is raised while
/// resolving options or loading fonts, before any text is measured; a text that
/// does not fit is reported through [`Meta::overflowed`](crate::Meta) instead.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("no valid shape size provided: size has to be a positive number")]
    /// The size is missing, zero, negative or not a finite number
    InvalidSize,

    #[error("origin has to be 'topleft' or 'center', got {0:?}")]
    /// The origin is not one of the recognised values
    InvalidOrigin(String),

    #[error("margin has to be a number between 0 and half the size, got {0}")]
    /// The margin is not a finite number, or leaves no room for text
    InvalidMargin(f32),

    #[error("{0} has to be a number or {{value, min?, max?}} with a positive value")]
    /// A font size or line height is malformed
    InvalidRange(&'static str),

    #[error(transparent)]
    /// [serde_json] failed to parse the options
    Options(#[from] serde_json::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}
