use derive_more::{
    Add, AddAssign, Display, Div, From, Into, Mul, MulAssign, Neg, Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};

/// A length in CSS pixels, the unit every measurement in this crate is expressed in.
///
/// Scaling by a plain `f32` is supported (`Px(16.0) * 1.2`), as are sums and
/// differences of two lengths.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Neg,
    Sum,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{_0}px")]
#[serde(transparent)]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);

    pub fn abs(self) -> Px {
        Px(self.0.abs())
    }

    /// Drops the fractional part, rounding towards zero
    pub fn trunc(self) -> Px {
        Px(self.0.trunc())
    }

    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }
}

impl From<f64> for Px {
    fn from(value: f64) -> Self {
        Px(value as f32)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value as f32)
    }
}
