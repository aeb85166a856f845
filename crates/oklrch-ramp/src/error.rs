//! Errors raised while generating a ramp.
//!
//! Gamut queries never fail (a non-finite color is simply not
//! displayable); only ramp generation rejects its input.

use std::error::Error;
use std::fmt;

/// Input the generator refuses to work with.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// No rails were given, so there is nothing to anchor.
    EmptyRails,

    /// A seed component is non-finite or outside its range.
    Seed { component: &'static str, value: f64 },

    /// A rail is non-finite or outside `0..=100`.
    Rail { index: usize, value: f64 },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRails => write!(f, "at least one lightness rail is required"),
            Self::Seed { component, value } => {
                write!(f, "seed {component} {value} is out of range")
            }
            Self::Rail { index, value } => {
                write!(f, "rail {index} ({value}) must be a lightness between 0 and 100")
            }
        }
    }
}

impl Error for InvalidInput {}

/// Error returned by the ramp generators.
#[derive(Debug, Clone, PartialEq)]
pub enum RampError {
    InvalidInput(InvalidInput),

    /// The color difference to the swatch at `index` came out NaN.
    NonFiniteDistance { index: usize },
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(inner) => write!(f, "invalid input: {inner}"),
            Self::NonFiniteDistance { index } => {
                write!(f, "color difference to swatch {index} is not a number")
            }
        }
    }
}

impl Error for RampError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(inner) => Some(inner),
            Self::NonFiniteDistance { .. } => None,
        }
    }
}

impl From<InvalidInput> for RampError {
    fn from(err: InvalidInput) -> Self {
        Self::InvalidInput(err)
    }
}
