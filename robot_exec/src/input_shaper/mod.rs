//! # Input shaper
//!
//! Stick axes are passed through a deadzone, to ignore small unintentional movements, and then
//! squared, to give finer control at low speeds.
//!
//! ## Sign loss
//!
//! In [`ShapingMode::Literal`] the response curve is `input * input`, so a stick pushed in the
//! negative direction produces a *positive* output the same as one pushed in the positive
//! direction. This is how the robot has always driven and is kept as the default.
//! [`ShapingMode::SignPreserving`] uses `sign(input) * input * input` instead.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::maths::signed_square;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Half-width of the deadzone.
pub const DEFAULT_DEADZONE: f64 = 0.1;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Applies a deadzone and response curve to axis values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputShaper {
    deadzone: f64,
    mode: ShapingMode,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Response curve applied outside the deadzone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapingMode {
    /// `input * input`, the sign of the input is lost.
    Literal,

    /// `sign(input) * input * input`.
    SignPreserving,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Shape an axis value with the default deadzone and the literal response curve.
///
/// `input` is expected to be between -1.0 and 1.0, this is not checked.
pub fn shape(input: f64) -> f64 {
    InputShaper::default().shape(input)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl InputShaper {
    pub fn new(deadzone: f64, mode: ShapingMode) -> Self {
        Self { deadzone, mode }
    }

    /// Shape an axis value.
    ///
    /// Inputs with `0 < |input| <= deadzone` give zero.
    pub fn shape(&self, input: f64) -> f64 {
        let magnitude = input.abs();

        if magnitude > 0.0 && magnitude <= self.deadzone {
            return 0.0;
        }

        match self.mode {
            ShapingMode::Literal => input * input,
            ShapingMode::SignPreserving => signed_square(input),
        }
    }
}

impl Default for InputShaper {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE, ShapingMode::Literal)
    }
}
