//! # Driver input
//!
//! Controllers are polled once per cycle into a [`ControllerState`] snapshot, which is all the
//! rest of the software ever sees of them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Events which can be replayed from a control script
pub mod event;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub use event::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Snapshot of a controller taken at the start of a cycle.
///
/// Buttons not in `buttons` are released, axes not in `axes` are centred.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    #[serde(default)]
    pub buttons: HashSet<Button>,

    /// Normalised axis readings between -1.0 and +1.0.
    #[serde(default)]
    pub axes: HashMap<Axis, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Controller buttons. Gamepad buttons are named, flight stick buttons are numbered.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    LeftStick,
    RightStick,
    Joy(u8),
}

/// Controller axes.
///
/// Stick Y axes are negative when pushed forward, trigger axes run from 0.0 to 1.0.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
    JoyX,
    JoyY,
    JoyZ,
    JoyThrottle,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ControllerState {
    /// Is the button held down.
    pub fn button(&self, button: Button) -> bool {
        self.buttons.contains(&button)
    }

    /// Reading of the axis, zero if the axis wasn't reported.
    pub fn axis(&self, axis: Axis) -> f64 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.insert(button);
        self
    }

    pub fn with_axis(mut self, axis: Axis, value: f64) -> Self {
        self.axes.insert(axis, value);
        self
    }
}
