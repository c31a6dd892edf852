//! # Script events
//!
//! A control script stands in for the driver station: it can change the robot mode and replace
//! the state of the driver's controller.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ControllerState;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Operating mode of the robot, as set by the driver station.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotMode {
    Disabled,
    Autonomous,
    Teleop,
}

/// An event which occurs at a given time in a control script.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ScriptEvent {
    /// Change the robot mode.
    Mode(RobotMode),

    /// Replace the controller state, which is held until the next controller event.
    Controller(ControllerState),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum ScriptEventParseError {
    #[error("Event contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for RobotMode {
    fn default() -> Self {
        RobotMode::Disabled
    }
}

impl RobotMode {
    pub fn is_enabled(&self) -> bool {
        *self != RobotMode::Disabled
    }
}

impl ScriptEvent {
    /// Parse an event from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, ScriptEventParseError> {
        serde_json::from_str(json_str).map_err(ScriptEventParseError::InvalidJson)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::Button;

    #[test]
    fn test_event_from_json() {
        assert_eq!(
            ScriptEvent::from_json(r#"{"Mode": "Teleop"}"#).unwrap(),
            ScriptEvent::Mode(RobotMode::Teleop)
        );

        match ScriptEvent::from_json(r#"{"Controller": {"buttons": ["RightBumper"]}}"#) {
            Ok(ScriptEvent::Controller(s)) => assert!(s.button(Button::RightBumper)),
            r => panic!("Expected a controller event, got {:?}", r),
        }

        assert!(ScriptEvent::from_json(r#"{"Mode": "Test"}"#).is_err());
        assert!(ScriptEvent::from_json("not json").is_err());
    }
}
