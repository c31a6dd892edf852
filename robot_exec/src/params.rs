//! # Robot Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use std::time::Duration;

use crate::{bindings::ControllerLayout, input_shaper::ShapingMode, robot::RobotError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Longest cycle period accepted.
///
/// Units: seconds
pub const MAX_CYCLE_PERIOD_S: f64 = 1.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the robot executable, loaded from `robot_exec.toml`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RobotExecParams {
    /// Target period of one control cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Which controller the driver is using
    pub controller_layout: ControllerLayout,

    pub shaper: ShaperParams,

    pub drive: DriveParams,

    pub intake: IntakeParams,
}

/// Parameters for the stick input shaper.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ShaperParams {
    /// Half-width of the deadzone, as a fraction of full stick travel.
    pub deadzone: f64,

    /// Response curve outside the deadzone.
    pub mode: ShapingMode,
}

/// Parameters for driver control of the drivetrain.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DriveParams {
    /// Top speed of the robot with 12 V applied to the drive motors.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Top rotation rate the driver may demand.
    ///
    /// Units: rotations/second
    pub max_angular_rate_rps: f64,

    /// Fraction of the top speed available for translation.
    pub translation_scale: f64,

    /// Fraction of the top speed (and rotation rate) below which the drivetrain ignores demands.
    pub deadband_frac: f64,
}

/// Parameters for the intake.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct IntakeParams {
    /// CAN ID of the intake motor controller.
    pub motor_can_id: u8,

    /// Motor output when running, between 0.0 and 1.0.
    pub power: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for RobotExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.02,
            controller_layout: ControllerLayout::Xbox,
            shaper: ShaperParams {
                deadzone: crate::input_shaper::DEFAULT_DEADZONE,
                mode: ShapingMode::Literal,
            },
            drive: DriveParams {
                max_speed_ms: 4.73,
                max_angular_rate_rps: 1.0,
                translation_scale: 0.8,
                deadband_frac: 0.1,
            },
            intake: IntakeParams {
                motor_can_id: 0,
                power: 1.0,
            },
        }
    }
}

impl RobotExecParams {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), RobotError> {
        let checks = [
            (
                self.cycle_period_s > 0.0 && self.cycle_period_s <= MAX_CYCLE_PERIOD_S,
                "cycle_period_s must be in (0.0, 1.0]",
            ),
            (
                (0.0..1.0).contains(&self.shaper.deadzone),
                "shaper.deadzone must be between 0.0 and 1.0",
            ),
            (self.drive.max_speed_ms > 0.0, "drive.max_speed_ms must be positive"),
            (
                self.drive.max_angular_rate_rps > 0.0,
                "drive.max_angular_rate_rps must be positive",
            ),
            (
                self.drive.translation_scale > 0.0 && self.drive.translation_scale <= 1.0,
                "drive.translation_scale must be in (0.0, 1.0]",
            ),
            (
                (0.0..1.0).contains(&self.drive.deadband_frac),
                "drive.deadband_frac must be between 0.0 and 1.0",
            ),
            (
                self.intake.power > 0.0 && self.intake.power <= 1.0,
                "intake.power must be in (0.0, 1.0]",
            ),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, msg)) => Err(RobotError::InvalidParams(msg.to_string())),
            None => Ok(()),
        }
    }
}

impl RobotExecParams {
    /// The cycle period as a duration, failing on periods which can't be represented.
    pub fn cycle_period(&self) -> Result<Duration, RobotError> {
        Duration::try_from_secs_f64(self.cycle_period_s).map_err(|e| {
            RobotError::InvalidParams(format!("cycle_period_s of {} is invalid: {}", self.cycle_period_s, e))
        })
    }
}

impl DriveParams {
    /// Units: radians/second
    pub fn max_angular_rate_rads(&self) -> f64 {
        self.max_angular_rate_rps * std::f64::consts::TAU
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_params() {
        let params: RobotExecParams = util::params::from_str(
            r#"
            cycle_period_s = 0.02
            controller_layout = "Joystick"

            [shaper]
            deadzone = 0.1
            mode = "SignPreserving"

            [drive]
            max_speed_ms = 4.73
            max_angular_rate_rps = 1.0
            translation_scale = 0.8
            deadband_frac = 0.1

            [intake]
            motor_can_id = 3
            power = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(params.controller_layout, ControllerLayout::Joystick);
        assert_eq!(params.shaper.mode, ShapingMode::SignPreserving);
        assert_eq!(params.intake.motor_can_id, 3);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_missing_table() {
        let result: Result<RobotExecParams, _> = util::params::from_str(
            r#"
            cycle_period_s = 0.02
            controller_layout = "Xbox"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(RobotExecParams::default().validate().is_ok());

        let mut params = RobotExecParams::default();
        params.shaper.deadzone = 1.0;
        assert!(matches!(params.validate(), Err(RobotError::InvalidParams(_))));

        let mut params = RobotExecParams::default();
        params.intake.power = 0.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_bad_cycle_period() {
        for period in [-0.02, 0.0, 5.0, f64::NAN, f64::INFINITY, 1e300] {
            let mut params = RobotExecParams::default();
            params.cycle_period_s = period;
            assert!(
                matches!(params.validate(), Err(RobotError::InvalidParams(_))),
                "{} accepted",
                period
            );
        }

        let mut params = RobotExecParams::default();
        params.cycle_period_s = -0.02;
        assert!(matches!(params.cycle_period(), Err(RobotError::InvalidParams(_))));
        params.cycle_period_s = f64::NAN;
        assert!(params.cycle_period().is_err());

        assert_eq!(
            RobotExecParams::default().cycle_period().unwrap(),
            Duration::from_millis(20)
        );
    }
}
