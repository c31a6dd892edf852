//! # Swerve drivetrain interface
//!
//! Kinematics, odometry and the module control loops all live in the vendor library. The robot
//! software only ever hands it a [`SwerveRequest`] describing what the chassis should do this
//! cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::UnitComplex;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A vendor swerve drivetrain.
pub trait SwerveDrivetrain {
    /// Apply a request to the drivetrain. The request is held until the next one is applied.
    fn apply_request(&mut self, request: &SwerveRequest);

    /// Take the current robot heading as the forward direction for field-centric driving.
    fn seed_field_centric(&mut self);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Field-centric drive request, X is forward and Y is left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCentric {
    /// Units: meters/second
    pub velocity_x_ms: f64,

    /// Units: meters/second
    pub velocity_y_ms: f64,

    /// Counter-clockwise positive.
    ///
    /// Units: radians/second
    pub rotational_rate_rads: f64,

    /// Translation demands smaller than this are ignored by the drivetrain.
    ///
    /// Units: meters/second
    pub deadband_ms: f64,

    /// Rotation demands smaller than this are ignored by the drivetrain.
    ///
    /// Units: radians/second
    pub rotational_deadband_rads: f64,

    /// How the drive motors should be controlled
    pub drive_request_type: DriveRequestType,
}

/// A system identification test for the vendor characterisation routine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SysIdTest {
    pub kind: SysIdKind,
    pub direction: SysIdDirection,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Requests understood by the drivetrain.
#[derive(Debug, Clone, PartialEq)]
pub enum SwerveRequest {
    /// Do nothing, modules coast.
    Idle,

    /// Drive relative to the field.
    FieldCentric(FieldCentric),

    /// Point all modules towards the centre of the robot to resist being pushed.
    Brake,

    /// Point all modules in the given direction without driving.
    PointWheelsAt { module_direction: UnitComplex<f64> },

    /// Run a characterisation test.
    SysId(SysIdTest),
}

/// Control mode for the drive motors.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveRequestType {
    /// Open-loop voltage control.
    OpenLoopVoltage,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysIdKind {
    /// Step voltage test.
    Dynamic,

    /// Slow ramp test.
    Quasistatic,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SysIdDirection {
    Forward,
    Reverse,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SwerveRequest {
    /// Build a point-wheels request from a direction vector in the robot frame.
    ///
    /// A zero vector points the wheels forward.
    pub fn point_wheels_towards(x: f64, y: f64) -> Self {
        let angle_rad = if x == 0.0 && y == 0.0 { 0.0 } else { y.atan2(x) };

        SwerveRequest::PointWheelsAt {
            module_direction: UnitComplex::new(angle_rad),
        }
    }
}

impl SysIdTest {
    pub fn new(kind: SysIdKind, direction: SysIdDirection) -> Self {
        Self { kind, direction }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_point_wheels_towards() {
        match SwerveRequest::point_wheels_towards(0.0, 1.0) {
            SwerveRequest::PointWheelsAt { module_direction } => {
                assert!((module_direction.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12)
            }
            r => panic!("Expected a point wheels request, got {:?}", r),
        }

        match SwerveRequest::point_wheels_towards(0.0, 0.0) {
            SwerveRequest::PointWheelsAt { module_direction } => {
                assert_eq!(module_direction.angle(), 0.0)
            }
            r => panic!("Expected a point wheels request, got {:?}", r),
        }
    }
}
