//! # Simulated equipment
//!
//! Stand-ins for the vendor hardware which record everything they're asked to do.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;

use super::{MotorController, SwerveDrivetrain, SwerveRequest};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A simulated motor controller.
#[derive(Debug, Default)]
pub struct SimMotor {
    can_id: u8,

    history: Vec<MotorCall>,
}

/// A simulated swerve drivetrain.
#[derive(Debug)]
pub struct SimDrivetrain {
    last_request: SwerveRequest,
    num_requests: u64,
    num_seeds: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A call made on a [`SimMotor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCall {
    Set(f64),
    Stop,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimMotor {
    pub fn new(can_id: u8) -> Self {
        Self {
            can_id,
            ..Default::default()
        }
    }

    /// Every call made on this motor, oldest first.
    pub fn history(&self) -> &[MotorCall] {
        &self.history
    }

    /// Number of times the motor has been stopped.
    pub fn num_stops(&self) -> usize {
        self.history.iter().filter(|c| **c == MotorCall::Stop).count()
    }
}

impl MotorController for SimMotor {
    fn set(&mut self, power: f64) {
        trace!("SimMotor {}: set({:.3})", self.can_id, power);
        self.history.push(MotorCall::Set(power));
    }

    fn stop_motor(&mut self) {
        trace!("SimMotor {}: stop", self.can_id);
        self.history.push(MotorCall::Stop);
    }
}

impl SimDrivetrain {
    pub fn new() -> Self {
        Self {
            last_request: SwerveRequest::Idle,
            num_requests: 0,
            num_seeds: 0,
        }
    }

    /// The request most recently applied, [`SwerveRequest::Idle`] if none has been.
    pub fn last_request(&self) -> &SwerveRequest {
        &self.last_request
    }

    pub fn num_requests(&self) -> u64 {
        self.num_requests
    }

    /// Number of times the field-centric heading has been seeded.
    pub fn num_seeds(&self) -> u64 {
        self.num_seeds
    }
}

impl Default for SimDrivetrain {
    fn default() -> Self {
        Self::new()
    }
}

impl SwerveDrivetrain for SimDrivetrain {
    fn apply_request(&mut self, request: &SwerveRequest) {
        trace!("SimDrivetrain: {:?}", request);
        self.last_request = request.clone();
        self.num_requests += 1;
    }

    fn seed_field_centric(&mut self) {
        trace!("SimDrivetrain: field-centric heading seeded");
        self.num_seeds += 1;
    }
}
