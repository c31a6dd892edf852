//! Intake subsystem

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use robot_if::eqpt::MotorController;
use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The intake, a single motor which can be run in, out, or stopped.
pub struct IntakeSubsystem<M> {
    motor: M,

    /// Magnitude of the motor output when running, between 0.0 and 1.0.
    power: f64,

    state: IntakeState,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeDirection {
    In,
    Out,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    Idle,
    Running(IntakeDirection),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl IntakeDirection {
    /// Get the direction from an "in" flag.
    pub fn from_in_flag(intake_in: bool) -> Self {
        if intake_in {
            IntakeDirection::In
        } else {
            IntakeDirection::Out
        }
    }
}

impl<M: MotorController> IntakeSubsystem<M> {
    /// Create the intake on the given motor. `power` is clamped to between 0.0 and 1.0.
    pub fn new(motor: M, power: f64) -> Self {
        let mut intake = Self {
            motor,
            power: 0.0,
            state: IntakeState::Idle,
        };
        intake.set_power(power);
        intake
    }

    /// Set the motor output used when running, takes effect on the next run. `power` is clamped
    /// to between 0.0 and 1.0.
    pub fn set_power(&mut self, power: f64) {
        self.power = util::maths::clamp(&power.abs(), &0.0, &1.0);
    }

    pub fn intake_in(&mut self) {
        self.run(IntakeDirection::In);
    }

    pub fn intake_out(&mut self) {
        self.run(IntakeDirection::Out);
    }

    pub fn run(&mut self, direction: IntakeDirection) {
        let power = match direction {
            IntakeDirection::In => self.power,
            IntakeDirection::Out => -self.power,
        };

        self.motor.set(power);
        self.transition(IntakeState::Running(direction));
    }

    pub fn stop(&mut self) {
        self.motor.stop_motor();
        self.transition(IntakeState::Idle);
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    fn transition(&mut self, state: IntakeState) {
        if state != self.state {
            debug!("Intake {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use robot_if::eqpt::sim::{MotorCall, SimMotor};

    #[test]
    fn test_intake_motor_calls() {
        let mut intake = IntakeSubsystem::new(SimMotor::new(0), 1.0);
        assert_eq!(intake.state(), IntakeState::Idle);

        intake.intake_in();
        assert_eq!(intake.state(), IntakeState::Running(IntakeDirection::In));
        intake.intake_out();
        assert_eq!(intake.state(), IntakeState::Running(IntakeDirection::Out));
        intake.stop();
        assert_eq!(intake.state(), IntakeState::Idle);

        assert_eq!(
            intake.motor().history(),
            &[MotorCall::Set(1.0), MotorCall::Set(-1.0), MotorCall::Stop]
        );
    }

    #[test]
    fn test_intake_power_clamped() {
        assert_eq!(IntakeSubsystem::new(SimMotor::new(0), 1.5).power(), 1.0);
        assert_eq!(IntakeSubsystem::new(SimMotor::new(0), -0.5).power(), 0.5);
    }

    #[test]
    fn test_direction_from_flag() {
        assert_eq!(IntakeDirection::from_in_flag(true), IntakeDirection::In);
        assert_eq!(IntakeDirection::from_in_flag(false), IntakeDirection::Out);
    }
}
