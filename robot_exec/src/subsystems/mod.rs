//! # Subsystems
//!
//! Each subsystem owns exactly one hardware handle, injected at construction. Commands act on the
//! hardware only through the subsystems, and only while they own them (see
//! [`cmd_sched`](crate::cmd_sched)).

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod drivetrain;
mod intake;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use drivetrain::*;
pub use intake::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// All subsystems on the robot.
pub struct Subsystems<M, D> {
    pub intake: IntakeSubsystem<M>,
    pub drivetrain: DrivetrainSubsystem<D>,
}
