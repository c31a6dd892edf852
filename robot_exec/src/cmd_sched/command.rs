//! Command definitions and their lifecycle actions

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;
use robot_if::eqpt::{swerve::SysIdTest, MotorController, SwerveDrivetrain, SwerveRequest};
use serde::Serialize;

use super::ResourceId;
use crate::subsystems::{DriverDemand, IntakeDirection, Subsystems};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Commands the robot can run.
///
/// A command's lifecycle is:
/// - `initialize` once when scheduled,
/// - `execute` once per cycle while scheduled,
/// - `end` once when it finishes (`is_finished` returns true, `interrupted = false`) or is
///   cancelled or displaced by another command (`interrupted = true`).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the intake in the given direction, stopping it on end.
    Intake(IntakeDirection),

    /// Drive field-centric from the driver's sticks.
    FieldCentricDrive,

    /// Hold the drivetrain in the brake (X) position.
    Brake,

    /// Point the wheels in the direction of the driver's left stick.
    PointWheels,

    /// Reset the field-centric heading to the current robot heading.
    SeedFieldCentric,

    /// Run a drivetrain characterisation test.
    SysId(SysIdTest),

    /// Log a message.
    Print(String),
}

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const REQ_DRIVETRAIN: &[ResourceId] = &[ResourceId::Drivetrain];
const REQ_INTAKE: &[ResourceId] = &[ResourceId::Intake];
const REQ_NONE: &[ResourceId] = &[];

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Command {
    /// Build an intake command from an "in" flag.
    pub fn intake(intake_in: bool) -> Self {
        Command::Intake(IntakeDirection::from_in_flag(intake_in))
    }

    /// Resources this command must own while it runs.
    pub fn requirements(&self) -> &'static [ResourceId] {
        match self {
            Command::Intake(_) => REQ_INTAKE,
            Command::FieldCentricDrive
            | Command::Brake
            | Command::PointWheels
            | Command::SeedFieldCentric
            | Command::SysId(_) => REQ_DRIVETRAIN,
            Command::Print(_) => REQ_NONE,
        }
    }

    pub fn initialize<M, D>(&self, subsystems: &mut Subsystems<M, D>)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        match self {
            Command::SeedFieldCentric => subsystems.drivetrain.seed_field_centric(),
            Command::Print(msg) => info!("{}", msg),
            _ => (),
        }
    }

    pub fn execute<M, D>(&self, subsystems: &mut Subsystems<M, D>, demand: &DriverDemand)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        match self {
            Command::Intake(direction) => subsystems.intake.run(*direction),
            Command::FieldCentricDrive => subsystems
                .drivetrain
                .apply(SwerveRequest::FieldCentric(demand.field_centric)),
            Command::Brake => subsystems.drivetrain.apply(SwerveRequest::Brake),
            Command::PointWheels => subsystems.drivetrain.apply(
                SwerveRequest::point_wheels_towards(demand.point_x, demand.point_y),
            ),
            Command::SysId(test) => subsystems.drivetrain.apply(SwerveRequest::SysId(*test)),
            Command::SeedFieldCentric | Command::Print(_) => (),
        }
    }

    /// Instant commands do all their work in `initialize` and finish on their first cycle.
    pub fn is_finished(&self) -> bool {
        matches!(self, Command::SeedFieldCentric | Command::Print(_))
    }

    pub fn end<M, D>(&self, subsystems: &mut Subsystems<M, D>, _interrupted: bool)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        // Drivetrain commands leave their last request in place, the default command replaces it
        // on the next cycle.
        if let Command::Intake(_) = self {
            subsystems.intake.stop();
        }
    }
}
