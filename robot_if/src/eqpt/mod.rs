//! # Equipment interfaces
//!
//! The vendor libraries which actually talk to the hardware are hidden behind the traits in this
//! module. Subsystems own a handle implementing one of these traits, and nothing else may touch
//! the equipment.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod motor;
pub mod swerve;

/// Simulated equipment, used when no vendor library is linked and as test doubles.
pub mod sim;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use motor::MotorController;
pub use swerve::{SwerveDrivetrain, SwerveRequest};
