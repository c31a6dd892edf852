//! # Robot interface crate.
//!
//! Provides the interfaces between the robot software and the things it doesn't own: the vendor
//! motor controller and swerve drivetrain libraries, and the driver's controllers.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Equipment interfaces (motor controllers, drivetrain) and their simulated stand-ins
pub mod eqpt;

/// Driver input definitions and script events
pub mod input;
