//! # Command scheduler module
//!
//! Commands act on subsystems over one or more cycles. Each subsystem is a resource which at most
//! one command may own at a time; the scheduler keeps an explicit table of the owner of each
//! resource. Scheduling a command which needs a resource that is already owned interrupts the
//! owner (running its end action) before the new command takes the resource.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod command;
mod scheduler;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use command::*;
pub use scheduler::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Unique identifier of a scheduled command instance.
pub type CommandId = u64;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Resources which commands may require.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceId {
    Drivetrain,
    Intake,
}
