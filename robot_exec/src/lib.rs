//! # Robot library.
//!
//! Everything the robot executable runs each cycle: input shaping, control bindings, the command
//! scheduler and the subsystems which own the hardware.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Controller bindings - maps buttons and axes onto commands
pub mod bindings;

/// Command scheduler - commands, and the table of which command owns which subsystem
pub mod cmd_sched;

/// Input shaper - deadzone and response curve for stick axes
pub mod input_shaper;

/// Parameters for the robot executable
pub mod params;

/// Robot container - owns everything and runs one control cycle
pub mod robot;

/// Subsystems - the only owners of the hardware handles
pub mod subsystems;
