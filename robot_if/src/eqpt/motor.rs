//! # Motor controller interface

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A single motor driven by a vendor motor controller (e.g. a brushless SPARK MAX).
///
/// Faults are owned by the vendor driver and are not reported through this interface.
pub trait MotorController {
    /// Set the open-loop output of the motor.
    ///
    /// ## Arguments
    /// - `power` - Normalised output between -1.0 (full reverse) and +1.0 (full forward).
    fn set(&mut self, power: f64);

    /// Stop the motor, disabling its output.
    fn stop_motor(&mut self);
}
