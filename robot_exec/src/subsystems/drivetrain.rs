//! Drivetrain subsystem and the driver's demand on it

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use robot_if::{
    eqpt::{
        swerve::{DriveRequestType, FieldCentric},
        SwerveDrivetrain, SwerveRequest,
    },
    input::ControllerState,
};

use crate::{bindings::DriveAxes, input_shaper::InputShaper, params::DriveParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The swerve drivetrain.
pub struct DrivetrainSubsystem<D> {
    drivetrain: D,
    last_request: Option<SwerveRequest>,
}

/// What the driver is asking the drivetrain to do this cycle, worked out from the sticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverDemand {
    /// Request used by the field-centric drive command.
    pub field_centric: FieldCentric,

    /// Direction for the point-wheels command, X forward and Y left.
    pub point_x: f64,
    pub point_y: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<D: SwerveDrivetrain> DrivetrainSubsystem<D> {
    pub fn new(drivetrain: D) -> Self {
        Self {
            drivetrain,
            last_request: None,
        }
    }

    /// Apply a request to the drivetrain.
    pub fn apply(&mut self, request: SwerveRequest) {
        if self.last_request.as_ref() != Some(&request) {
            trace!("Drivetrain request: {:?}", request);
        }

        self.drivetrain.apply_request(&request);
        self.last_request = Some(request);
    }

    pub fn seed_field_centric(&mut self) {
        log::info!("Seeding field-centric heading");
        self.drivetrain.seed_field_centric();
    }

    pub fn drivetrain(&self) -> &D {
        &self.drivetrain
    }
}

impl DriverDemand {
    /// Work out the demand from the controller.
    ///
    /// Stick Y axes are negative forward and stick X axes are positive right, while the
    /// drivetrain has X forward and Y left, so both translation axes are inverted.
    pub fn from_controller(
        state: &ControllerState,
        axes: &DriveAxes,
        shaper: &InputShaper,
        params: &DriveParams,
    ) -> Self {
        let max_speed_ms = params.max_speed_ms;
        let max_angular_rate_rads = params.max_angular_rate_rads();

        let fwd = -state.axis(axes.forward);
        let left = -state.axis(axes.strafe);
        let rot = state.axis(axes.rotate);

        Self {
            field_centric: FieldCentric {
                velocity_x_ms: shaper.shape(fwd) * max_speed_ms * params.translation_scale,
                velocity_y_ms: shaper.shape(left) * max_speed_ms * params.translation_scale,
                rotational_rate_rads: shaper.shape(rot) * max_angular_rate_rads,
                deadband_ms: max_speed_ms * params.deadband_frac,
                rotational_deadband_rads: max_angular_rate_rads * params.deadband_frac,
                drive_request_type: DriveRequestType::OpenLoopVoltage,
            },
            point_x: fwd,
            point_y: left,
        }
    }
}

impl Default for DriverDemand {
    fn default() -> Self {
        Self {
            field_centric: FieldCentric {
                velocity_x_ms: 0.0,
                velocity_y_ms: 0.0,
                rotational_rate_rads: 0.0,
                deadband_ms: 0.0,
                rotational_deadband_rads: 0.0,
                drive_request_type: DriveRequestType::OpenLoopVoltage,
            },
            point_x: 0.0,
            point_y: 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{bindings::ControllerLayout, params::RobotExecParams};
    use robot_if::input::Axis;

    #[test]
    fn test_demand_from_sticks() {
        let params = RobotExecParams::default();
        let shaper = InputShaper::default();
        let axes = ControllerLayout::Xbox.drive_axes();

        let state = ControllerState::default()
            .with_axis(Axis::LeftY, -0.5)
            .with_axis(Axis::LeftX, 0.05)
            .with_axis(Axis::RightX, 1.0);

        let demand = DriverDemand::from_controller(&state, &axes, &shaper, &params.drive);
        let fc = demand.field_centric;

        assert_eq!(fc.velocity_x_ms, 0.25 * 4.73 * 0.8);
        assert_eq!(fc.velocity_y_ms, 0.0);
        assert_eq!(fc.rotational_rate_rads, std::f64::consts::TAU);
        assert_eq!(fc.deadband_ms, 4.73 * 0.1);
        assert_eq!(fc.rotational_deadband_rads, std::f64::consts::TAU * 0.1);
        assert_eq!(fc.drive_request_type, DriveRequestType::OpenLoopVoltage);

        assert_eq!(demand.point_x, 0.5);
        assert_eq!(demand.point_y, -0.05);
    }

    #[test]
    fn test_pulling_back_drives_forward() {
        // Pulling the stick back still gives a forward demand in literal mode
        let params = RobotExecParams::default();
        let axes = ControllerLayout::Xbox.drive_axes();
        let state = ControllerState::default().with_axis(Axis::LeftY, 0.5);

        let demand =
            DriverDemand::from_controller(&state, &axes, &InputShaper::default(), &params.drive);
        assert!(demand.field_centric.velocity_x_ms > 0.0);

        let shaper = InputShaper::new(0.1, crate::input_shaper::ShapingMode::SignPreserving);
        let demand = DriverDemand::from_controller(&state, &axes, &shaper, &params.drive);
        assert!(demand.field_centric.velocity_x_ms < 0.0);
    }
}
