//! Controller layouts

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use robot_if::{
    eqpt::swerve::{SysIdDirection, SysIdKind, SysIdTest},
    input::{Axis, Button},
};
use serde::Deserialize;

use super::{Bindings, Trigger};
use crate::cmd_sched::Command;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Analog trigger reading above which the trigger counts as pressed.
const TRIGGER_PRESS_THRESHOLD: f64 = 0.5;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Axes used to drive the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveAxes {
    /// Negative when pushed forward.
    pub forward: Axis,

    /// Positive when pushed right.
    pub strafe: Axis,

    /// Positive when pushed right (clockwise).
    pub rotate: Axis,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The controller the driver uses.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerLayout {
    /// Xbox gamepad.
    Xbox,

    /// Flight stick with a twist axis.
    Joystick,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ControllerLayout {
    pub fn drive_axes(&self) -> DriveAxes {
        match self {
            ControllerLayout::Xbox => DriveAxes {
                forward: Axis::LeftY,
                strafe: Axis::LeftX,
                rotate: Axis::RightX,
            },
            ControllerLayout::Joystick => DriveAxes {
                forward: Axis::JoyY,
                strafe: Axis::JoyX,
                rotate: Axis::JoyZ,
            },
        }
    }

    /// Button bindings for the layout.
    pub fn bindings(&self) -> Bindings {
        match self {
            ControllerLayout::Xbox => xbox_bindings(),
            ControllerLayout::Joystick => joystick_bindings(),
        }
    }
}

fn sys_id(kind: SysIdKind, direction: SysIdDirection) -> Command {
    Command::SysId(SysIdTest::new(kind, direction))
}

fn chord(a: Button, b: Button) -> Trigger {
    Trigger::from(a).and(b.into())
}

fn xbox_bindings() -> Bindings {
    use SysIdDirection::*;
    use SysIdKind::*;

    Bindings::new()
        // Both on B, point wheels is bound last so it takes the drivetrain
        .while_true(Button::B, Command::Brake)
        .while_true(Button::B, Command::PointWheels)
        // Each characterisation routine should be run once per log
        .while_true(chord(Button::Back, Button::Y), sys_id(Dynamic, Forward))
        .while_true(chord(Button::Back, Button::X), sys_id(Dynamic, Reverse))
        .while_true(chord(Button::Start, Button::Y), sys_id(Quasistatic, Forward))
        .while_true(chord(Button::Start, Button::X), sys_id(Quasistatic, Reverse))
        .on_true(Button::LeftBumper, Command::SeedFieldCentric)
        .while_true(Button::RightBumper, Command::intake(true))
        .while_true(
            Trigger::AxisAbove(Axis::RightTrigger, TRIGGER_PRESS_THRESHOLD),
            Command::intake(false),
        )
}

fn joystick_bindings() -> Bindings {
    use SysIdDirection::*;
    use SysIdKind::*;

    let b = Button::Joy;

    Bindings::new()
        .while_true(b(1), Command::Brake)
        .while_true(b(11), Command::PointWheels)
        // The dynamic tests share a chord, and so do the quasistatic tests, so only the reverse
        // test of each is reachable
        .while_true(chord(b(10), b(3)), sys_id(Dynamic, Forward))
        .while_true(chord(b(10), b(3)), sys_id(Dynamic, Reverse))
        .while_true(chord(b(9), b(4)), sys_id(Quasistatic, Forward))
        .while_true(chord(b(9), b(4)), sys_id(Quasistatic, Reverse))
        .on_true(b(12), Command::SeedFieldCentric)
        .while_true(b(5), Command::intake(true))
        .while_true(b(6), Command::intake(false))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bindings::BindingEvent;
    use robot_if::input::ControllerState;

    #[test]
    fn test_xbox_b_binds_brake_then_point() {
        let mut bindings = ControllerLayout::Xbox.bindings();

        let events = bindings.poll(&ControllerState::default().with_button(Button::B));
        assert_eq!(
            events,
            vec![
                BindingEvent::Schedule(Command::Brake),
                BindingEvent::Schedule(Command::PointWheels)
            ]
        );
    }

    #[test]
    fn test_xbox_intake_out_on_trigger() {
        let mut bindings = ControllerLayout::Xbox.bindings();

        let events =
            bindings.poll(&ControllerState::default().with_axis(Axis::RightTrigger, 1.0));
        assert_eq!(events, vec![BindingEvent::Schedule(Command::intake(false))]);
    }

    #[test]
    fn test_joystick_sys_id_chord() {
        let mut bindings = ControllerLayout::Joystick.bindings();

        let state = ControllerState::default()
            .with_button(Button::Joy(10))
            .with_button(Button::Joy(3));

        assert_eq!(
            bindings.poll(&state),
            vec![
                BindingEvent::Schedule(sys_id(SysIdKind::Dynamic, SysIdDirection::Forward)),
                BindingEvent::Schedule(sys_id(SysIdKind::Dynamic, SysIdDirection::Reverse)),
            ]
        );
    }

    #[test]
    fn test_drive_axes() {
        assert_eq!(ControllerLayout::Xbox.drive_axes().forward, Axis::LeftY);
        assert_eq!(ControllerLayout::Joystick.drive_axes().rotate, Axis::JoyZ);
    }
}
