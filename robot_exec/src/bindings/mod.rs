//! # Controller bindings
//!
//! A binding ties a trigger (a condition on the controller state) to a command. Bindings are
//! polled once per cycle and produce schedule and cancel events on the trigger's edges.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod layout;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use layout::*;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use robot_if::input::{Axis, Button, ControllerState};

use crate::cmd_sched::Command;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A trigger bound to a command.
#[derive(Debug, Clone)]
pub struct Binding {
    trigger: Trigger,
    action: TriggerAction,
    command: Command,

    /// Trigger state on the previous poll
    was_active: bool,
}

/// An ordered set of bindings.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    bindings: Vec<Binding>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A condition on the controller state.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Button is held.
    Button(Button),

    /// Axis reading is above the threshold.
    AxisAbove(Axis, f64),

    /// Both triggers are active.
    And(Box<Trigger>, Box<Trigger>),
}

/// When a binding acts on its command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Schedule when the trigger becomes active, cancel when it becomes inactive.
    WhileTrue,

    /// Schedule when the trigger becomes active.
    OnTrue,
}

/// Something a binding wants done to the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingEvent {
    Schedule(Command),
    Cancel(Command),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Trigger {
    pub fn and(self, other: Trigger) -> Trigger {
        Trigger::And(Box::new(self), Box::new(other))
    }

    pub fn is_active(&self, state: &ControllerState) -> bool {
        match self {
            Trigger::Button(b) => state.button(*b),
            Trigger::AxisAbove(a, threshold) => state.axis(*a) > *threshold,
            Trigger::And(a, b) => a.is_active(state) && b.is_active(state),
        }
    }
}

impl From<Button> for Trigger {
    fn from(button: Button) -> Self {
        Trigger::Button(button)
    }
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` while `trigger` is active.
    pub fn while_true<T: Into<Trigger>>(mut self, trigger: T, command: Command) -> Self {
        self.push(trigger.into(), TriggerAction::WhileTrue, command);
        self
    }

    /// Schedule `command` when `trigger` becomes active.
    pub fn on_true<T: Into<Trigger>>(mut self, trigger: T, command: Command) -> Self {
        self.push(trigger.into(), TriggerAction::OnTrue, command);
        self
    }

    /// Poll every binding against this cycle's controller state.
    ///
    /// Events are returned in binding order, so when two bindings on the same edge need the same
    /// resource the later one wins.
    pub fn poll(&mut self, state: &ControllerState) -> Vec<BindingEvent> {
        let mut events = vec![];

        for binding in self.bindings.iter_mut() {
            let active = binding.trigger.is_active(state);

            match (binding.was_active, active, binding.action) {
                (false, true, _) => {
                    trace!("{:?} rising edge", binding.trigger);
                    events.push(BindingEvent::Schedule(binding.command.clone()))
                }
                (true, false, TriggerAction::WhileTrue) => {
                    trace!("{:?} falling edge", binding.trigger);
                    events.push(BindingEvent::Cancel(binding.command.clone()))
                }
                _ => (),
            }

            binding.was_active = active;
        }

        events
    }

    fn push(&mut self, trigger: Trigger, action: TriggerAction, command: Command) {
        self.bindings.push(Binding {
            trigger,
            action,
            command,
            was_active: false,
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_while_true_edges() {
        let mut bindings = Bindings::new().while_true(Button::RightBumper, Command::intake(true));

        let pressed = ControllerState::default().with_button(Button::RightBumper);
        let released = ControllerState::default();

        assert_eq!(
            bindings.poll(&pressed),
            vec![BindingEvent::Schedule(Command::intake(true))]
        );
        // Held, nothing new
        assert!(bindings.poll(&pressed).is_empty());
        assert_eq!(
            bindings.poll(&released),
            vec![BindingEvent::Cancel(Command::intake(true))]
        );
        assert!(bindings.poll(&released).is_empty());
    }

    #[test]
    fn test_on_true_edges() {
        let mut bindings = Bindings::new().on_true(Button::LeftBumper, Command::SeedFieldCentric);

        let pressed = ControllerState::default().with_button(Button::LeftBumper);

        assert_eq!(
            bindings.poll(&pressed),
            vec![BindingEvent::Schedule(Command::SeedFieldCentric)]
        );
        assert!(bindings.poll(&pressed).is_empty());
        assert!(bindings.poll(&ControllerState::default()).is_empty());
    }

    #[test]
    fn test_chord_and_axis_triggers() {
        let chord = Trigger::from(Button::Back).and(Button::Y.into());
        let back = ControllerState::default().with_button(Button::Back);

        assert!(!chord.is_active(&back));
        assert!(chord.is_active(&back.clone().with_button(Button::Y)));

        let trigger = Trigger::AxisAbove(Axis::RightTrigger, 0.5);
        assert!(!trigger.is_active(&ControllerState::default().with_axis(Axis::RightTrigger, 0.5)));
        assert!(trigger.is_active(&ControllerState::default().with_axis(Axis::RightTrigger, 0.75)));
    }
}
