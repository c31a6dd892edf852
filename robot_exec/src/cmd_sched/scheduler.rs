//! Implementation of the command scheduler

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use robot_if::eqpt::{MotorController, SwerveDrivetrain};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::{Command, CommandId, ResourceId};
use crate::subsystems::{DriverDemand, Subsystems};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The command scheduler.
#[derive(Default)]
pub struct Scheduler {
    /// Active commands in the order they were scheduled.
    active: Vec<ScheduledCommand>,

    /// Owner of each resource, resources not in the table are free.
    owners: HashMap<ResourceId, CommandId>,

    /// Commands scheduled whenever their resource is free.
    defaults: BTreeMap<ResourceId, Command>,

    next_id: CommandId,

    enabled: bool,

    report: StatusReport,
}

/// Status report for the scheduler, accumulated until taken.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    /// Commands active when the report was taken, in scheduling order
    pub active_commands: Vec<Command>,

    /// Number of commands scheduled
    pub num_scheduled: u64,

    /// Number of commands ended by interruption or cancellation
    pub num_interrupted: u64,

    /// Number of commands which finished on their own
    pub num_finished: u64,

    /// Number of commands which couldn't be scheduled because the robot was disabled
    pub num_rejected: u64,
}

#[derive(Debug)]
struct ScheduledCommand {
    id: CommandId,
    cmd: Command,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Result of asking for a command to be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// The command is now active.
    Scheduled(CommandId),

    /// An identical command was already active, nothing changed.
    AlreadyScheduled(CommandId),

    /// Commands cannot be scheduled while the robot is disabled.
    Rejected,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command which runs on a resource whenever no other command owns it.
    ///
    /// The command must require only that resource.
    pub fn set_default_command(&mut self, resource: ResourceId, cmd: Command) {
        debug_assert_eq!(cmd.requirements(), &[resource]);
        self.defaults.insert(resource, cmd);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the scheduler. Disabling cancels every active command.
    pub fn set_enabled<M, D>(&mut self, enabled: bool, subsystems: &mut Subsystems<M, D>)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        if self.enabled && !enabled {
            self.cancel_all(subsystems);
        }
        self.enabled = enabled;
    }

    /// Schedule a command, interrupting the current owners of any resources it requires.
    pub fn schedule<M, D>(
        &mut self,
        cmd: Command,
        subsystems: &mut Subsystems<M, D>,
    ) -> ScheduleOutcome
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        if !self.enabled {
            debug!("Scheduler disabled, rejected {:?}", cmd);
            self.report.num_rejected += 1;
            return ScheduleOutcome::Rejected;
        }

        if let Some(sc) = self.active.iter().find(|sc| sc.cmd == cmd) {
            return ScheduleOutcome::AlreadyScheduled(sc.id);
        }

        // Interrupt the owners of everything we need
        let mut displaced: Vec<CommandId> = cmd
            .requirements()
            .iter()
            .filter_map(|r| self.owners.get(r).copied())
            .collect();
        displaced.dedup();

        for id in displaced {
            self.end_command(id, true, subsystems);
        }

        // Acquire
        let id = self.next_id;
        self.next_id += 1;

        for r in cmd.requirements() {
            self.owners.insert(*r, id);
        }

        debug!("Scheduled {:?} (id {})", cmd, id);
        self.report.num_scheduled += 1;

        cmd.initialize(subsystems);
        self.active.push(ScheduledCommand { id, cmd });

        ScheduleOutcome::Scheduled(id)
    }

    /// Cancel a command if it is active. Returns true if it was.
    pub fn cancel<M, D>(&mut self, cmd: &Command, subsystems: &mut Subsystems<M, D>) -> bool
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        match self.active.iter().find(|sc| sc.cmd == *cmd).map(|sc| sc.id) {
            Some(id) => {
                self.end_command(id, true, subsystems);
                true
            }
            None => false,
        }
    }

    /// Cancel every active command.
    pub fn cancel_all<M, D>(&mut self, subsystems: &mut Subsystems<M, D>)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        let ids: Vec<CommandId> = self.active.iter().map(|sc| sc.id).collect();

        for id in ids {
            self.end_command(id, true, subsystems);
        }
    }

    /// Run one cycle: execute every active command, end those which have finished, then schedule
    /// the default commands of any free resources.
    pub fn run<M, D>(&mut self, subsystems: &mut Subsystems<M, D>, demand: &DriverDemand)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        if !self.enabled {
            return;
        }

        let mut finished: Vec<CommandId> = vec![];

        for sc in self.active.iter() {
            sc.cmd.execute(subsystems, demand);

            if sc.cmd.is_finished() {
                finished.push(sc.id);
            }
        }

        for id in finished {
            self.end_command(id, false, subsystems);
        }

        let free_defaults: Vec<Command> = self
            .defaults
            .iter()
            .filter(|(r, _)| !self.owners.contains_key(*r))
            .map(|(_, c)| c.clone())
            .collect();

        for cmd in free_defaults {
            self.schedule(cmd, subsystems);
        }
    }

    /// Is an identical command active.
    pub fn is_scheduled(&self, cmd: &Command) -> bool {
        self.active.iter().any(|sc| sc.cmd == *cmd)
    }

    /// The command owning a resource, if any.
    pub fn owner(&self, resource: ResourceId) -> Option<&Command> {
        let id = self.owners.get(&resource)?;
        self.active.iter().find(|sc| sc.id == *id).map(|sc| &sc.cmd)
    }

    /// Active commands in the order they were scheduled.
    pub fn active_commands(&self) -> impl Iterator<Item = &Command> {
        self.active.iter().map(|sc| &sc.cmd)
    }

    /// Take the status report accumulated since it was last taken.
    pub fn take_report(&mut self) -> StatusReport {
        let mut report = std::mem::take(&mut self.report);
        report.active_commands = self.active_commands().cloned().collect();
        report
    }

    /// Remove a command, release its resources and run its end action.
    fn end_command<M, D>(&mut self, id: CommandId, interrupted: bool, subsystems: &mut Subsystems<M, D>)
    where
        M: MotorController,
        D: SwerveDrivetrain,
    {
        let index = match self.active.iter().position(|sc| sc.id == id) {
            Some(i) => i,
            None => return,
        };

        let sc = self.active.remove(index);
        self.owners.retain(|_, owner| *owner != id);

        if interrupted {
            debug!("Interrupted {:?} (id {})", sc.cmd, id);
            self.report.num_interrupted += 1;
        } else {
            debug!("Finished {:?} (id {})", sc.cmd, id);
            self.report.num_finished += 1;
        }

        sc.cmd.end(subsystems, interrupted);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::subsystems::{DrivetrainSubsystem, IntakeDirection, IntakeState, IntakeSubsystem};
    use robot_if::eqpt::{
        sim::{MotorCall, SimDrivetrain, SimMotor},
        SwerveRequest,
    };

    fn subsystems() -> Subsystems<SimMotor, SimDrivetrain> {
        Subsystems {
            intake: IntakeSubsystem::new(SimMotor::new(0), 1.0),
            drivetrain: DrivetrainSubsystem::new(SimDrivetrain::new()),
        }
    }

    fn enabled_scheduler(subsystems: &mut Subsystems<SimMotor, SimDrivetrain>) -> Scheduler {
        let mut sched = Scheduler::new();
        sched.set_enabled(true, subsystems);
        sched
    }

    #[test]
    fn test_intake_in_then_cancelled() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);
        let demand = DriverDemand::default();

        sched.schedule(Command::intake(true), &mut subs);
        sched.run(&mut subs, &demand);
        sched.run(&mut subs, &demand);
        assert_eq!(subs.intake.state(), IntakeState::Running(IntakeDirection::In));

        assert!(sched.cancel(&Command::intake(true), &mut subs));
        assert_eq!(subs.intake.state(), IntakeState::Idle);

        assert_eq!(
            subs.intake.motor().history(),
            &[MotorCall::Set(1.0), MotorCall::Set(1.0), MotorCall::Stop]
        );

        // Cancelling again does nothing
        assert!(!sched.cancel(&Command::intake(true), &mut subs));
        assert_eq!(subs.intake.motor().num_stops(), 1);
    }

    #[test]
    fn test_intake_in_interrupted_by_out() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);
        let demand = DriverDemand::default();

        sched.schedule(Command::intake(true), &mut subs);
        sched.run(&mut subs, &demand);

        assert!(matches!(
            sched.schedule(Command::intake(false), &mut subs),
            ScheduleOutcome::Scheduled(_)
        ));
        assert_eq!(sched.owner(ResourceId::Intake), Some(&Command::intake(false)));
        assert!(!sched.is_scheduled(&Command::intake(true)));

        sched.run(&mut subs, &demand);

        // Exactly one stop, between the in and out demands
        assert_eq!(
            subs.intake.motor().history(),
            &[MotorCall::Set(1.0), MotorCall::Stop, MotorCall::Set(-1.0)]
        );

        let report = sched.take_report();
        assert_eq!(report.active_commands, vec![Command::intake(false)]);
        assert_eq!(report.num_scheduled, 2);
        assert_eq!(report.num_interrupted, 1);

        // Counts reset once taken, the active commands don't
        let report = sched.take_report();
        assert_eq!(report.active_commands, vec![Command::intake(false)]);
        assert_eq!(report.num_scheduled, 0);
    }

    #[test]
    fn test_reschedule_is_noop() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);

        let first = sched.schedule(Command::intake(true), &mut subs);
        let second = sched.schedule(Command::intake(true), &mut subs);

        match (first, second) {
            (ScheduleOutcome::Scheduled(a), ScheduleOutcome::AlreadyScheduled(b)) => {
                assert_eq!(a, b)
            }
            o => panic!("Unexpected outcomes {:?}", o),
        }
        assert_eq!(subs.intake.motor().num_stops(), 0);
    }

    #[test]
    fn test_independent_resources() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);

        sched.schedule(Command::Brake, &mut subs);
        sched.schedule(Command::intake(true), &mut subs);

        assert!(sched.is_scheduled(&Command::Brake));
        assert!(sched.is_scheduled(&Command::intake(true)));
        assert_eq!(sched.active_commands().count(), 2);
    }

    #[test]
    fn test_default_command() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);
        let demand = DriverDemand::default();

        sched.set_default_command(ResourceId::Drivetrain, Command::FieldCentricDrive);

        // Defaults are scheduled at the end of a cycle and run from the next
        sched.run(&mut subs, &demand);
        assert_eq!(sched.owner(ResourceId::Drivetrain), Some(&Command::FieldCentricDrive));
        assert_eq!(subs.drivetrain.drivetrain().num_requests(), 0);

        sched.run(&mut subs, &demand);
        assert_eq!(
            subs.drivetrain.drivetrain().last_request(),
            &SwerveRequest::FieldCentric(demand.field_centric)
        );

        // Brake displaces the default, which comes back once brake is cancelled
        sched.schedule(Command::Brake, &mut subs);
        sched.run(&mut subs, &demand);
        assert_eq!(subs.drivetrain.drivetrain().last_request(), &SwerveRequest::Brake);

        sched.cancel(&Command::Brake, &mut subs);
        sched.run(&mut subs, &demand);
        assert_eq!(sched.owner(ResourceId::Drivetrain), Some(&Command::FieldCentricDrive));
    }

    #[test]
    fn test_instant_command_finishes() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);
        let demand = DriverDemand::default();

        sched.schedule(Command::SeedFieldCentric, &mut subs);
        assert_eq!(subs.drivetrain.drivetrain().num_seeds(), 1);

        sched.run(&mut subs, &demand);
        assert!(!sched.is_scheduled(&Command::SeedFieldCentric));
        assert_eq!(sched.owner(ResourceId::Drivetrain), None);
        assert_eq!(sched.take_report().num_finished, 1);
    }

    #[test]
    fn test_disabled() {
        let mut subs = subsystems();
        let mut sched = enabled_scheduler(&mut subs);
        let demand = DriverDemand::default();

        sched.set_default_command(ResourceId::Drivetrain, Command::FieldCentricDrive);
        sched.schedule(Command::intake(false), &mut subs);
        sched.run(&mut subs, &demand);

        // Disabling stops everything
        sched.set_enabled(false, &mut subs);
        assert_eq!(sched.active_commands().count(), 0);
        assert_eq!(subs.intake.state(), IntakeState::Idle);
        assert_eq!(subs.intake.motor().num_stops(), 1);

        // Nothing can be scheduled, and defaults don't come back
        assert_eq!(
            sched.schedule(Command::intake(true), &mut subs),
            ScheduleOutcome::Rejected
        );
        sched.run(&mut subs, &demand);
        assert_eq!(sched.owner(ResourceId::Drivetrain), None);

        let report = sched.take_report();
        assert_eq!(report.num_rejected, 1);
        assert!(report.active_commands.is_empty());
    }
}
