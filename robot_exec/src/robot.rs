//! # Robot container
//!
//! The [`Robot`] owns the subsystems, the scheduler and the controller bindings, and runs one
//! control cycle per call to [`State::proc`]. Each cycle:
//!
//! 1. Handle any change in robot mode.
//! 2. Work out the driver's drive demand from the sticks.
//! 3. Poll the bindings, scheduling and cancelling commands.
//! 4. Run the scheduler, which executes the active commands on the subsystems.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, trace, warn};
use robot_if::{
    eqpt::{MotorController, SwerveDrivetrain},
    input::{ControllerState, RobotMode},
};
use std::convert::Infallible;
use thiserror::Error;

use crate::{
    bindings::{BindingEvent, Bindings, DriveAxes},
    cmd_sched::{Command, ResourceId, ScheduleOutcome, Scheduler, StatusReport},
    input_shaper::InputShaper,
    params::RobotExecParams,
    subsystems::{DriverDemand, DrivetrainSubsystem, IntakeState, IntakeSubsystem, Subsystems},
};
use util::{module::State, session::Session};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const NO_AUTO_MESSAGE: &str = "No autonomous command configured";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The robot.
pub struct Robot<M, D> {
    params: RobotExecParams,

    subsystems: Subsystems<M, D>,

    scheduler: Scheduler,

    bindings: Bindings,

    drive_axes: DriveAxes,

    shaper: InputShaper,

    mode: RobotMode,

    /// Autonomous command scheduled on entering autonomous, if it might still be running
    auto_cmd: Option<Command>,

    num_cycles: u64,
}

/// Input data for one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleInput {
    /// Mode set by the driver station
    pub mode: RobotMode,

    /// Driver's controller
    pub controller: ControllerState,
}

/// Output data from one cycle.
#[derive(Debug, Clone)]
pub struct CycleOutput {
    pub demand: DriverDemand,

    pub intake_state: IntakeState,

    /// Commands active at the end of the cycle, in scheduling order
    pub active_commands: Vec<Command>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("Invalid robot parameters: {0}")]
    InvalidParams(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<M, D> Robot<M, D>
where
    M: MotorController,
    D: SwerveDrivetrain,
{
    /// Create a robot on the given hardware, configured with the default parameters.
    pub fn new(intake_motor: M, drivetrain: D) -> Self {
        let params = RobotExecParams::default();

        let mut robot = Self {
            subsystems: Subsystems {
                intake: IntakeSubsystem::new(intake_motor, params.intake.power),
                drivetrain: DrivetrainSubsystem::new(drivetrain),
            },
            scheduler: Scheduler::new(),
            bindings: Bindings::new(),
            drive_axes: params.controller_layout.drive_axes(),
            shaper: InputShaper::default(),
            mode: RobotMode::Disabled,
            auto_cmd: None,
            num_cycles: 0,
            params,
        };

        robot.apply_params();
        robot
    }

    /// Reconfigure the robot from new parameters.
    ///
    /// The intake motor is stopped and all commands are cancelled, the robot is left disabled.
    pub fn configure(&mut self, params: RobotExecParams) -> Result<(), RobotError> {
        params.validate()?;

        self.set_mode(RobotMode::Disabled);
        self.params = params;
        self.apply_params();

        info!(
            "Robot configured: {:?} layout, {:?} shaping with deadzone {}",
            self.params.controller_layout, self.params.shaper.mode, self.params.shaper.deadzone
        );

        Ok(())
    }

    /// Command to run on entering autonomous.
    pub fn autonomous_command(&self) -> Command {
        Command::Print(String::from(NO_AUTO_MESSAGE))
    }

    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    pub fn params(&self) -> &RobotExecParams {
        &self.params
    }

    pub fn subsystems(&self) -> &Subsystems<M, D> {
        &self.subsystems
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn num_cycles(&self) -> u64 {
        self.num_cycles
    }

    fn apply_params(&mut self) {
        let layout = self.params.controller_layout;

        self.bindings = layout.bindings();
        self.drive_axes = layout.drive_axes();
        self.shaper = InputShaper::new(self.params.shaper.deadzone, self.params.shaper.mode);

        self.subsystems.intake.set_power(self.params.intake.power);

        self.scheduler
            .set_default_command(ResourceId::Drivetrain, Command::FieldCentricDrive);
    }

    fn set_mode(&mut self, mode: RobotMode) {
        if mode == self.mode {
            return;
        }

        info!("Mode {:?} -> {:?}", self.mode, mode);

        self.scheduler.set_enabled(mode.is_enabled(), &mut self.subsystems);

        match mode {
            RobotMode::Disabled => self.auto_cmd = None,
            RobotMode::Autonomous => {
                let cmd = self.autonomous_command();
                self.scheduler.schedule(cmd.clone(), &mut self.subsystems);
                self.auto_cmd = Some(cmd);
            }
            RobotMode::Teleop => {
                if let Some(cmd) = self.auto_cmd.take() {
                    self.scheduler.cancel(&cmd, &mut self.subsystems);
                }
            }
        }

        self.mode = mode;
    }
}

impl<M, D> State for Robot<M, D>
where
    M: MotorController,
    D: SwerveDrivetrain,
{
    type InitData = RobotExecParams;
    type InitError = RobotError;

    type InputData = CycleInput;
    type OutputData = CycleOutput;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the robot from the loaded parameters.
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        info!("Initialising robot for session {:?}", session.session_root);
        self.configure(init_data)
    }

    /// Run one control cycle.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        self.set_mode(input_data.mode);

        let demand = DriverDemand::from_controller(
            &input_data.controller,
            &self.drive_axes,
            &self.shaper,
            &self.params.drive,
        );

        for event in self.bindings.poll(&input_data.controller) {
            match event {
                BindingEvent::Schedule(cmd) => {
                    if self.scheduler.schedule(cmd.clone(), &mut self.subsystems)
                        == ScheduleOutcome::Rejected
                    {
                        warn!("Robot is {:?}, ignoring control for {:?}", self.mode, cmd);
                    }
                }
                BindingEvent::Cancel(cmd) => {
                    self.scheduler.cancel(&cmd, &mut self.subsystems);
                }
            }
        }

        self.scheduler.run(&mut self.subsystems, &demand);

        let output = CycleOutput {
            demand,
            intake_state: self.subsystems.intake.state(),
            active_commands: self.scheduler.active_commands().cloned().collect(),
        };

        trace!(
            "Cycle {}: active commands {:?}",
            self.num_cycles,
            output.active_commands
        );

        self.num_cycles += 1;

        Ok((output, self.scheduler.take_report()))
    }
}
