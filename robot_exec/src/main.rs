//! Main robot executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Build the robot on its hardware
//!     - Main loop:
//!         - Driver station input acquisition (from a control script)
//!         - Robot processing:
//!             - Mode handling
//!             - Control binding polling
//!             - Command scheduling and execution
//!         - Cycle management
//!
//! # Usage
//!
//! ```text
//! robot_exec <control_script>
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::{eyre, WrapErr}, Report};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::Instant;

// Internal
use robot_if::{
    eqpt::sim::{SimDrivetrain, SimMotor},
    input::{RobotMode, ScriptEvent},
};
use robot_lib::{
    params::RobotExecParams,
    robot::{CycleInput, Robot},
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingEvents, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "robot_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("FRC Robot Executable\n");
    info!(
        "Running on: {:#?}", 
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: RobotExecParams = util::params::load(
        "robot_exec.toml"
    ).wrap_err("Could not load robot params")?;

    params.validate().wrap_err("Invalid robot params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!(
            "Expected a single control script argument, found {} arguments", args.len().saturating_sub(1))
        );
    }

    info!("Loading control script from \"{}\"", &args[1]);

    let mut script = ScriptInterpreter::new(&args[1])
        .wrap_err("Failed to load control script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} events\n",
        script.get_duration(),
        script.get_num_events()
    );

    // ---- INITIALISE ROBOT ----

    info!("Initialising robot...");

    // No vendor libraries on this host, run on simulated hardware
    let mut robot = Robot::new(
        SimMotor::new(params.intake.motor_can_id),
        SimDrivetrain::new()
    );

    robot.init(params, &session)
        .wrap_err("Failed to initialise the robot")?;

    let cycle_period = robot.params().cycle_period()
        .wrap_err("Invalid robot params")?;

    info!("Robot initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut input = CycleInput::default();
    let mut num_consec_cycle_overruns: u64 = 0;

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- DRIVER STATION INPUT ----

        match script.get_pending(session::get_elapsed_seconds()) {
            PendingEvents::None => (),
            PendingEvents::Some(events) => {
                for event in events {
                    match event {
                        ScriptEvent::Mode(m) => input.mode = m,
                        ScriptEvent::Controller(c) => input.controller = c,
                    }
                }
            }
            // Exit if end of script reached
            PendingEvents::EndOfScript => {
                info!("End of control script reached, stopping");
                break
            }
        }

        // ---- ROBOT PROCESSING ----

        let (output, report) = match robot.proc(&input) {
            Ok(r) => r,
            Err(e) => match e {},
        };

        if report.num_interrupted > 0 || report.num_finished > 0 {
            debug!(
                "Active commands: {:?}, intake: {:?}",
                report.active_commands,
                output.intake_state
            );
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                num_consec_cycle_overruns += 1;
                warn!(
                    "Cycle overran by {:.06} s ({} consecutive)", 
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64(),
                    num_consec_cycle_overruns
                );
            }
        }
    }

    // ---- SHUTDOWN ----

    // Leave the hardware stopped
    input.mode = RobotMode::Disabled;
    if let Err(e) = robot.proc(&input) {
        match e {}
    }

    info!(
        "End of execution after {} cycles, intake motor stopped {} times",
        robot.num_cycles(),
        robot.subsystems().intake.motor().num_stops()
    );

    Ok(())
}
