//! # Control script interpreter module
//!
//! This module provides an interpreter for control scripts, which replay
//! driver station events (mode changes and controller states) at set times so
//! the robot can be exercised without a driver station.
//!
//! Scripts contain one entry per event, in the form `<time_s>: <json>;`, for
//! example:
//!
//! ```text
//! 0.5: {"Mode": "Teleop"};
//! 1.0: {"Controller": {"buttons": ["RightBumper"]}};
//! 3.0: {"Controller": {}};
//! 4.0: {"Mode": "Disabled"};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use robot_if::input::{ScriptEvent, ScriptEventParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An event which is scripted to occur at a specific time.
struct ScriptEntry {
    /// The time the event is supposed to occur at
    exec_time_s: f64,

    /// The event to replay
    event: ScriptEvent
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending` to
/// acquire a list of events that are due.
pub struct ScriptInterpreter {
    _script_path: PathBuf,
    entries: VecDeque<ScriptEntry>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid event at {0} s: {1}")]
    InvalidEvent(f64, ScriptEventParseError),

    #[error("Could not build the script pattern: {0}")]
    PatternError(regex::Error)
}

#[derive(Debug, PartialEq)]
pub enum PendingEvents {
    None,
    Some(Vec<ScriptEvent>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script_str(&script)?;
        si._script_path = path;

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of events
        let mut queue: VecDeque<ScriptEntry> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(ScriptError::PatternError)?;

        for cap in re.captures_iter(script) {
            let (time_str, payload) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(p)) => (t.as_str(), p.as_str()),
                _ => continue
            };

            // Parse the exec time
            let exec_time_s: f64 = time_str.parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Parse the event from the payload. The scripts contain JSON only.
            let event = ScriptEvent::from_json(payload)
                .map_err(|e| ScriptError::InvalidEvent(exec_time_s, e))?;

            queue.push_back(ScriptEntry {
                exec_time_s,
                event
            });
        }

        if queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        // Entries may be written out of order, replay them in time order.
        queue.make_contiguous().sort_by(|a, b| {
            a.exec_time_s
                .partial_cmp(&b.exec_time_s)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ScriptInterpreter {
            _script_path: PathBuf::new(),
            entries: queue
        })
    }

    /// Return the events due at `current_time_s`, in script order.
    pub fn get_pending(&mut self, current_time_s: f64) -> PendingEvents {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.entries.is_empty() {
            return PendingEvents::EndOfScript
        }

        let mut events: Vec<ScriptEvent> = vec![];

        // Pop entries from the queue while the head's exec time has passed.
        while let Some(entry) = self.entries.front() {
            if entry.exec_time_s > current_time_s {
                break;
            }

            if let Some(entry) = self.entries.pop_front() {
                events.push(entry.event);
            }
        }

        if events.is_empty() {
            PendingEvents::None
        }
        else {
            PendingEvents::Some(events)
        }
    }

    /// Get the number of events remaining in the script
    pub fn get_num_events(&self) -> usize {
        self.entries.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.entries.back() {
            Some(e) => e.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use robot_if::input::{Button, RobotMode};

    const SCRIPT: &str = r#"
        // Drive the intake in for two seconds
        0.5: {"Mode": "Teleop"};
        1.0: {"Controller": {"buttons": ["RightBumper"]}};
        3.0: {"Controller": {}};
        4.0: {"Mode": "Disabled"};
    "#;

    #[test]
    fn test_pending_events() {
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_events(), 4);
        assert_eq!(si.get_duration(), 4.0);

        assert_eq!(si.get_pending(0.0), PendingEvents::None);
        assert_eq!(
            si.get_pending(0.5),
            PendingEvents::Some(vec![ScriptEvent::Mode(RobotMode::Teleop)])
        );

        match si.get_pending(3.5) {
            PendingEvents::Some(events) => {
                assert_eq!(events.len(), 2);
                match &events[0] {
                    ScriptEvent::Controller(s) => assert!(s.button(Button::RightBumper)),
                    e => panic!("Expected a controller event, got {:?}", e),
                }
            }
            p => panic!("Expected two pending events, got {:?}", p),
        }

        assert_eq!(
            si.get_pending(10.0),
            PendingEvents::Some(vec![ScriptEvent::Mode(RobotMode::Disabled)])
        );
        assert_eq!(si.get_pending(10.0), PendingEvents::EndOfScript);
    }

    #[test]
    fn test_out_of_order_entries() {
        let mut si = ScriptInterpreter::from_script_str(
            r#"2.0: {"Mode": "Disabled"}; 1.0: {"Mode": "Teleop"};"#
        ).unwrap();

        // The second entry isn't at the start of a line so only the first is read
        assert_eq!(si.get_num_events(), 1);

        let mut si = ScriptInterpreter::from_script_str(
            "2.0: {\"Mode\": \"Disabled\"};\n1.0: {\"Mode\": \"Teleop\"};"
        ).unwrap();

        assert_eq!(
            si.get_pending(1.5),
            PendingEvents::Some(vec![ScriptEvent::Mode(RobotMode::Teleop)])
        );
    }

    #[test]
    fn test_bad_scripts() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("nothing to see here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_script_str(r#"1.0: {"Mode": "Sleeping"};"#),
            Err(ScriptError::InvalidEvent(t, _)) if t == 1.0
        ));
        assert!(matches!(
            ScriptInterpreter::new("/does/not/exist.script"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
