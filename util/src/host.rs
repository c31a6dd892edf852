//! Host platform (linux for example) utility functions

use std::path::PathBuf;
use uname;

/// Name of the environment variable pointing at the root of the software checkout.
pub const SW_ROOT_ENV_VAR: &str = "FRC_ROBOT_SW_ROOT";

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the root of the software checkout, which contains the `params` directory.
pub fn get_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
