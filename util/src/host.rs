//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "LON_CTRL_SW_ROOT";

/// Get the software root directory.
///
/// Parameter files are found in `<root>/params` and sessions are created in
/// `<root>/sessions`.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
