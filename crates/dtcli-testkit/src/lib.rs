//! Shared test helpers for the dtcli crates
//!
//! - [`temp_dir_in_workspace`]: scratch directories for schema downloads and
//!   config files, kept under `.tmp/` next to the running crate
//! - [`with_isolated_env`]: runs a closure with no `DT_*` variables and a fake
//!   home, so no real tenant or config file leaks into a test
//! - [`mock_json`]: one-line JSON mock on a server shared by the test binary

pub mod env;
pub mod mock;

pub use env::{ENV_LOCK, with_isolated_env};
pub use mock::{get_shared_mock_server, mock_json};

use std::io;
use std::path::PathBuf;
use tempfile::TempDir;

const SCRATCH_DIR: &str = ".tmp";

/// Scratch directory under `.tmp/`, removed when dropped
///
/// # Panics
///
/// Panics if the directory cannot be created. Use
/// [`try_temp_dir_in_workspace`] outside of tests.
///
/// # Examples
///
/// ```rust
/// use dtcli_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let schemas = temp.path().join("schemas");
/// assert!(!schemas.exists());
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace()
        .unwrap_or_else(|e| panic!("cannot create scratch directory under {SCRATCH_DIR}/: {e}"))
}

/// Fallible form of [`temp_dir_in_workspace`]
pub fn try_temp_dir_in_workspace() -> io::Result<TempDir> {
    let base = scratch_root()?;
    std::fs::create_dir_all(&base)?;
    TempDir::new_in(&base)
}

fn scratch_root() -> io::Result<PathBuf> {
    Ok(std::env::current_dir()?.join(SCRATCH_DIR))
}
