use crate::config::find_upward;
use std::path::{Path, PathBuf};

/// Default for `--env` when the flag is not given.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
/// Default for `--compose-bin`.
pub const COMPOSE_BIN_VAR: &str = "DC_COMPOSE_BIN";
/// Injected into the child environment; compose uses it as the project namespace.
pub const PROJECT_NAME_VAR: &str = "COMPOSE_PROJECT_NAME";

/// Load the nearest `.env` at or above `start` into the process env.
/// Variables that are already set win over the file.
pub fn load_dotenv(start: &Path) -> Result<Option<PathBuf>, dotenvy::Error> {
    let Some(path) = find_upward(start, ".env", |p| p.is_file()) else {
        return Ok(None);
    };
    dotenvy::from_path(&path)?;
    Ok(Some(path))
}
