pub mod config;
pub mod docker;
pub mod env;
pub mod error;
pub mod logging;
pub mod process;

pub use config::Options;
pub use docker::ComposeInvocation;
pub use error::{DcError, Result};

use std::path::Path;

/// Locate the compose directory above `start_dir` and check its files.
pub fn prepare(start_dir: &Path, opts: &Options) -> Result<ComposeInvocation> {
    let compose_dir = config::locate_compose_dir(start_dir, &opts.compose_dir_name)?;
    tracing::info!("Use compose directory {}", compose_dir.display());

    ComposeInvocation::assemble(&compose_dir, &opts.base_compose, &opts.env, &opts.args)
}

/// Full run: locate, assemble, then hand over to docker-compose. Returns the
/// child's exit code.
pub async fn run(start_dir: &Path, opts: &Options) -> Result<i32> {
    let invocation = prepare(start_dir, opts)?;

    tracing::info!("Executing: {}", invocation.command_line(&opts.compose_bin));
    tracing::info!("{}={}", env::PROJECT_NAME_VAR, invocation.project_name);

    process::launch(&opts.compose_bin, &invocation, opts.stream_mode()).await
}
