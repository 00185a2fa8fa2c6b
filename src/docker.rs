use crate::env::PROJECT_NAME_VAR;
use crate::error::{DcError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// docker-compose flag that layers one more configuration file.
pub const FILE_FLAG: &str = "-f";

/// Everything needed to run docker-compose for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInvocation {
    pub base_file: PathBuf,
    pub env_file: PathBuf,
    pub project_name: String,
    pub args: Vec<OsString>,
}

impl ComposeInvocation {
    /// Check both compose files exist under `compose_dir` and build
    /// `-f <base> -f <env> <passthrough...>`.
    pub fn assemble(
        compose_dir: &Path,
        base_compose: &str,
        env: &str,
        passthrough: &[OsString],
    ) -> Result<Self> {
        tracing::debug!("Looking for {base_compose}");
        let base_file = require_file(compose_dir, base_compose)?;

        let env_compose = compose_file_name(env);
        tracing::debug!("Looking for {env_compose}");
        let env_file = require_file(compose_dir, &env_compose)?;

        let mut args: Vec<OsString> = Vec::with_capacity(4 + passthrough.len());
        args.push(FILE_FLAG.into());
        args.push(base_file.clone().into_os_string());
        args.push(FILE_FLAG.into());
        args.push(env_file.clone().into_os_string());
        args.extend(passthrough.iter().cloned());

        Ok(ComposeInvocation {
            base_file,
            env_file,
            project_name: project_name(compose_dir, env)?,
            args,
        })
    }

    /// Shell-ish rendering for logs, e.g. `docker-compose -f a.yml -f b.yml up`.
    pub fn command_line(&self, bin: &str) -> String {
        let mut parts = vec![bin.to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    pub fn project_env(&self) -> (&'static str, &str) {
        (PROJECT_NAME_VAR, &self.project_name)
    }
}

pub fn compose_file_name(env: &str) -> String {
    format!("docker-compose.{env}.yml")
}

/// `<name of the directory holding compose_dir>-<env>`.
pub fn project_name(compose_dir: &Path, env: &str) -> Result<String> {
    let project = compose_dir
        .parent()
        .and_then(Path::file_name)
        .ok_or_else(|| DcError::InvalidComposeDir(compose_dir.to_path_buf()))?;
    Ok(format!("{}-{env}", project.to_string_lossy()))
}

fn require_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.exists() {
        Ok(path)
    } else {
        Err(DcError::RequiredFileMissing {
            file: name.to_string(),
            path,
        })
    }
}
