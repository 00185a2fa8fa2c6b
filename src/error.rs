use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DcError>;

#[derive(Error, Debug)]
pub enum DcError {
    #[error("cannot find the {name} directory above {}", .start.display())]
    ComposeDirNotFound { name: String, start: PathBuf },

    #[error("{file} does not exist")]
    RequiredFileMissing { file: String, path: PathBuf },

    #[error("compose directory {} has no parent directory to name the project after", .0.display())]
    InvalidComposeDir(PathBuf),

    #[error("failed to launch {bin}: {source}")]
    LaunchFailed {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
