use crate::env::{COMPOSE_BIN_VAR, ENVIRONMENT_VAR};
use crate::error::{DcError, Result};
use crate::process::StreamMode;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_COMPOSE_DIR_NAME: &str = ".compose";
pub const DEFAULT_BASE_COMPOSE: &str = "docker-compose.default.yml";
pub const DEFAULT_ENVIRONMENT: &str = "devel";
pub const DEFAULT_COMPOSE_BIN: &str = "docker-compose";

/// Single-dash spellings accepted for compatibility with older `dc` invocations.
const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("-composeDirName", "--compose-dir-name"),
    ("-baseCompose", "--base-compose"),
    ("-env", "--env"),
];

const VALUE_FLAGS: [&str; 4] = ["--compose-dir-name", "--base-compose", "--env", "--compose-bin"];
const SWITCHES: [&str; 7] = ["-v", "--verbose", "--relay", "-h", "--help", "-V", "--version"];

/// Run docker-compose with the base and environment files of the nearest compose directory
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "dc", version, long_about = None)]
pub struct Options {
    /// Name of directory containing docker compose files
    #[arg(long, value_name = "NAME", default_value = DEFAULT_COMPOSE_DIR_NAME)]
    pub compose_dir_name: String,

    /// The base docker compose file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BASE_COMPOSE)]
    pub base_compose: String,

    /// Environment that docker compose is running in
    #[arg(long, value_name = "ENV", env = ENVIRONMENT_VAR, default_value = DEFAULT_ENVIRONMENT)]
    pub env: String,

    /// Print debug messages
    #[arg(short, long)]
    pub verbose: bool,

    /// docker-compose executable, looked up on PATH
    #[arg(long, value_name = "BIN", env = COMPOSE_BIN_VAR, default_value = DEFAULT_COMPOSE_BIN)]
    pub compose_bin: String,

    /// Pipe the child's output through dc line by line instead of handing it the terminal
    #[arg(long)]
    pub relay: bool,

    /// Arguments forwarded to docker-compose
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

impl Options {
    pub fn from_env() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    pub fn try_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_flags(args))
    }

    pub fn stream_mode(&self) -> StreamMode {
        if self.relay {
            StreamMode::Relay
        } else {
            StreamMode::Inherit
        }
    }
}

/// Rewrite `-env x`, `-env=x` and friends to their long form. Only the leading
/// run of dc's own options is touched; everything from the first foreign
/// token onwards is returned as given.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = iter.next().into_iter().collect();

    while let Some(arg) = iter.next() {
        let Some(s) = arg.to_str() else {
            out.push(arg);
            break;
        };
        let (flag, inline_value) = match s.split_once('=') {
            Some((f, v)) if f.starts_with('-') => (f, Some(v)),
            _ => (s, None),
        };
        let flag = LEGACY_FLAGS
            .iter()
            .find(|(legacy, _)| *legacy == flag)
            .map_or(flag, |(_, long)| *long);

        if VALUE_FLAGS.contains(&flag) {
            match inline_value {
                Some(v) => out.push(format!("{flag}={v}").into()),
                None => {
                    out.push(flag.into());
                    out.extend(iter.next());
                }
            }
        } else if SWITCHES.contains(&flag) && inline_value.is_none() {
            out.push(arg);
        } else {
            out.push(arg);
            break;
        }
    }

    out.extend(iter);
    out
}

/// Walk from `start` towards the root looking for a directory called `name`.
pub fn locate_compose_dir(start: &Path, name: &str) -> Result<PathBuf> {
    find_upward(start, name, |p| p.is_dir()).ok_or_else(|| DcError::ComposeDirNotFound {
        name: name.to_string(),
        start: start.to_path_buf(),
    })
}

/// Nearest `<ancestor>/<name>` accepted by `accept`, `start` included.
/// The filesystem root itself is never probed.
pub fn find_upward(start: &Path, name: &str, accept: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    if start.as_os_str().is_empty() || name.is_empty() {
        return None;
    }

    let mut dir = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(start)
    };

    loop {
        let parent = dir.parent()?.to_path_buf();

        let candidate = dir.join(name);
        tracing::debug!("Trying path {}", candidate.display());
        if accept(&candidate) {
            return Some(candidate);
        }

        if parent.as_os_str().is_empty() {
            return None;
        }
        dir = parent;
    }
}
