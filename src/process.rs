use crate::docker::ComposeInvocation;
use crate::error::{DcError, Result};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};

/// How the child's stdout/stderr reach the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// Child writes straight to our terminal.
    #[default]
    Inherit,
    /// Child output is piped and copied line by line.
    Relay,
}

/// Spawn `bin` with the invocation's args and `COMPOSE_PROJECT_NAME` added
/// to the inherited environment. Stdin is always inherited.
pub fn spawn_compose(bin: &str, invocation: &ComposeInvocation, mode: StreamMode) -> Result<Child> {
    let (key, value) = invocation.project_env();

    let mut c = Command::new(bin);
    c.args(&invocation.args).env(key, value).stdin(Stdio::inherit());

    match mode {
        StreamMode::Inherit => c.stdout(Stdio::inherit()).stderr(Stdio::inherit()),
        StreamMode::Relay => c.stdout(Stdio::piped()).stderr(Stdio::piped()),
    };

    c.spawn().map_err(|source| DcError::LaunchFailed {
        bin: bin.to_string(),
        source,
    })
}

/// Run docker-compose to completion and return the exit code to hand back
/// to our own caller.
pub async fn launch(bin: &str, invocation: &ComposeInvocation, mode: StreamMode) -> Result<i32> {
    let mut child = spawn_compose(bin, invocation, mode)?;

    let mut relays = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        relays.push(tokio::spawn(relay_lines(stdout, tokio::io::stdout())));
    }
    if let Some(stderr) = child.stderr.take() {
        relays.push(tokio::spawn(relay_lines(stderr, tokio::io::stderr())));
    }

    let status = wait_for_exit(&mut child).await?;

    for relay in relays {
        match relay.await {
            Ok(Ok(lines)) => tracing::debug!("Relayed {lines} lines"),
            Ok(Err(e)) => tracing::warn!("Output relay stopped early: {e}"),
            Err(e) => tracing::warn!("Output relay task failed: {e}"),
        }
    }

    let code = exit_code(status);
    tracing::debug!("{bin} exited with {code}");
    Ok(code)
}

/// Copy `reader` to `writer` one line at a time, flushing after each line so
/// stdout and stderr stay roughly interleaved. Bytes are passed through
/// untouched, including a final line without a newline.
pub async fn relay_lines<R, W>(reader: R, mut writer: W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut r = BufReader::new(reader);
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        if r.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        writer.write_all(&line).await?;
        writer.flush().await?;
        count += 1;
    }

    Ok(count)
}

/// Ctrl-C reaches the child through the terminal's process group; we keep
/// waiting so compose can shut its containers down.
async fn wait_for_exit(child: &mut Child) -> Result<ExitStatus> {
    loop {
        tokio::select! {
            status = child.wait() => return Ok(status?),
            interrupted = tokio::signal::ctrl_c() => {
                if interrupted.is_err() {
                    return Ok(child.wait().await?);
                }
                tracing::debug!("Interrupted, waiting for docker-compose to exit");
            }
        }
    }
}

pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
