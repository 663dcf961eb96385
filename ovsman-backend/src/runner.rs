//! External command execution for the OVS toolset.
//!
//! All network state changes go through the host's pre-existing tools
//! (`ovs-vsctl`, `ovs-ofctl`, `ip`); this module owns the single place where
//! those processes are spawned and their outcome is normalized.

use tokio::process::Command;
use tracing::debug;

use ovsman_shared::errors::{OvsError, OvsResult};

/// Spawns toolset commands and normalizes their outcome.
///
/// A command succeeds when it exits with status zero; its trimmed stdout is
/// returned when non-empty. On a non-zero exit the trimmed stderr text is
/// surfaced verbatim so callers can report exactly what the tool said.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run one toolset command to completion and capture its output.
    pub async fn run<I, S>(&self, program: &str, args: I) -> OvsResult<Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        debug!(program, ?args, "running toolset command");

        let output = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|source| OvsError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(OvsError::CommandFailed {
                program: program.to_string(),
                detail,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if stdout.is_empty() { None } else { Some(stdout) })
    }
}
