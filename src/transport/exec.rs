// Spawning client tools and capturing their output

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::TransportError;

#[derive(Debug, Clone)]
pub struct ExecResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout on success, `TransportError::Failed` otherwise.
    pub fn into_stdout(self, program: &str) -> Result<String, TransportError> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(TransportError::Failed {
                program: program.to_string(),
                code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs `cmd` to completion, feeding `stdin` if given.
/// Environment variables are never logged (they carry credentials).
pub async fn exec(mut cmd: Command, stdin: Option<&str>) -> Result<ExecResult, TransportError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let args: Vec<String> = cmd
        .as_std()
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    tracing::debug!(program = %program, args = ?args, "Executing client tool");

    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    })
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);

    let spawn_err = |source| TransportError::Spawn {
        program: program.clone(),
        source,
    };
    let mut child = cmd.spawn().map_err(spawn_err)?;
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        pipe.write_all(input.as_bytes()).await.map_err(spawn_err)?;
        drop(pipe);
    }
    let output = child.wait_with_output().await.map_err(spawn_err)?;

    let result = ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };
    if result.success() {
        tracing::trace!(program = %program, "Client tool succeeded");
    } else {
        tracing::warn!(
            program = %program,
            exit_code = result.exit_code,
            stderr = %result.stderr,
            "Client tool failed"
        );
    }
    Ok(result)
}
