//! Shell invocation for install commands.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Build a [`Command`] that executes `cmd_str` via the system shell.
///
/// - Unix: `sh -c "{cmd_str}"`
/// - Windows: `cmd /C "{cmd_str}"`
fn shell_command(cmd_str: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd_str]);
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_str);
        c
    }
}

/// Run `manager` with `args` in `cwd`, streaming output to the terminal.
///
/// Blocks until the command exits. A non-zero exit status is
/// [`Error::InstallFailed`] carrying the full command line and exit code.
pub fn run_install(manager: &str, args: &[String], cwd: &Path) -> Result<()> {
    let mut command_line = manager.to_string();
    for arg in args {
        command_line.push(' ');
        command_line.push_str(arg);
    }
    tracing::debug!(command = %command_line, cwd = %cwd.display(), "running install command");

    let status = shell_command(&command_line)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(Error::InstallFailed {
            manager: manager.to_string(),
            command: command_line,
            exit_code: status.code(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn run_install_succeeds_on_zero_exit() {
        let tmp = TempDir::new().unwrap();
        // `echo` is a builtin of both shells and exits 0.
        run_install("echo", &["ok".to_string()], tmp.path()).unwrap();
    }

    #[test]
    fn run_install_fails_on_nonzero_exit() {
        let tmp = TempDir::new().unwrap();
        let err = run_install("exit", &["1".to_string()], tmp.path()).unwrap_err();
        assert!(
            matches!(err, Error::InstallFailed { ref manager, .. } if manager == "exit"),
            "expected InstallFailed, got: {err:?}"
        );
    }
}
