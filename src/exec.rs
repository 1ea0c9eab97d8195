use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(unix)]
use crate::forward::ArgvArgs;
#[cfg(windows)]
use crate::forward::CommandLineArgs;
use crate::plan::LaunchPlan;

/// Exit code reported for a main application that could not be executed,
/// the same status a forked child reports when its exec fails.
pub const EXEC_FAILURE_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to create process for {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for main application: {0}")]
    Wait(#[source] io::Error),
}

/// What became of the main application after the launch call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Waited for; exited normally with this code.
    Exited(i32),
    /// Waited for; terminated by a signal.
    Signaled,
    /// Handed to the shell and not tracked further.
    #[cfg_attr(not(windows), allow(dead_code))]
    Detached,
    /// The shell refused the launch (ShellExecute result <= 32).
    #[cfg_attr(not(windows), allow(dead_code))]
    Rejected(isize),
}

/// Platform primitives the launch routine is built from.
pub trait Platform {
    /// Environment variable naming the user's home directory.
    const HOME_VAR: &'static str;
    /// File name of the main application inside the `main` subdirectory.
    const MAIN_EXECUTABLE: &'static str;

    /// Shape of the forwarded arguments the launch call consumes.
    type Args: fmt::Display;

    fn current_exe(&self) -> io::Result<PathBuf>;
    fn forward(&self, path: Option<&OsStr>) -> Self::Args;
    fn enter_working_dir(&self, dir: &Path);
    fn launch(&self, plan: &LaunchPlan, args: &Self::Args)
        -> Result<LaunchOutcome, LaunchError>;
}

#[cfg(unix)]
pub type NativePlatform = UnixPlatform;
#[cfg(windows)]
pub type NativePlatform = WindowsPlatform;

/// Spawn the main application, block until it terminates, and report how it ended.
///
/// argv[0] is the target path itself and the extra arguments go through as
/// discrete entries, so nothing is quoted. A target without an interpreter
/// line is run by `/bin/sh`, as `execvp` does. The child inherits the
/// launcher's working directory, which `enter_working_dir` has already set.
#[cfg(unix)]
#[derive(Debug, Default)]
pub struct UnixPlatform;

#[cfg(unix)]
impl Platform for UnixPlatform {
    const HOME_VAR: &'static str = "HOME";
    const MAIN_EXECUTABLE: &'static str = "main";

    type Args = ArgvArgs;

    fn current_exe(&self) -> io::Result<PathBuf> {
        // Reads /proc/self/exe on Linux.
        std::env::current_exe()
    }

    fn forward(&self, path: Option<&OsStr>) -> ArgvArgs {
        crate::forward::argv_args(path)
    }

    fn enter_working_dir(&self, dir: &Path) {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!(
                "[infoscava] warning: could not change working directory to {}: {}",
                dir.display(),
                e
            );
        }
    }

    fn launch(
        &self,
        plan: &LaunchPlan,
        args: &ArgvArgs,
    ) -> Result<LaunchOutcome, LaunchError> {
        use std::os::unix::process::{CommandExt, ExitStatusExt};
        use std::process::Command;

        let spawned = match Command::new(&plan.target).args(&args.0).spawn() {
            Err(e) if e.raw_os_error() == Some(ENOEXEC) => Command::new("/bin/sh")
                .arg0(&plan.target)
                .arg(&plan.target)
                .args(&args.0)
                .spawn(),
            other => other,
        };

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if is_process_creation_failure(&e) => {
                return Err(LaunchError::Spawn {
                    path: plan.target.clone(),
                    source: e,
                });
            }
            Err(e) => {
                eprintln!(
                    "[infoscava] failed to execute main application: {}: {}",
                    plan.target.display(),
                    e
                );
                return Ok(LaunchOutcome::Exited(EXEC_FAILURE_CODE));
            }
        };

        let status = child.wait().map_err(LaunchError::Wait)?;
        Ok(match status.code() {
            Some(code) => LaunchOutcome::Exited(code),
            None if status.signal().is_some() => LaunchOutcome::Signaled,
            None => LaunchOutcome::Exited(EXEC_FAILURE_CODE),
        })
    }
}

/// "Exec format error": the kernel found no loader or `#!` line.
#[cfg(unix)]
const ENOEXEC: i32 = 8;

/// Resource exhaustion while creating the process, as opposed to the target
/// itself being missing or not executable.
#[cfg(unix)]
fn is_process_creation_failure(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory
    )
}

/// Ask the shell to open the main application and return without waiting.
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct WindowsPlatform;

#[cfg(windows)]
impl Platform for WindowsPlatform {
    const HOME_VAR: &'static str = "USERPROFILE";
    const MAIN_EXECUTABLE: &'static str = "main.exe";

    type Args = CommandLineArgs;

    fn current_exe(&self) -> io::Result<PathBuf> {
        // GetModuleFileNameW under the hood; errors instead of truncating.
        std::env::current_exe()
    }

    fn forward(&self, path: Option<&OsStr>) -> CommandLineArgs {
        crate::forward::command_line_args(path)
    }

    fn enter_working_dir(&self, _dir: &Path) {
        // ShellExecuteW receives the directory directly.
    }

    fn launch(
        &self,
        plan: &LaunchPlan,
        args: &CommandLineArgs,
    ) -> Result<LaunchOutcome, LaunchError> {
        use std::os::windows::ffi::OsStrExt;
        use windows::core::PCWSTR;
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWDEFAULT;

        fn wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let parameters = args.0.as_deref().map(wide);
        let operation = wide(OsStr::new("open"));
        let file = wide(plan.target.as_os_str());
        let directory = (!plan.working_dir.as_os_str().is_empty())
            .then(|| wide(plan.working_dir.as_os_str()));

        let as_pcwstr = |buf: &Option<Vec<u16>>| {
            buf.as_ref()
                .map_or(PCWSTR::null(), |b| PCWSTR::from_raw(b.as_ptr()))
        };

        // SAFETY: every pointer refers to a NUL-terminated buffer that
        // outlives the call.
        let result = unsafe {
            ShellExecuteW(
                HWND::default(),
                PCWSTR::from_raw(operation.as_ptr()),
                PCWSTR::from_raw(file.as_ptr()),
                as_pcwstr(&parameters),
                as_pcwstr(&directory),
                SW_SHOWDEFAULT,
            )
        };

        let code = result.0 as isize;
        if code <= 32 {
            Ok(LaunchOutcome::Rejected(code))
        } else {
            Ok(LaunchOutcome::Detached)
        }
    }
}
