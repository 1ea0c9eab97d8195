use anyhow::Context;
use std::ffi::OsString;

use crate::config::LauncherConfig;
use crate::exec::{LaunchOutcome, Platform};
use crate::plan::resolve_plan;

/// Locate the main application beside this launcher and start it.
///
/// Runs each step once: own path, install root and target, working
/// directory, forwarded `--file` argument, launch. Errors returned here are
/// fatal to the launcher; anything the main application does afterwards is
/// only reported, never propagated.
pub fn run<P: Platform>(
    platform: &P,
    config: &LauncherConfig,
    path: Option<OsString>,
) -> anyhow::Result<LaunchOutcome> {
    let launcher_path = platform
        .current_exe()
        .context("could not determine launcher path")?;

    let plan = resolve_plan(
        &launcher_path,
        P::MAIN_EXECUTABLE,
        config.home_dir.as_deref(),
    )?;
    let args = platform.forward(path.as_deref());

    if config.trace {
        eprintln!(
            "[infoscava] launching {} in {} with {}",
            plan.target.display(),
            plan.working_dir.display(),
            args
        );
    }

    platform.enter_working_dir(&plan.working_dir);
    let outcome = platform.launch(&plan, &args)?;

    if let Some(msg) = outcome_message(&outcome) {
        eprintln!("[infoscava] {msg}");
    }
    Ok(outcome)
}

/// User-facing line for outcomes worth mentioning; `None` when quiet.
fn outcome_message(outcome: &LaunchOutcome) -> Option<String> {
    match outcome {
        LaunchOutcome::Exited(0) | LaunchOutcome::Signaled | LaunchOutcome::Detached => None,
        LaunchOutcome::Exited(code) => {
            Some(format!("Main application exited with error code: {code}"))
        }
        LaunchOutcome::Rejected(code) => Some(format!(
            "warning: the shell could not start the main application (code {code})"
        )),
    }
}
