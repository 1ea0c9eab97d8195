use std::path::PathBuf;

/// Environment switch that prints the resolved launch plan before starting.
pub const TRACE_VAR: &str = "INFOSCAVA_LAUNCHER_TRACE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub home_dir: Option<PathBuf>, // $HOME / %USERPROFILE%, None if unset or empty
    pub trace: bool,               // INFOSCAVA_LAUNCHER_TRACE=1
}

/// Read the launcher's environment once.
///
/// `home_var` is the platform's home variable name. An empty value counts as
/// unset so the caller falls back to the install root.
pub fn launcher_config(home_var: &str) -> LauncherConfig {
    let home_dir = std::env::var_os(home_var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    let trace = std::env::var(TRACE_VAR)
        .map(|v| v == "1")
        .unwrap_or(false);

    LauncherConfig { home_dir, trace }
}
