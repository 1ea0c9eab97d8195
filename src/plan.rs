use std::path::{Path, PathBuf};
use thiserror::Error;

/// Subdirectory beside the launcher that holds the main application.
pub const APP_SUBDIRECTORY: &str = "main";

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("launcher path {0} has no parent directory")]
    NoInstallRoot(PathBuf),
}

/// Where the main application lives and where it should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub install_root: PathBuf, // directory holding the launcher binary
    pub target: PathBuf,       // install_root/main/<executable>
    pub working_dir: PathBuf,  // home directory, else install_root
}

/// Derive the launch plan from the launcher's own absolute path.
///
/// The target is always anchored at the install root and never looked up on
/// `PATH`. Nothing here touches the filesystem: a missing target only shows
/// up when the launch is attempted.
pub fn resolve_plan(
    launcher_path: &Path,
    main_executable: &str,
    home_dir: Option<&Path>,
) -> Result<LaunchPlan, PlanError> {
    let install_root = install_root(launcher_path)?;
    let target = install_root.join(APP_SUBDIRECTORY).join(main_executable);
    let working_dir = select_working_dir(home_dir, &install_root);
    Ok(LaunchPlan {
        install_root,
        target,
        working_dir,
    })
}

fn install_root(launcher_path: &Path) -> Result<PathBuf, PlanError> {
    match launcher_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => Err(PlanError::NoInstallRoot(launcher_path.to_path_buf())),
    }
}

fn select_working_dir(home_dir: Option<&Path>, install_root: &Path) -> PathBuf {
    match home_dir {
        Some(home) if !home.as_os_str().is_empty() => home.to_path_buf(),
        _ => install_root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_install_root_relative() {
        let plan = resolve_plan(Path::new("/opt/app/launcher"), "main", None).unwrap();
        assert_eq!(plan.install_root, PathBuf::from("/opt/app"));
        assert_eq!(plan.target, PathBuf::from("/opt/app/main/main"));
    }

    #[test]
    fn executable_name_comes_from_caller() {
        let plan = resolve_plan(Path::new("/opt/app/launcher"), "main.exe", None).unwrap();
        assert!(plan.target.ends_with("main/main.exe"));
    }

    #[test]
    fn working_dir_prefers_home() {
        let plan = resolve_plan(
            Path::new("/opt/app/launcher"),
            "main",
            Some(Path::new("/home/ana")),
        )
        .unwrap();
        assert_eq!(plan.working_dir, PathBuf::from("/home/ana"));
    }

    #[test]
    fn working_dir_falls_back_to_install_root() {
        let plan = resolve_plan(Path::new("/opt/app/launcher"), "main", None).unwrap();
        assert_eq!(plan.working_dir, PathBuf::from("/opt/app"));

        let plan = resolve_plan(Path::new("/opt/app/launcher"), "main", Some(Path::new("")))
            .unwrap();
        assert_eq!(plan.working_dir, PathBuf::from("/opt/app"));
    }

    #[test]
    fn bare_file_name_has_no_install_root() {
        let err = resolve_plan(Path::new("launcher"), "main", None).unwrap_err();
        assert!(err.to_string().contains("no parent directory"), "{err}");
    }

    #[test]
    fn root_has_no_install_root() {
        assert!(resolve_plan(Path::new("/"), "main", None).is_err());
    }
}
