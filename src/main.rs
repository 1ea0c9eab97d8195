// main.rs — arg collection and orchestration only.
// Path resolution, argument shaping and process launch live in the modules below.
mod config;
mod exec;
mod forward;
mod launch;
mod plan;

use config::launcher_config;
use exec::{NativePlatform, Platform};
use forward::forwarded_path;

/// The single optional path to hand to the main application.
/// (No `clap` — keeps the binary small; extra arguments are ignored.)
fn parse_launcher_args() -> Option<std::ffi::OsString> {
    forwarded_path(std::env::args_os().skip(1))
}

fn main() -> anyhow::Result<()> {
    let path = parse_launcher_args();
    let config = launcher_config(NativePlatform::HOME_VAR);

    // The main application's own exit status is reported, not propagated.
    launch::run(&NativePlatform::default(), &config, path)?;
    Ok(())
}
