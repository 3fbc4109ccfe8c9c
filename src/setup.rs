use std::process::Command;

use tracing::{info, warn};

/// First line of `mpv --version`, if mpv is on PATH
pub fn mpv_version() -> Option<String> {
    let output = Command::new("mpv").arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|l| l.trim().to_string())
}

pub fn install_hint() -> &'static str {
    if cfg!(target_os = "windows") {
        "winget install mpv"
    } else if cfg!(target_os = "macos") {
        "brew install mpv"
    } else {
        "sudo apt install mpv"
    }
}

/// Startup dependency check. A missing player is not fatal: browsing still
/// works and channels just fail to open.
pub fn check_dependencies() -> bool {
    match mpv_version() {
        Some(version) => {
            info!("Found {}", version);
            true
        }
        None => {
            warn!("mpv not found on PATH; install it with '{}'", install_hint());
            false
        }
    }
}
