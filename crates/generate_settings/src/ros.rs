// crates/generate_settings/src/ros.rs

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Prefix ROS binary installs live under.
pub const DEFAULT_ROS_ROOT: &str = "/opt/ros";

/// Locates the Python package directory of an installed ROS distro.
///
/// ROS 1 installs into `<root>/<distro>/lib/python3/dist-packages`; ROS 2
/// uses a versioned `lib/python3.X/site-packages`. The first one that
/// exists wins. Missing both is an error.
///
/// # Arguments
///
/// * `ros_root` - Install prefix, normally `/opt/ros`.
/// * `distro` - Value of `ROS_DISTRO`.
pub fn ros_python_dir(ros_root: &Path, distro: &str) -> Result<PathBuf> {
    let lib = ros_root.join(distro).join("lib");
    let dist_packages = lib.join("python3").join("dist-packages");
    if dist_packages.is_dir() {
        return Ok(dist_packages);
    }

    let pattern = format!(
        "{}/python3.*/site-packages",
        glob::Pattern::escape(&lib.to_string_lossy())
    );
    let site_packages = glob::glob(&pattern)
        .with_context(|| format!("Invalid search pattern '{}'", pattern))?
        .filter_map(Result::ok)
        .find(|path| path.is_dir());

    site_packages.ok_or_else(|| {
        anyhow!(
            "ROS Python dist-packages directory '{}' does not exist.",
            dist_packages.display()
        )
    })
}
