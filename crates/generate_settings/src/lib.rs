// crates/generate_settings/src/lib.rs

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use env_paths::split_env_paths;
use find_package_dirs::{find_package_dirs, FindPackageDirsError, ScanMode};
use settings_snippet::{build_settings, render_settings, PathList};

pub mod config;
pub mod ros;

pub use config::{SettingsConfig, ROS_DISTRO_VAR};
use ros::ros_python_dir;

/// Collects the search paths: environment entries first, then the ROS
/// Python directory (if any), then the directories found under each root
/// in argument order, deduplicated.
///
/// Fails on the first root that is not a directory, before anything is
/// returned, so callers never see a partial list.
///
/// # Arguments
///
/// * `env_value` - The raw colon-separated environment value (empty if unset).
/// * `ros_dir` - The distro's Python package directory, when requested.
/// * `roots` - Workspace roots to scan.
/// * `mode` - How each root is scanned.
pub fn collect_paths(
    env_value: &str,
    ros_dir: Option<&Path>,
    roots: &[PathBuf],
    mode: ScanMode,
) -> Result<PathList, FindPackageDirsError> {
    let mut paths: PathList = split_env_paths(env_value).into_iter().collect();
    if let Some(dir) = ros_dir {
        paths.push(dir.to_string_lossy());
    }

    for root in roots {
        let found = find_package_dirs(root, mode)?;
        debug!(root = %root.display(), count = found.len(), "scanned workspace root");
        paths.extend(found.iter().map(|dir| dir.to_string_lossy().into_owned()));
    }

    Ok(paths)
}

fn resolve_root(root: &Path, absolute: bool) -> Result<PathBuf> {
    if !absolute {
        return Ok(root.to_path_buf());
    }
    std::path::absolute(root)
        .with_context(|| format!("Failed to make '{}' absolute", root.display()))
}

/// Produces the settings snippet for `config`, reading the environment once.
///
/// Returns the rendered JSON text (with trailing newline). Nothing is
/// printed here; `main` owns stdout.
pub fn generate_settings(config: &SettingsConfig) -> Result<String> {
    let env_value = env::var(&config.env_var).unwrap_or_default();

    let ros_distro = if config.ros_distro {
        match env::var(ROS_DISTRO_VAR) {
            Ok(distro) if !distro.is_empty() => Some(distro),
            _ => bail!(
                "{} environment variable not set. Source the appropriate setup.bash first, \
                 for example: source /opt/ros/noetic/setup.bash",
                ROS_DISTRO_VAR
            ),
        }
    } else {
        None
    };

    let ros_dir = match ros_distro.as_deref() {
        Some(distro) => Some(ros_python_dir(&config.ros_root, distro)?),
        None => None,
    };

    let roots = config
        .roots
        .iter()
        .map(|root| resolve_root(root, config.absolute))
        .collect::<Result<Vec<_>>>()?;

    let paths = collect_paths(&env_value, ros_dir.as_deref(), &roots, config.mode)
        .context("Failed to collect workspace paths")?;

    if paths.is_empty() {
        warn!("No search paths found; emitting an empty list.");
    } else {
        info!("Total search paths: {}", paths.len());
    }

    let settings = build_settings(&paths, &config.keys, ros_distro.as_deref());
    render_settings(&settings).context("Failed to serialize settings")
}
