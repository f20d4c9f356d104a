// crates/generate_settings/src/config.rs

use std::path::PathBuf;

use env_paths::DEFAULT_PATH_VAR;
use find_package_dirs::ScanMode;
use settings_snippet::AUTOCOMPLETE_EXTRA_PATHS_KEY;

use crate::ros::DEFAULT_ROS_ROOT;

/// Variable the ROS setup scripts export the active distro name in.
pub const ROS_DISTRO_VAR: &str = "ROS_DISTRO";

/// Runtime configuration composed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Workspace roots, scanned in this order.
    pub roots: Vec<PathBuf>,
    /// Environment variable holding colon-separated extra paths.
    pub env_var: String,
    /// Settings keys that receive the path array.
    pub keys: Vec<String>,
    pub mode: ScanMode,
    /// Emit `ros.distro` from `ROS_DISTRO` and add the distro's Python dir.
    pub ros_distro: bool,
    /// Install prefix the distro lives under.
    pub ros_root: PathBuf,
    /// Make roots absolute before scanning.
    pub absolute: bool,
    pub verbose: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            env_var: DEFAULT_PATH_VAR.to_string(),
            keys: vec![AUTOCOMPLETE_EXTRA_PATHS_KEY.to_string()],
            mode: ScanMode::Subdirs,
            ros_distro: false,
            ros_root: PathBuf::from(DEFAULT_ROS_ROOT),
            absolute: false,
            verbose: false,
        }
    }
}
