// crates/generate_settings/src/main.rs
//
// Prints a settings.json snippet listing extra Python search paths: the
// entries of PYTHONPATH followed by the package directories found in each
// workspace root given on the command line.
//
// Usage: generate [OPTIONS] [ROOT]...

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use env_paths::DEFAULT_PATH_VAR;
use find_package_dirs::ScanMode;
use generate_settings::ros::DEFAULT_ROS_ROOT;
use generate_settings::{generate_settings, SettingsConfig};
use settings_snippet::AUTOCOMPLETE_EXTRA_PATHS_KEY;

#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(version)]
#[command(about = "Generate editor extraPaths settings from PYTHONPATH and workspace roots")]
struct Cli {
    /// Workspace root(s) whose subdirectories become search paths
    #[arg(value_name = "ROOT")]
    roots: Vec<PathBuf>,

    /// Environment variable holding colon-separated extra paths
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PATH_VAR)]
    env_var: String,

    /// Settings key to emit the path list under (repeatable)
    #[arg(long = "key", value_name = "KEY", default_value = AUTOCOMPLETE_EXTRA_PATHS_KEY)]
    keys: Vec<String>,

    /// Collect the src directory of every Python ROS package instead of immediate subdirectories
    #[arg(long)]
    package_src: bool,

    /// Also emit "ros.distro" from ROS_DISTRO and add the distro's Python packages directory
    #[arg(long)]
    ros_distro: bool,

    /// Install prefix of ROS distros
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ROS_ROOT)]
    ros_root: PathBuf,

    /// Make workspace roots absolute before scanning
    #[arg(long)]
    absolute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for SettingsConfig {
    fn from(cli: Cli) -> Self {
        Self {
            roots: cli.roots,
            env_var: cli.env_var,
            keys: cli.keys,
            mode: if cli.package_src {
                ScanMode::PackageSrc
            } else {
                ScanMode::Subdirs
            },
            ros_distro: cli.ros_distro,
            ros_root: cli.ros_root,
            absolute: cli.absolute,
            verbose: cli.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() {
    let config = SettingsConfig::from(Cli::parse());
    init_logging(config.verbose);

    match generate_settings(&config) {
        Ok(snippet) => print!("{}", snippet),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
