// crates/env_paths/src/lib.rs

/// Separator used by `PYTHONPATH` and friends on Unix hosts.
pub const PATH_SEPARATOR: char = ':';

/// Default variable holding the extra search paths. Sourcing a ROS
/// `setup.bash` populates it with the distro's dist-packages directories.
pub const DEFAULT_PATH_VAR: &str = "PYTHONPATH";

/// Splits a colon-separated path list into its non-empty segments.
///
/// Segments are returned in the order they appear; no trimming or
/// deduplication happens here.
///
/// # Arguments
///
/// * `value` - The raw environment value.
///
/// # Returns
///
/// A vector of path strings.
pub fn split_env_paths(value: &str) -> Vec<String> {
    value
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
