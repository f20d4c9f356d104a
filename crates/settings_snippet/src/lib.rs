// crates/settings_snippet/src/lib.rs

//! Builds the `settings.json` fragment handed to the editor.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::collections::HashSet;

/// Key the editor's Python extension reads extra import paths from.
pub const AUTOCOMPLETE_EXTRA_PATHS_KEY: &str = "python.autoComplete.extraPaths";

/// Key used by the Pylance analysis engine for the same list.
pub const ANALYSIS_EXTRA_PATHS_KEY: &str = "python.analysis.extraPaths";

/// Key the ROS extension reads the active distro from.
pub const ROS_DISTRO_KEY: &str = "ros.distro";

/// Ordered list of distinct path strings.
///
/// Pushing a path that is already present (exact string match) is a no-op,
/// so the first occurrence decides the position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathList {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path` unless it is already in the list. Returns whether it was added.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }
}

impl<S: Into<String>> Extend<S> for PathList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for path in iter {
            self.push(path);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for PathList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = PathList::new();
        list.extend(iter);
        list
    }
}

/// Builds the settings object: every key in `keys` maps to the same path
/// array, followed by `ros.distro` when a distro is given. Key order is kept.
pub fn build_settings(paths: &PathList, keys: &[String], ros_distro: Option<&str>) -> Value {
    let array = Value::Array(paths.as_slice().iter().cloned().map(Value::String).collect());
    let mut settings = Map::new();
    for key in keys {
        settings.insert(key.clone(), array.clone());
    }
    if let Some(distro) = ros_distro {
        settings.insert(ROS_DISTRO_KEY.to_string(), Value::String(distro.to_string()));
    }
    Value::Object(settings)
}

/// Serializes `settings` with four-space indentation and a trailing newline.
pub fn render_settings(settings: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    settings.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
