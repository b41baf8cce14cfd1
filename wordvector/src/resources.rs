//! Resolution of word vector file ids to files on disk.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordVectorError};

/// Scheme prefix marking a file id as a named resource rather than a path.
pub const RESOURCE_SCHEME: &str = "resources://";

/// Environment variable overriding [`ResourceConfig::resource_root`].
pub const RESOURCE_ROOT_ENV: &str = "WORDVEC_RESOURCE_ROOT";

/// Settings controlling how file ids map onto the filesystem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Directory holding named resources such as `resources://Glove300d`.
    #[serde(default = "ResourceConfig::env_root")]
    pub resource_root: PathBuf,
    /// File looked up inside a directory-shaped resource.
    #[serde(default = "ResourceConfig::default_file_name")]
    pub file_name: String,
}

impl ResourceConfig {
    fn default_root() -> PathBuf {
        PathBuf::from("resources")
    }

    /// Root named by [`RESOURCE_ROOT_ENV`], else the built-in default.
    fn env_root() -> PathBuf {
        Self::root_or_default(std::env::var_os(RESOURCE_ROOT_ENV))
    }

    fn root_or_default(root: Option<OsString>) -> PathBuf {
        root.map(PathBuf::from).unwrap_or_else(Self::default_root)
    }

    fn default_file_name() -> String {
        "glove.txt".to_string()
    }

    /// Builds the default configuration, honouring [`RESOURCE_ROOT_ENV`] when set.
    pub fn from_env() -> Self {
        Self::default().with_root_override(std::env::var_os(RESOURCE_ROOT_ENV))
    }

    /// Replaces the resource root when `root` is given, keeping it otherwise.
    pub fn with_root_override(mut self, root: Option<OsString>) -> Self {
        if let Some(root) = root {
            self.resource_root = PathBuf::from(root);
        }
        self
    }

    /// Maps a file id onto the location it names, without touching the filesystem.
    ///
    /// `resources://Name` ids live under the resource root; everything else is a path.
    pub fn locate(&self, file_id: &str) -> PathBuf {
        match file_id.strip_prefix(RESOURCE_SCHEME) {
            Some(name) => self.resource_root.join(name),
            None => PathBuf::from(file_id),
        }
    }

    /// Resolves a file id to the embedding file that should be read.
    ///
    /// Directories resolve to their `file_name` entry.
    pub fn resolve(&self, file_id: &str) -> Result<PathBuf> {
        let located = self.locate(file_id);
        let path = if located.is_dir() {
            located.join(&self.file_name)
        } else {
            located
        };
        if !path.is_file() {
            return Err(WordVectorError::MissingResource(path));
        }
        Ok(path)
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            resource_root: Self::default_root(),
            file_name: Self::default_file_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn named_resources_live_under_the_root() {
        let config = ResourceConfig {
            resource_root: PathBuf::from("/data/wordvec"),
            ..ResourceConfig::default()
        };
        assert_eq!(
            config.locate("resources://Glove300d"),
            PathBuf::from("/data/wordvec/Glove300d")
        );
        assert_eq!(config.locate("local/glove"), PathBuf::from("local/glove"));
    }

    #[test]
    fn directories_resolve_to_their_glove_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("glove.txt"), "a 1.0\n").unwrap();
        let config = ResourceConfig::default();

        let resolved = config.resolve(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(resolved, dir.path().join("glove.txt"));
    }

    #[test]
    fn missing_resources_are_reported() {
        let dir = tempdir().unwrap();
        let config = ResourceConfig {
            resource_root: dir.path().to_path_buf(),
            ..ResourceConfig::default()
        };
        let err = config.resolve("resources://Absent").unwrap_err();
        assert!(matches!(err, WordVectorError::MissingResource(_)));
    }

    #[test]
    fn root_override_redirects_named_resources() {
        let dir = tempdir().unwrap();
        let resource = dir.path().join("Glove50d");
        std::fs::create_dir(&resource).unwrap();
        std::fs::write(resource.join("glove.txt"), "a 1.0\n").unwrap();

        let config =
            ResourceConfig::default().with_root_override(Some(dir.path().as_os_str().to_owned()));
        assert_eq!(config.resource_root, dir.path().to_path_buf());
        assert_eq!(
            config.resolve("resources://Glove50d").unwrap(),
            resource.join("glove.txt")
        );
    }

    #[test]
    fn absent_override_keeps_the_root() {
        let config = ResourceConfig::default().with_root_override(None);
        assert_eq!(config, ResourceConfig::default());
        assert_eq!(
            ResourceConfig::root_or_default(None),
            PathBuf::from("resources")
        );
        assert_eq!(
            ResourceConfig::root_or_default(Some(OsString::from("/srv/vectors"))),
            PathBuf::from("/srv/vectors")
        );
    }
}
