//! GloVe text-format word vectors.

use std::path::{Path, PathBuf};

use crate::WordVector;
use crate::error::Result;
use crate::resources::ResourceConfig;
use crate::table::VectorTable;

/// Word vectors read from a GloVe text file.
///
/// Constructed without a file id the table is empty, so every query falls back
/// to default or random rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Glove {
    file_id: Option<String>,
    file_path: Option<PathBuf>,
    table: VectorTable,
}

impl Glove {
    /// Name under which the format is registered.
    pub const NAME: &'static str = "Glove";

    /// Loads `file_id` using [`ResourceConfig::from_env`].
    pub fn new(file_id: Option<&str>) -> Result<Self> {
        Self::with_config(file_id, &ResourceConfig::from_env())
    }

    /// Loads `file_id`, resolving named resources through `config`.
    pub fn with_config(file_id: Option<&str>, config: &ResourceConfig) -> Result<Self> {
        let Some(file_id) = file_id else {
            return Ok(Self::default());
        };
        let file_path = config.resolve(file_id)?;
        let table = VectorTable::load(&file_path)?;
        Ok(Self {
            file_id: Some(file_id.to_string()),
            file_path: Some(file_path),
            table,
        })
    }

    pub(crate) fn open_boxed(
        file_id: Option<&str>,
        config: &ResourceConfig,
    ) -> Result<Box<dyn WordVector>> {
        Ok(Box::new(Self::with_config(file_id, config)?))
    }
}

impl WordVector for Glove {
    fn format_name(&self) -> &'static str {
        Self::NAME
    }

    fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn table(&self) -> &VectorTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn none_yields_an_empty_table() {
        let glove = Glove::new(None).unwrap();
        assert!(glove.file_id().is_none());
        assert!(glove.file_path().is_none());
        assert!(glove.table().is_empty());
    }

    #[test]
    fn named_resources_resolve_through_the_config() {
        let root = tempdir().unwrap();
        let resource = root.path().join("Glove2d");
        std::fs::create_dir(&resource).unwrap();
        std::fs::write(resource.join("glove.txt"), "the 1 2\nof 3 4\n").unwrap();
        let config = ResourceConfig {
            resource_root: root.path().to_path_buf(),
            ..ResourceConfig::default()
        };

        let glove = Glove::with_config(Some("resources://Glove2d"), &config).unwrap();
        assert_eq!(glove.file_id(), Some("resources://Glove2d"));
        assert_eq!(glove.file_path(), Some(resource.join("glove.txt").as_path()));
        assert_eq!(glove.table().len(), 2);
        assert_eq!(glove.format_name(), "Glove");
    }
}
