//! Static registry of the word vector formats this crate can load.

use std::fmt;

use crate::WordVector;
use crate::error::Result;
use crate::glove::Glove;
use crate::resources::ResourceConfig;

/// Constructor shared by every registered format.
pub type Factory = fn(Option<&str>, &ResourceConfig) -> Result<Box<dyn WordVector>>;

/// A loadable word vector format.
#[derive(Clone, Copy)]
pub struct WordVectorFormat {
    name: &'static str,
    factory: Factory,
}

impl WordVectorFormat {
    /// Registered format name, e.g. `"Glove"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Opens `file_id` with this format.
    pub fn open(
        &self,
        file_id: Option<&str>,
        config: &ResourceConfig,
    ) -> Result<Box<dyn WordVector>> {
        (self.factory)(file_id, config)
    }
}

impl PartialEq for WordVectorFormat {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for WordVectorFormat {}

impl fmt::Debug for WordVectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordVectorFormat")
            .field("name", &self.name)
            .finish()
    }
}

static FORMATS: &[WordVectorFormat] = &[WordVectorFormat {
    name: Glove::NAME,
    factory: Glove::open_boxed,
}];

/// Every registered format.
pub fn all_formats() -> &'static [WordVectorFormat] {
    FORMATS
}

/// Looks up a format by name, returning `None` for unregistered names.
pub fn load_class(name: &str) -> Option<&'static WordVectorFormat> {
    FORMATS.iter().find(|format| format.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glove_is_registered() {
        let names: Vec<_> = all_formats().iter().map(WordVectorFormat::name).collect();
        assert_eq!(names, vec!["Glove"]);
        assert_eq!(load_class("Glove").map(WordVectorFormat::name), Some(Glove::NAME));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert!(load_class("not_subclass").is_none());
        assert!(load_class("glove").is_none());
    }

    #[test]
    fn formats_open_without_a_file_id() {
        let format = load_class("Glove").unwrap();
        let vectors = format.open(None, &ResourceConfig::default()).unwrap();
        assert_eq!(vectors.format_name(), Glove::NAME);
        assert!(vectors.file_id().is_none());
        assert!(vectors.table().is_empty());
    }
}
