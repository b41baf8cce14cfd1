//! Pretrained word vector loading.
//!
//! A [`WordVector`] wraps an immutable [`VectorTable`] read once from disk. The
//! [`MatrixBuilder`] turns that table into a dense embedding matrix for an
//! arbitrary vocabulary, or a dictionary of the tokens it actually covers.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use wordvector::{Glove, MatrixOptions, WordVector};
//!
//! let glove = Glove::new(Some("resources://Glove300d"))?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let matrix = glove
//!     .builder()
//!     .load_matrix(300, &["the", "of"], &MatrixOptions::default(), &mut rng)?;
//! assert_eq!(matrix.dim(), (2, 300));
//! # Ok::<(), wordvector::WordVectorError>(())
//! ```

use std::fmt;
use std::path::Path;

pub mod error;
pub mod glove;
pub mod matrix;
pub mod registry;
pub mod resources;
pub mod table;

pub use error::{Result, WordVectorError};
pub use glove::Glove;
pub use matrix::{
    DefaultEmbeddings, MatrixBuilder, MatrixOptions, Moment, RESERVED_OOV_TOKENS, is_reserved_oov,
};
pub use registry::{WordVectorFormat, all_formats, load_class};
pub use resources::ResourceConfig;
pub use table::VectorTable;

/// A loaded word vector resource of some registered format.
pub trait WordVector: fmt::Debug + Send + Sync {
    /// Name of the format this resource was read with.
    fn format_name(&self) -> &'static str;

    /// Logical identifier the resource was opened with.
    fn file_id(&self) -> Option<&str>;

    /// File the vectors were read from.
    fn file_path(&self) -> Option<&Path>;

    /// The underlying token → vector table.
    fn table(&self) -> &VectorTable;

    /// Builder producing matrices and dictionaries over [`WordVector::table`].
    fn builder(&self) -> MatrixBuilder<'_> {
        MatrixBuilder::new(self.table())
    }
}
