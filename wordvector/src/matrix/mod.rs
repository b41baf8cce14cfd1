//! Materialization of embedding matrices and dictionaries for a vocabulary.
//!
//! A row is taken from the pretrained table when the token is present and its
//! native width equals the requested `n_dims`. Every other row falls back to the
//! caller's default embeddings, or to a draw from `N(mean, std)` per dimension.
//! Drawn rows are only reproducible through the random source the caller passes.

use std::collections::HashMap;

use ndarray::{Array1, Array2, ArrayD, ArrayView1, Ix2};
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::info;

use crate::error::{Result, WordVectorError};
use crate::table::VectorTable;


/// Marker tokens that never receive an entry from [`MatrixBuilder::load_dict`].
pub const RESERVED_OOV_TOKENS: [&str; 3] = ["oov", "unk", ""];

/// Returns whether `token` is one of the [`RESERVED_OOV_TOKENS`].
pub fn is_reserved_oov(token: &str) -> bool {
    RESERVED_OOV_TOKENS.contains(&token)
}

/// Centre or spread of the random fallback distribution.
#[derive(Clone, Debug, PartialEq)]
pub enum Moment {
    /// Applied uniformly to every dimension.
    Scalar(f32),
    /// One value per dimension. Must be one dimensional with `n_dims` entries.
    Array(ArrayD<f32>),
}

impl Moment {
    fn per_dimension(&self, name: &'static str, n_dims: usize) -> Result<Array1<f32>> {
        match self {
            Moment::Scalar(value) => Ok(Array1::from_elem(n_dims, *value)),
            Moment::Array(values) => {
                if values.ndim() != 1 {
                    return Err(WordVectorError::MomentShape {
                        name,
                        rank: values.ndim(),
                    });
                }
                if values.len() != n_dims {
                    return Err(WordVectorError::MomentLength {
                        name,
                        expected: n_dims,
                        found: values.len(),
                    });
                }
                Ok(values.iter().copied().collect())
            }
        }
    }
}

impl From<f32> for Moment {
    fn from(value: f32) -> Self {
        Moment::Scalar(value)
    }
}

impl From<Vec<f32>> for Moment {
    fn from(values: Vec<f32>) -> Self {
        Moment::Array(Array1::from(values).into_dyn())
    }
}

impl From<Array1<f32>> for Moment {
    fn from(values: Array1<f32>) -> Self {
        Moment::Array(values.into_dyn())
    }
}

impl From<Array2<f32>> for Moment {
    fn from(values: Array2<f32>) -> Self {
        Moment::Array(values.into_dyn())
    }
}

impl From<ArrayD<f32>> for Moment {
    fn from(values: ArrayD<f32>) -> Self {
        Moment::Array(values)
    }
}

/// Caller supplied fallback rows, positionally aligned with the vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub enum DefaultEmbeddings {
    /// A `(vocab_len, n_dims)` matrix.
    Matrix(Array2<f32>),
    /// One `n_dims` vector per vocabulary entry.
    Rows(Vec<Array1<f32>>),
    /// An array of dynamic rank. Only rank two is accepted.
    Tensor(ArrayD<f32>),
}

impl DefaultEmbeddings {
    /// Copies the fallback rows into an owned matrix after checking its shape.
    fn to_matrix(&self, rows: usize, n_dims: usize) -> Result<Array2<f32>> {
        let matrix = match self {
            DefaultEmbeddings::Matrix(matrix) => matrix.clone(),
            DefaultEmbeddings::Rows(vectors) => {
                if let Some(bad) = vectors.iter().find(|v| v.len() != n_dims) {
                    return Err(WordVectorError::DefaultEmbeddingsShape {
                        expected: (rows, n_dims),
                        found: (vectors.len(), bad.len()),
                    });
                }
                let mut matrix = Array2::zeros((vectors.len(), n_dims));
                for (mut row, vector) in matrix.rows_mut().into_iter().zip(vectors) {
                    row.assign(vector);
                }
                matrix
            }
            DefaultEmbeddings::Tensor(tensor) => tensor
                .view()
                .into_dimensionality::<Ix2>()
                .map_err(|_| WordVectorError::UnsupportedDefaultEmbeddings {
                    rank: tensor.ndim(),
                })?
                .to_owned(),
        };
        if matrix.dim() != (rows, n_dims) {
            return Err(WordVectorError::DefaultEmbeddingsShape {
                expected: (rows, n_dims),
                found: matrix.dim(),
            });
        }
        Ok(matrix)
    }
}

impl From<Array2<f32>> for DefaultEmbeddings {
    fn from(matrix: Array2<f32>) -> Self {
        DefaultEmbeddings::Matrix(matrix)
    }
}

impl From<Vec<Array1<f32>>> for DefaultEmbeddings {
    fn from(rows: Vec<Array1<f32>>) -> Self {
        DefaultEmbeddings::Rows(rows)
    }
}

impl From<ArrayD<f32>> for DefaultEmbeddings {
    fn from(tensor: ArrayD<f32>) -> Self {
        DefaultEmbeddings::Tensor(tensor)
    }
}

/// Fallback policy for [`MatrixBuilder::load_matrix`].
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixOptions {
    /// Rows used for misses instead of random draws.
    pub default_embeddings: Option<DefaultEmbeddings>,
    /// Mean of the random fallback distribution.
    pub mean: Moment,
    /// Standard deviation of the random fallback distribution.
    pub std: Moment,
}

impl MatrixOptions {
    pub fn with_default_embeddings(mut self, defaults: impl Into<DefaultEmbeddings>) -> Self {
        self.default_embeddings = Some(defaults.into());
        self
    }

    pub fn with_mean(mut self, mean: impl Into<Moment>) -> Self {
        self.mean = mean.into();
        self
    }

    pub fn with_std(mut self, std: impl Into<Moment>) -> Self {
        self.std = std.into();
        self
    }
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            default_embeddings: None,
            mean: Moment::Scalar(0.0),
            std: Moment::Scalar(1.0),
        }
    }
}

/// Builds matrices and dictionaries over a borrowed [`VectorTable`].
#[derive(Clone, Copy, Debug)]
pub struct MatrixBuilder<'a> {
    table: &'a VectorTable,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(table: &'a VectorTable) -> Self {
        Self { table }
    }

    /// Produces a `(vocab.len(), n_dims)` matrix for `vocab`.
    ///
    /// All arguments are validated before any row is written, so a failed call
    /// produces nothing.
    pub fn load_matrix<S, R>(
        &self,
        n_dims: usize,
        vocab: &[S],
        options: &MatrixOptions,
        rng: &mut R,
    ) -> Result<Array2<f32>>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mean = options.mean.per_dimension("mean", n_dims)?;
        let std = options.std.per_dimension("std", n_dims)?;
        let mut matrix = match &options.default_embeddings {
            Some(defaults) => defaults.to_matrix(vocab.len(), n_dims)?,
            None => Array2::zeros((vocab.len(), n_dims)),
        };

        let usable = self.table.dimension() == n_dims;
        let mut hits = 0usize;
        for (token, mut row) in vocab.iter().zip(matrix.rows_mut()) {
            match self.table.get(token.as_ref()).filter(|_| usable) {
                Some(vector) => {
                    row.assign(&ArrayView1::from(vector));
                    hits += 1;
                }
                None if options.default_embeddings.is_none() => {
                    for ((value, mu), sigma) in row.iter_mut().zip(&mean).zip(&std) {
                        *value = mu + sigma * rng.sample::<f32, _>(StandardNormal);
                    }
                }
                None => {}
            }
        }

        if !vocab.is_empty() {
            let uncovered = 1.0 - hits as f32 / vocab.len() as f32;
            info!(
                vocab = vocab.len(),
                hits,
                n_dims,
                native_dims = self.table.dimension(),
                "word vectors cannot cover {:.4} of the vocabulary",
                uncovered
            );
        }
        Ok(matrix)
    }

    /// Maps every non-reserved token of `vocab` found in the table to its native vector.
    pub fn load_dict<S: AsRef<str>>(&self, vocab: &[S]) -> HashMap<String, Array1<f32>> {
        vocab
            .iter()
            .map(AsRef::as_ref)
            .filter(|token| !is_reserved_oov(token))
            .filter_map(|token| {
                self.table
                    .get(token)
                    .map(|vector| (token.to_string(), Array1::from(vector.to_vec())))
            })
            .collect()
    }
}
