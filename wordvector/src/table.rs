//! Immutable token → vector lookup table parsed from GloVe-style text files.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::{Result, WordVectorError};

/// Lookup table mapping tokens to pretrained embeddings of one shared width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTable {
    table: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl VectorTable {
    /// Creates an empty table. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table from a provided token → vector mapping.
    ///
    /// All embeddings must share the same dimensionality. A mismatch is reported
    /// as [`WordVectorError::InconsistentWidth`] with line `0`.
    pub fn new(table: HashMap<String, Vec<f32>>) -> Result<Self> {
        let dimension = table.values().next().map(|v| v.len()).unwrap_or(0);
        if let Some(values) = table.values().find(|values| values.len() != dimension) {
            return Err(WordVectorError::InconsistentWidth {
                line: 0,
                expected: dimension,
                found: values.len(),
            });
        }
        Ok(Self { table, dimension })
    }

    /// Reads a whole embedding file into memory.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let table = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            tokens = table.len(),
            dimension = table.dimension(),
            "loaded word vector table"
        );
        Ok(table)
    }

    /// Parses `token v1 v2 ... vd` lines from any buffered reader.
    ///
    /// Blank lines are ignored. A leading `count dims` line, as written by
    /// word2vec tooling, is skipped when `dims` matches the width of the first
    /// data line, or when no data follows it; otherwise it is an ordinary
    /// width-1 row. Later duplicates of a token replace earlier ones.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = HashMap::new();
        let mut dimension = None;
        let mut seen_content = false;
        let mut header: Option<HeaderCandidate> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let mut parts = line.split_whitespace();
            let Some(token) = parts.next() else {
                continue;
            };
            let rest: Vec<&str> = parts.collect();

            if !seen_content {
                seen_content = true;
                header = HeaderCandidate::parse(line_no, token, &rest);
                if header.is_some() {
                    continue;
                }
            }

            let vector = parse_components(line_no, token, &rest)?;
            if let Some(candidate) = header.take() {
                if candidate.dims == vector.len() {
                    debug!(line = candidate.line, "skipping word2vec header");
                } else {
                    let HeaderCandidate {
                        line: first_line,
                        token: first_token,
                        value,
                        ..
                    } = candidate;
                    let values = parse_components(first_line, &first_token, &[value.as_str()])?;
                    insert_row(&mut table, &mut dimension, first_line, first_token, values)?;
                }
            }
            insert_row(&mut table, &mut dimension, line_no, token.to_string(), vector)?;
        }

        if let Some(candidate) = header {
            debug!(line = candidate.line, "skipping word2vec header without rows");
        }

        Ok(Self {
            table,
            dimension: dimension.unwrap_or(0),
        })
    }

    /// Native dimensionality of the stored vectors, zero for an empty table.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of tokens with a pretrained vector.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the stored vector for `token`.
    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.table.get(token).map(Vec::as_slice)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.table.contains_key(token)
    }

    /// Iterates the tokens held by the table in arbitrary order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Fraction of `vocab` entries that have a pretrained vector.
    ///
    /// An empty vocabulary is fully covered.
    pub fn coverage<S: AsRef<str>>(&self, vocab: &[S]) -> f32 {
        if vocab.is_empty() {
            return 1.0;
        }
        let hits = vocab
            .iter()
            .filter(|token| self.contains(token.as_ref()))
            .count();
        hits as f32 / vocab.len() as f32
    }
}

/// First content line shaped like a word2vec `count dims` header.
struct HeaderCandidate {
    line: usize,
    token: String,
    value: String,
    dims: usize,
}

impl HeaderCandidate {
    fn parse(line: usize, token: &str, rest: &[&str]) -> Option<Self> {
        let [value] = rest else {
            return None;
        };
        token.parse::<usize>().ok()?;
        let dims = value.parse::<usize>().ok()?;
        Some(Self {
            line,
            token: token.to_string(),
            value: value.to_string(),
            dims,
        })
    }
}

fn parse_components(line: usize, token: &str, rest: &[&str]) -> Result<Vec<f32>> {
    if rest.is_empty() {
        return Err(WordVectorError::Parse {
            line,
            reason: format!("token `{token}` has no vector components"),
        });
    }
    rest.iter()
        .map(|raw| {
            raw.parse::<f32>().map_err(|err| WordVectorError::Parse {
                line,
                reason: format!("invalid component `{raw}`: {err}"),
            })
        })
        .collect()
}

fn insert_row(
    table: &mut HashMap<String, Vec<f32>>,
    dimension: &mut Option<usize>,
    line: usize,
    token: String,
    vector: Vec<f32>,
) -> Result<()> {
    let expected = *dimension.get_or_insert(vector.len());
    if vector.len() != expected {
        return Err(WordVectorError::InconsistentWidth {
            line,
            expected,
            found: vector.len(),
        });
    }
    table.insert(token, vector);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<VectorTable> {
        VectorTable::from_reader(Cursor::new(text))
    }

    #[test]
    fn parses_tokens_and_vectors() {
        let table = parse("the 0.1 0.2 0.3\nof -1 0 1\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 3);
        assert_eq!(table.get("the"), Some(&[0.1f32, 0.2, 0.3][..]));
        assert_eq!(table.get("of"), Some(&[-1.0f32, 0.0, 1.0][..]));
        assert!(table.get("and").is_none());
    }

    #[test]
    fn word2vec_header_and_blank_lines_are_skipped() {
        let table = parse("\n2 2\nthe 1 2\n\nof 3 4\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 2);
        assert!(!table.contains("2"));
    }

    #[test]
    fn numeric_first_row_is_kept_when_widths_disagree() {
        let table = parse("1 0\nthe 5\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 1);
        assert_eq!(table.get("1"), Some(&[0.0f32][..]));
        assert_eq!(table.get("the"), Some(&[5.0f32][..]));
    }

    #[test]
    fn header_candidate_conflicting_with_wider_rows_is_an_error() {
        let err = parse("3 4\nthe 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            WordVectorError::InconsistentWidth {
                line: 2,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn header_only_input_is_an_empty_table() {
        let table = parse("0 300\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.dimension(), 0);
    }

    #[test]
    fn inconsistent_width_names_the_line() {
        let err = parse("the 1 2\nof 3\n").unwrap_err();
        assert!(matches!(
            err,
            WordVectorError::InconsistentWidth {
                line: 2,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn malformed_components_are_parse_errors() {
        let err = parse("the 1 x\n").unwrap_err();
        assert!(matches!(err, WordVectorError::Parse { line: 1, .. }));
        let err = parse("lonely\n").unwrap_err();
        assert!(matches!(err, WordVectorError::Parse { line: 1, .. }));
    }

    #[test]
    fn empty_table_has_zero_width() {
        let table = VectorTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.dimension(), 0);
        assert_eq!(table.coverage(&["the"]), 0.0);
        assert_eq!(table.coverage::<&str>(&[]), 1.0);
    }

    #[test]
    fn coverage_counts_duplicates_positionally() {
        let table = parse("the 1\n").unwrap();
        assert_eq!(table.coverage(&["the", "the", "of", "and"]), 0.5);
    }

    #[test]
    fn new_rejects_mixed_widths() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), vec![1.0]);
        map.insert("b".to_string(), vec![0.0, 1.0]);
        assert!(VectorTable::new(map).is_err());
    }
}
