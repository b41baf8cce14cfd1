use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::{Array1, ArrayView1};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use wordvector::{Glove, MatrixOptions, ResourceConfig, WordVector};

use crate::config::{DictSettings, InspectSettings, MatrixSettings, load_settings};

pub fn run_inspect(config_path: Option<PathBuf>) -> Result<()> {
    let settings = load_settings::<InspectSettings>("inspect", config_path)?;
    let glove = open_vectors(settings.file_id.as_deref(), &settings.resources)?;
    let table = glove.table();

    println!("format = {}", glove.format_name());
    if let Some(path) = glove.file_path() {
        println!("file = {}", path.display());
    }
    println!("tokens = {}", table.len());
    println!("dimension = {}", table.dimension());

    let mut sample: Vec<&str> = table.tokens().collect();
    sample.sort_unstable();
    sample.truncate(settings.sample);
    if !sample.is_empty() {
        println!("sample = {}", sample.join(" "));
    }

    if let Some(vocab_path) = &settings.vocab {
        let vocab = read_vocab(vocab_path)?;
        println!(
            "coverage = {:.6} ({} tokens)",
            table.coverage(&vocab),
            vocab.len()
        );
    }
    Ok(())
}

pub fn run_matrix(config_path: Option<PathBuf>) -> Result<()> {
    let settings = load_settings::<MatrixSettings>("matrix", config_path)?;
    let glove = open_vectors(settings.file_id.as_deref(), &settings.resources)?;
    let vocab = read_vocab(&settings.vocab)?;

    let options = MatrixOptions::default()
        .with_mean(settings.mean.clone())
        .with_std(settings.std.clone());
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => {
            warn!("no seed configured, random fallback rows are not reproducible");
            StdRng::from_entropy()
        }
    };
    let matrix = glove
        .builder()
        .load_matrix(settings.n_dims, &vocab, &options, &mut rng)
        .context("failed to build the embedding matrix")?;

    let body = vocab
        .iter()
        .zip(matrix.rows())
        .map(|(token, row)| render_entry(token, row))
        .collect::<Vec<_>>()
        .join("\n");
    write_text_file(&settings.output, &body)?;
    info!(
        rows = matrix.nrows(),
        n_dims = matrix.ncols(),
        output = %settings.output.display(),
        "embedding matrix written"
    );
    println!(
        "Matrix of shape ({}, {}) written to {}",
        matrix.nrows(),
        matrix.ncols(),
        settings.output.display()
    );
    Ok(())
}

pub fn run_dict(config_path: Option<PathBuf>) -> Result<()> {
    let settings = load_settings::<DictSettings>("dict", config_path)?;
    let glove = open_vectors(settings.file_id.as_deref(), &settings.resources)?;
    let vocab = read_vocab(&settings.vocab)?;

    let dict: BTreeMap<String, Array1<f32>> =
        glove.builder().load_dict(&vocab).into_iter().collect();
    let body = dict
        .iter()
        .map(|(token, vector)| render_entry(token, vector.view()))
        .collect::<Vec<_>>()
        .join("\n");
    write_text_file(&settings.output, &body)?;
    println!(
        "{} of {} tokens written to {}",
        dict.len(),
        vocab.len(),
        settings.output.display()
    );
    Ok(())
}

fn open_vectors(file_id: Option<&str>, resources: &ResourceConfig) -> Result<Glove> {
    match file_id {
        Some(id) => info!(file_id = id, "opening word vectors"),
        None => warn!("no file_id configured, every token falls back to random rows"),
    }
    Glove::with_config(file_id, resources)
        .with_context(|| format!("failed to open word vectors {:?}", file_id))
}

fn read_vocab(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read vocabulary {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn render_entry(token: &str, vector: ArrayView1<'_, f32>) -> String {
    let mut line = token.to_string();
    for value in vector {
        line.push(' ');
        line.push_str(&value.to_string());
    }
    line
}

fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    let mut body = contents.to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}
