use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wordvector::{Moment, ResourceConfig};

/// Scalar or per-dimension moment as written in TOML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MomentSetting {
    Scalar(f32),
    PerDimension(Vec<f32>),
}

impl From<MomentSetting> for Moment {
    fn from(setting: MomentSetting) -> Self {
        match setting {
            MomentSetting::Scalar(value) => Moment::Scalar(value),
            MomentSetting::PerDimension(values) => Moment::from(values),
        }
    }
}

/// Settings driving the `inspect` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InspectSettings {
    /// Word vector file id, either a path or `resources://Name`.
    #[serde(default)]
    pub file_id: Option<String>,
    /// Where named resources are resolved.
    #[serde(default = "ResourceConfig::from_env")]
    pub resources: ResourceConfig,
    /// Optional vocabulary file whose coverage is reported.
    #[serde(default)]
    pub vocab: Option<PathBuf>,
    /// Number of sample tokens printed.
    #[serde(default = "InspectSettings::default_sample")]
    pub sample: usize,
}

impl InspectSettings {
    fn default_sample() -> usize {
        5
    }
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            file_id: None,
            resources: ResourceConfig::from_env(),
            vocab: None,
            sample: Self::default_sample(),
        }
    }
}

/// Settings powering the `matrix` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatrixSettings {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default = "ResourceConfig::from_env")]
    pub resources: ResourceConfig,
    /// Vocabulary file, one token per line.
    #[serde(default = "default_vocab")]
    pub vocab: PathBuf,
    /// Width of the produced matrix.
    #[serde(default = "MatrixSettings::default_n_dims")]
    pub n_dims: usize,
    /// Mean of the random fallback, scalar or one value per dimension.
    #[serde(default = "MatrixSettings::default_mean")]
    pub mean: MomentSetting,
    /// Standard deviation of the random fallback.
    #[serde(default = "MatrixSettings::default_std")]
    pub std: MomentSetting,
    /// Seed for the fallback sampler. Draws from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Destination of the matrix, written as GloVe text.
    #[serde(default = "MatrixSettings::default_output")]
    pub output: PathBuf,
}

impl MatrixSettings {
    fn default_n_dims() -> usize {
        300
    }

    fn default_mean() -> MomentSetting {
        MomentSetting::Scalar(0.0)
    }

    fn default_std() -> MomentSetting {
        MomentSetting::Scalar(1.0)
    }

    fn default_output() -> PathBuf {
        PathBuf::from("embeddings/matrix.txt")
    }
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            file_id: None,
            resources: ResourceConfig::from_env(),
            vocab: default_vocab(),
            n_dims: Self::default_n_dims(),
            mean: Self::default_mean(),
            std: Self::default_std(),
            seed: None,
            output: Self::default_output(),
        }
    }
}

/// Settings consumed by the `dict` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DictSettings {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default = "ResourceConfig::from_env")]
    pub resources: ResourceConfig,
    #[serde(default = "default_vocab")]
    pub vocab: PathBuf,
    /// Destination of the found entries, written as GloVe text.
    #[serde(default = "DictSettings::default_output")]
    pub output: PathBuf,
}

impl DictSettings {
    fn default_output() -> PathBuf {
        PathBuf::from("embeddings/dict.txt")
    }
}

impl Default for DictSettings {
    fn default() -> Self {
        Self {
            file_id: None,
            resources: ResourceConfig::from_env(),
            vocab: default_vocab(),
            output: Self::default_output(),
        }
    }
}

fn default_vocab() -> PathBuf {
    PathBuf::from("vocab.txt")
}

/// Loads TOML settings for the requested command, falling back to defaults when missing.
pub fn load_settings<T>(command: &str, explicit: Option<PathBuf>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let (candidate, explicit_provided) = match explicit {
        Some(path) => (path, true),
        None => (PathBuf::from(format!("{command}.toml")), false),
    };

    if candidate.exists() {
        let raw = std::fs::read_to_string(&candidate).with_context(|| {
            format!(
                "failed to read configuration for `{command}` from {}",
                candidate.display()
            )
        })?;
        let parsed = toml::from_str(&raw).with_context(|| {
            format!(
                "failed to parse TOML configuration for `{command}` at {}",
                candidate.display()
            )
        })?;
        Ok(parsed)
    } else if explicit_provided {
        bail!(
            "configuration file for `{command}` not found at {}",
            candidate.display()
        );
    } else {
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn load_settings_returns_default_when_missing() {
        let settings: DictSettings = load_settings("dict", None).expect("default settings");
        assert_eq!(settings, DictSettings::default());
    }

    #[test]
    fn load_settings_errors_for_missing_explicit_path() {
        let result: Result<MatrixSettings> =
            load_settings("matrix", Some(PathBuf::from("definitely_missing.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_settings_parses_scalar_and_per_dimension_moments() {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.into_temp_path();
        std::fs::write(
            &path,
            r#"file_id = "resources://Glove300d"
vocab = "data/vocab.txt"
n_dims = 3
mean = [0.0, 1.0, 2.0]
std = 0.5
seed = 7

[resources]
resource_root = "/srv/wordvec"
"#,
        )
        .expect("write config");

        let settings: MatrixSettings =
            load_settings("matrix", Some(path.to_path_buf())).expect("parsed settings");
        assert_eq!(settings.file_id.as_deref(), Some("resources://Glove300d"));
        assert_eq!(settings.n_dims, 3);
        assert_eq!(
            settings.mean,
            MomentSetting::PerDimension(vec![0.0, 1.0, 2.0])
        );
        assert_eq!(settings.std, MomentSetting::Scalar(0.5));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.resources.resource_root, PathBuf::from("/srv/wordvec"));
        assert_eq!(settings.resources.file_name, "glove.txt");
        assert_eq!(settings.output, PathBuf::from("embeddings/matrix.txt"));
    }

    #[test]
    fn partial_resources_section_keeps_the_env_aware_root() {
        let file = NamedTempFile::new().expect("temp file");
        let path = file.into_temp_path();
        std::fs::write(&path, "[resources]\nfile_name = \"vectors.txt\"\n").expect("write config");

        let settings: DictSettings =
            load_settings("dict", Some(path.to_path_buf())).expect("parsed settings");
        assert_eq!(settings.resources.file_name, "vectors.txt");
        assert_eq!(
            settings.resources.resource_root,
            ResourceConfig::from_env().resource_root
        );
    }
}
