use crate::config::schema::{ConfigFile, RawConfiguration, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Failure to turn a config file into a usable configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid TOML or the `[splash]` table has the wrong shape
    Parse {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    /// Merged values failed validation
    Invalid(ValidationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Parse {
                path: Some(path),
                source,
            } => write!(f, "malformed [splash] table in {}: {}", path.display(), source),
            ConfigError::Parse { path: None, source } => {
                write!(f, "malformed [splash] table: {}", source)
            }
            ConfigError::Invalid(source) => write!(f, "invalid splash config: {}", source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(source) => Some(source),
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(source: ValidationError) -> Self {
        ConfigError::Invalid(source)
    }
}

/// Parse the `[splash]` table. Fields are not validated here since the
/// command line may still fill them in.
pub fn load_from_str(input: &str) -> Result<RawConfiguration, ConfigError> {
    parse(input).map_err(|source| ConfigError::Parse { path: None, source })
}

fn parse(input: &str) -> Result<RawConfiguration, toml_edit::de::Error> {
    let file: ConfigFile = toml_edit::de::from_str(input)?;
    Ok(file.splash)
}

/// Load a config file; a relative `image_path` is resolved against the
/// file's directory.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfiguration, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = parse(&contents).map_err(|source| ConfigError::Parse {
        path: Some(path.to_path_buf()),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(raw.relative_to(base))
}
