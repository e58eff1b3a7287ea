use crate::config::color::{HexColor, InvalidColor};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// How the splash image is laid out natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Image rendered by the platform's window background (Android only)
    Native,
    /// Image scaled to fit inside the screen
    Contain,
}

impl Mode {
    /// Name of the `SplashScreenMode` enum constant in generated sources.
    pub fn constant(self) -> &'static str {
        match self {
            Mode::Native => "NATIVE",
            Mode::Contain => "CONTAIN",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Native => f.write_str("native"),
            Mode::Contain => f.write_str("contain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    All,
}

impl Platform {
    pub fn includes_android(self) -> bool {
        matches!(self, Platform::Android | Platform::All)
    }

    pub fn includes_ios(self) -> bool {
        matches!(self, Platform::Ios | Platform::All)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => f.write_str("android"),
            Platform::Ios => f.write_str("ios"),
            Platform::All => f.write_str("all"),
        }
    }
}

/// Validated, read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub image_path: Option<PathBuf>,
    pub mode: Mode,
    pub background_color: HexColor,
    pub platform: Platform,
}

/// Top-level layout of a configuration file.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub splash: RawConfiguration,
}

/// Unvalidated settings as read from a file or the command line.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct RawConfiguration {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub platform: Option<Platform>,
}

impl RawConfiguration {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: RawConfiguration) -> Self {
        Self {
            background_color: overrides.background_color.or(self.background_color),
            image_path: overrides.image_path.or(self.image_path),
            mode: overrides.mode.or(self.mode),
            platform: overrides.platform.or(self.platform),
        }
    }

    /// Resolve a relative image path against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        if let Some(path) = self.image_path.take() {
            self.image_path = Some(if path.is_absolute() {
                path
            } else {
                base.join(path)
            });
        }
        self
    }

    /// Check every field and build the engine configuration.
    ///
    /// Defaults: mode `contain`, platform `all`. All issues are collected
    /// before failing.
    pub fn validate(&self) -> Result<Configuration, ValidationError> {
        let mut issues = Vec::new();
        let mode = self.mode.unwrap_or(Mode::Contain);
        let platform = self.platform.unwrap_or(Platform::All);

        let background_color = match self.background_color.as_deref() {
            None => {
                issues.push(ValidationIssue::MissingField {
                    field: "background_color",
                });
                None
            }
            Some(raw) => match HexColor::parse(raw) {
                Ok(color) => Some(color),
                Err(e) => {
                    issues.push(ValidationIssue::InvalidColor(e));
                    None
                }
            },
        };

        if mode == Mode::Native && platform != Platform::Android {
            issues.push(ValidationIssue::InvalidCombo {
                message: format!("mode '{mode}' is only available for platform 'android', not '{platform}'"),
            });
        }

        if let Some(image) = &self.image_path {
            if !image.is_file() {
                issues.push(ValidationIssue::MissingImage(image.clone()));
            } else if image.extension().and_then(|e| e.to_str()) != Some("png") {
                issues.push(ValidationIssue::NotPng(image.clone()));
            }
        }

        match background_color {
            Some(background_color) if issues.is_empty() => Ok(Configuration {
                image_path: self.image_path.clone(),
                mode,
                background_color,
                platform,
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    MissingField { field: &'static str },
    InvalidColor(InvalidColor),
    InvalidCombo { message: String },
    MissingImage(PathBuf),
    NotPng(PathBuf),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "missing required field '{field}'")
            }
            ValidationIssue::InvalidColor(e) => write!(f, "invalid background color: {e}"),
            ValidationIssue::InvalidCombo { message } => {
                write!(f, "invalid configuration: {message}")
            }
            ValidationIssue::MissingImage(path) => write!(
                f,
                "no such file {}, provide a path to a valid .png file",
                path.display()
            ),
            ValidationIssue::NotPng(path) => write!(
                f,
                "{} is not a .png file, provide a path to a valid .png file",
                path.display()
            ),
        }
    }
}
