use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const SPLASH_IMAGE_FILE: &str = "splashscreen_image.png";
pub const SPLASH_XML_FILE: &str = "splashscreen.xml";
pub const COLORS_FILE: &str = "colors_splashscreen.xml";
pub const STYLES_FILE: &str = "styles_splashscreen.xml";
pub const MANIFEST_FILE: &str = "AndroidManifest.xml";

/// Density-qualified drawable directories scanned for stale splash images.
///
/// See <https://developer.android.com/training/multiscreen/screendensities>.
pub const DRAWABLE_DIRECTORIES: [&str; 6] = [
    "drawable",
    "drawable-mdpi",
    "drawable-hdpi",
    "drawable-xhdpi",
    "drawable-xxhdpi",
    "drawable-xxxhdpi",
];

const APPLICATION_SOURCES: [&str; 2] = ["MainApplication.java", "MainApplication.kt"];

/// Paths of the Android app module being configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidProject {
    /// `android/app/src/main`
    main_dir: PathBuf,
    /// Directory holding `MainActivity.java` / `MainActivity.kt`
    activity_dir: Option<PathBuf>,
}

impl AndroidProject {
    pub fn new(main_dir: impl Into<PathBuf>) -> Self {
        Self {
            main_dir: main_dir.into(),
            activity_dir: None,
        }
    }

    /// Standard React Native layout under `root`, with the activity directory
    /// discovered from the application sources.
    pub fn from_project_root(root: &Path) -> Self {
        let project = Self::new(root.join("android/app/src/main"));
        let activity_dir = find_application_dir(&project.main_dir.join("java"));
        Self {
            activity_dir,
            ..project
        }
    }

    pub fn with_activity_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.activity_dir = Some(dir.into());
        self
    }

    pub fn main_dir(&self) -> &Path {
        &self.main_dir
    }

    pub fn activity_dir(&self) -> Option<&Path> {
        self.activity_dir.as_deref()
    }

    pub fn res_dir(&self) -> PathBuf {
        self.main_dir.join("res")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.main_dir.join(MANIFEST_FILE)
    }

    pub fn colors_path(&self) -> PathBuf {
        self.res_dir().join("values").join(COLORS_FILE)
    }

    pub fn styles_path(&self) -> PathBuf {
        self.res_dir().join("values").join(STYLES_FILE)
    }

    pub fn drawable_xml_path(&self) -> PathBuf {
        self.res_dir().join("drawable").join(SPLASH_XML_FILE)
    }

    pub fn splash_image_path(&self) -> PathBuf {
        self.res_dir().join("drawable").join(SPLASH_IMAGE_FILE)
    }

    /// Text files the engine may create or patch.
    pub fn text_targets(&self) -> Vec<PathBuf> {
        let mut targets = vec![
            self.drawable_xml_path(),
            self.colors_path(),
            self.styles_path(),
            self.manifest_path(),
        ];
        if let Some(dir) = &self.activity_dir {
            targets.push(dir.join("MainActivity.java"));
            targets.push(dir.join("MainActivity.kt"));
        }
        targets
    }
}

/// Directory of the first `MainApplication.{java,kt}` under `java_root`.
fn find_application_dir(java_root: &Path) -> Option<PathBuf> {
    let found = WalkDir::new(java_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| APPLICATION_SOURCES.contains(&name))
        })?;

    let dir = found.path().parent()?.to_path_buf();
    debug!(dir = %dir.display(), "found application sources");
    Some(dir)
}
