//! Android splash screen configuration.
//!
//! Independent targets are configured concurrently. The drawable list is
//! written only after the splash image it references has been copied, and
//! each activity step waits for the previous one since they edit the same
//! file. The first I/O error aborts the whole run.

pub mod activity;
pub mod drawables;
pub mod manifest;
pub mod project;
pub mod resources;
pub mod templates;

pub use project::AndroidProject;

use crate::config::Configuration;
use crate::patcher::{PatchError, PatchResult};
use std::fmt;
use std::path::PathBuf;

/// What happened to one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    /// File written from scratch, overwriting any previous version
    Written,
    /// Stale splash images removed and no new image configured
    Cleared { removed: usize },
    Patched(PatchResult),
    Skipped { reason: String },
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::Written => write!(f, "written"),
            TargetStatus::Cleared { removed } => write!(f, "cleared ({removed} removed)"),
            TargetStatus::Patched(result) => write!(f, "{result}"),
            TargetStatus::Skipped { reason } => write!(f, "skipped: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub path: PathBuf,
    pub status: TargetStatus,
}

impl TargetReport {
    pub fn new(path: PathBuf, status: TargetStatus) -> Self {
        Self { path, status }
    }
}

/// Configure every Android target.
///
/// Reports come back in a fixed order: splash image, drawable list, colors,
/// styles, manifest, main activity.
pub async fn configure_android(
    project: &AndroidProject,
    config: &Configuration,
) -> Result<Vec<TargetReport>, PatchError> {
    let images_then_list = async {
        let image = drawables::configure_drawables(project, config.image_path.as_deref()).await?;
        let list = drawables::configure_drawable_xml(project, config.mode).await?;
        Ok::<_, PatchError>((image, list))
    };

    let ((image, list), colors, styles, manifest, activity) = tokio::try_join!(
        images_then_list,
        resources::configure_colors(project, &config.background_color),
        resources::configure_styles(project),
        manifest::configure_manifest(project),
        activity::configure_activity(project.activity_dir(), config.mode),
    )?;

    Ok(vec![image, list, colors, styles, manifest, activity])
}
