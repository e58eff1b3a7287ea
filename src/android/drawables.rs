use crate::android::project::{AndroidProject, DRAWABLE_DIRECTORIES, SPLASH_IMAGE_FILE};
use crate::android::templates;
use crate::android::{TargetReport, TargetStatus};
use crate::config::Mode;
use crate::patcher::{self, PatchError};
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Remove every previously generated splash image, then copy the new one.
///
/// Removal covers all density directories, but the copy only goes to the
/// unqualified `drawable` directory.
pub async fn configure_drawables(
    project: &AndroidProject,
    image: Option<&Path>,
) -> Result<TargetReport, PatchError> {
    let stale: Vec<PathBuf> = DRAWABLE_DIRECTORIES
        .iter()
        .map(|dir| project.res_dir().join(dir).join(SPLASH_IMAGE_FILE))
        .collect();

    let removed = try_join_all(stale.iter().map(|path| remove_if_present(path)))
        .await?
        .into_iter()
        .filter(|removed| *removed)
        .count();
    debug!(removed, "cleared previous splash images");

    let target = project.splash_image_path();
    let Some(image) = image else {
        return Ok(TargetReport::new(target, TargetStatus::Cleared { removed }));
    };

    let bytes = tokio::fs::read(image)
        .await
        .map_err(|e| PatchError::io(image, e))?;
    patcher::write_file(&target, bytes).await?;
    info!(from = %image.display(), to = %target.display(), "copied splash image");

    Ok(TargetReport::new(target, TargetStatus::Written))
}

async fn remove_if_present(path: &Path) -> Result<bool, PatchError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PatchError::io(path, e)),
    }
}

/// Overwrite the layered drawable that references the color and image.
pub async fn configure_drawable_xml(
    project: &AndroidProject,
    mode: Mode,
) -> Result<TargetReport, PatchError> {
    let path = project.drawable_xml_path();
    patcher::write_file(&path, &templates::drawable_xml(mode)).await?;
    info!(path = %path.display(), %mode, "wrote splash drawable");
    Ok(TargetReport::new(path, TargetStatus::Written))
}
