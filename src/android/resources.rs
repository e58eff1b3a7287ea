use crate::android::project::AndroidProject;
use crate::android::templates;
use crate::android::{TargetReport, TargetStatus};
use crate::config::HexColor;
use crate::patcher::{self, PatchError};
use tracing::info;

/// Create or update the `splashscreen_background` color resource.
pub async fn configure_colors(
    project: &AndroidProject,
    color: &HexColor,
) -> Result<TargetReport, PatchError> {
    let path = project.colors_path();
    let spec = templates::colors_patch(color)?;
    let result = patcher::write_or_replace_or_insert(&path, &spec).await?;
    info!(path = %path.display(), %result, %color, "configured splash background color");
    Ok(TargetReport::new(path, TargetStatus::Patched(result)))
}

/// Create or update the `Theme.App.SplashScreen` style.
pub async fn configure_styles(project: &AndroidProject) -> Result<TargetReport, PatchError> {
    let path = project.styles_path();
    let spec = templates::styles_patch()?;
    let result = patcher::write_or_replace_or_insert(&path, &spec).await?;
    info!(path = %path.display(), %result, "configured splash theme");
    Ok(TargetReport::new(path, TargetStatus::Patched(result)))
}
