use crate::android::project::AndroidProject;
use crate::android::templates::{self, SPLASH_THEME_ATTRIBUTE};
use crate::android::{TargetReport, TargetStatus};
use crate::patcher::{self, PatchError};
use tracing::{debug, warn};

/// Point MainActivity's theme at the splash theme and mark the attribute
/// with an explanatory comment.
///
/// The manifest must already exist; a missing file is an I/O error.
pub async fn configure_manifest(project: &AndroidProject) -> Result<TargetReport, PatchError> {
    let path = project.manifest_path();
    let patterns = templates::manifest_patterns()?;

    let theme = patcher::replace_or_insert(
        &path,
        &patterns.theme,
        SPLASH_THEME_ATTRIBUTE,
        &patterns.theme_insert,
        &templates::manifest_theme_insert(),
    )
    .await?;

    let comment = patcher::replace_or_insert(
        &path,
        &patterns.comment,
        &templates::manifest_comment_replace(),
        &patterns.comment_insert,
        &templates::manifest_comment_insert(),
    )
    .await?;
    debug!(%theme, %comment, "patched AndroidManifest.xml");

    if !theme.applied() {
        warn!(
            path = %path.display(),
            "AndroidManifest.xml does not contain <activity /> entry for MainActivity. SplashScreen style will not be applied."
        );
        return Ok(TargetReport::new(
            path,
            TargetStatus::Skipped {
                reason: "no <activity /> entry for MainActivity".to_string(),
            },
        ));
    }

    Ok(TargetReport::new(path, TargetStatus::Patched(theme)))
}
