use crate::android::{self, AndroidProject, TargetReport};
use crate::config::{Configuration, Platform};
use crate::patcher::PatchError;
use tracing::{info, warn};

/// Outcome of one configuration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub targets: Vec<TargetReport>,
    /// Platforms that were requested but not configured
    pub skipped_platforms: Vec<Platform>,
}

/// Configure the splash screen for every platform `config` selects.
pub async fn configure_splash_screen(
    project: &AndroidProject,
    config: &Configuration,
) -> Result<Report, PatchError> {
    let mut report = Report::default();

    if config.platform.includes_android() {
        info!(main_dir = %project.main_dir().display(), "configuring android");
        report.targets = android::configure_android(project, config).await?;
    }

    if config.platform.includes_ios() {
        warn!("iOS splash screen configuration is not supported by this tool, skipping");
        report.skipped_platforms.push(Platform::Ios);
    }

    Ok(report)
}
