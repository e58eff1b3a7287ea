//! Wiring the splash screen into the app's main activity.
//!
//! Steps run strictly in order on one file:
//!
//! 1. the two `SplashScreen` imports (replaced as a pair, else inserted
//!    before the class declaration)
//! 2. the `SplashScreen.show(...)` call (replaced after `super.onCreate`,
//!    else inserted after it, else a whole `onCreate` hook is added together
//!    with the `Bundle` import)
//! 3. only when step 2 inserted something: the status bar helper call, its
//!    method body and (Java) the `WindowInsets` import

use crate::android::templates::{self, ActivityPatches, Language};
use crate::android::{TargetReport, TargetStatus};
use crate::config::Mode;
use crate::patcher::{self, PatchError, PatchResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Find `MainActivity.java`, falling back to `MainActivity.kt`.
pub async fn detect_activity(dir: &Path) -> Result<Option<(Language, PathBuf)>, PatchError> {
    for language in [Language::Java, Language::Kotlin] {
        let path = dir.join(language.file_name());
        if patcher::path_exists(&path).await? {
            return Ok(Some((language, path)));
        }
    }
    Ok(None)
}

pub async fn configure_activity(
    activity_dir: Option<&Path>,
    mode: Mode,
) -> Result<TargetReport, PatchError> {
    let Some(dir) = activity_dir else {
        warn!("could not locate the Android application sources, skipping MainActivity");
        return Ok(TargetReport::new(
            PathBuf::new(),
            TargetStatus::Skipped {
                reason: "application sources not found".to_string(),
            },
        ));
    };

    let Some((language, path)) = detect_activity(dir).await? else {
        warn!(dir = %dir.display(), "neither MainActivity.java nor MainActivity.kt found");
        return Ok(TargetReport::new(
            dir.to_path_buf(),
            TargetStatus::Skipped {
                reason: "no MainActivity.java or MainActivity.kt".to_string(),
            },
        ));
    };

    let patches = templates::activity_patches(language, mode)?;
    let result = patch_activity(&path, &patches).await?;
    info!(path = %path.display(), ?language, %result, "configured MainActivity");

    Ok(TargetReport::new(path, TargetStatus::Patched(result)))
}

/// Apply the activity patch sequence, returning the outcome of the show-call
/// step.
pub async fn patch_activity(path: &Path, p: &ActivityPatches) -> Result<PatchResult, PatchError> {
    let imports = patcher::replace_or_insert(
        path,
        &p.imports_pattern,
        &p.imports,
        &p.imports_insert_pattern,
        &p.imports_insert,
    )
    .await?;
    debug!(%imports, "SplashScreen imports");

    let mut show = patcher::replace_or_insert(
        path,
        &p.show_pattern,
        &p.show_call,
        &p.show_insert_pattern,
        &p.show_insert,
    )
    .await?;

    if !show.applied() {
        // No onCreate at all: add a complete one plus the Bundle import it needs
        if patcher::insert_in_file(path, &p.hook_insert_pattern, &p.hook).await? {
            show = PatchResult::Inserted;
        }
        let bundle = patcher::replace_or_insert(
            path,
            &p.bundle_import_pattern,
            &p.bundle_import,
            &p.bundle_import_insert_pattern,
            &p.bundle_import_insert,
        )
        .await?;
        debug!(%bundle, "Bundle import");
    }

    if show.inserted() {
        add_status_bar_helper(path, p).await?;
    } else if !show.applied() {
        warn!(
            path = %path.display(),
            language = ?p.language,
            "no class declaration found, SplashScreen.show(...) was not added"
        );
    }

    Ok(show)
}

/// First-time-only additions that follow a freshly inserted show-call.
///
/// The inserted flag alone does not prove they are absent: a show-call
/// removed by hand is inserted again on the next run, so each addition is
/// checked against the current source first.
async fn add_status_bar_helper(path: &Path, p: &ActivityPatches) -> Result<(), PatchError> {
    let source = patcher::read_file(path).await?;

    if let Some((anchor, import)) = &p.insets_import {
        if !source.contains(import.trim()) {
            patcher::insert_in_file(path, anchor, import).await?;
        }
    }

    if source.contains(p.helper_call_signature) {
        debug!(path = %path.display(), "status bar helper call already present");
    } else {
        patcher::insert_in_file(path, &p.helper_call_pattern, &p.helper_call).await?;
    }

    if source.contains(p.helper_signature) {
        debug!(path = %path.display(), "status bar helper already present");
        return Ok(());
    }
    if !patcher::insert_before_last_in_file(path, &p.helper_pattern, &p.helper).await? {
        warn!(path = %path.display(), "no closing brace found for the status bar helper");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const JAVA_WITH_ON_CREATE: &str = r#"package com.app;

import android.os.Bundle;
import com.facebook.react.ReactActivity;

public class MainActivity extends ReactActivity {
  @Override
  protected void onCreate(Bundle savedInstanceState) {
    super.onCreate(savedInstanceState);
  }

  @Override
  protected String getMainComponentName() {
    return "app";
  }
}
"#;

    #[tokio::test]
    async fn test_detect_prefers_java() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("MainActivity.kt"), "").unwrap();
        fs::write(dir.path().join("MainActivity.java"), "").unwrap();

        let (language, _) = detect_activity(dir.path()).await.unwrap().unwrap();
        assert_eq!(language, Language::Java);
    }

    #[tokio::test]
    async fn test_detect_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect_activity(dir.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_show_inserted_after_existing_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MainActivity.java");
        fs::write(&path, JAVA_WITH_ON_CREATE).unwrap();

        let patches = templates::activity_patches(Language::Java, Mode::Contain).unwrap();
        let result = patch_activity(&path, &patches).await.unwrap();
        assert_eq!(result, PatchResult::Inserted);

        let source = fs::read_to_string(&path).unwrap();
        assert!(source.contains(
            "    super.onCreate(savedInstanceState);\n    // SplashScreen.show(...) has to called after super.onCreate(...)\n    SplashScreen.show(this, SplashScreenMode.CONTAIN);"
        ));
        assert!(source.contains("import android.os.Bundle;\nimport android.view.WindowInsets;\n"));
        assert_eq!(source.matches("private void allowDrawingBeneathStatusBar()").count(), 1);
        assert_eq!(source.matches("this.allowDrawingBeneathStatusBar();").count(), 1);
        // Only the existing onCreate is kept
        assert_eq!(source.matches("protected void onCreate").count(), 1);
        assert!(source.ends_with("  }\n}\n"));
    }

    #[tokio::test]
    async fn test_helper_not_duplicated_when_show_call_was_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MainActivity.java");
        fs::write(&path, JAVA_WITH_ON_CREATE).unwrap();
        let patches = templates::activity_patches(Language::Java, Mode::Contain).unwrap();
        let _ = patch_activity(&path, &patches).await.unwrap();

        // Someone deletes the show-call and its comment by hand; the next run
        // inserts them again
        let source = fs::read_to_string(&path).unwrap();
        let removed = source.replacen(&patches.show_insert, "", 1);
        assert_ne!(removed, source);
        fs::write(&path, removed).unwrap();

        let result = patch_activity(&path, &patches).await.unwrap();
        assert_eq!(result, PatchResult::Inserted);
        let restored = fs::read_to_string(&path).unwrap();
        assert_eq!(restored.matches("private void allowDrawingBeneathStatusBar()").count(), 1);
        assert_eq!(restored.matches("this.allowDrawingBeneathStatusBar();").count(), 1);
        assert_eq!(restored.matches("import android.view.WindowInsets;").count(), 1);
        assert_eq!(restored.matches("has to called after super.onCreate").count(), 1);
        assert_eq!(restored, source);
    }

    #[tokio::test]
    async fn test_missing_activity_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let report = configure_activity(Some(dir.path()), Mode::Contain).await.unwrap();
        assert!(matches!(report.status, TargetStatus::Skipped { .. }));

        let report = configure_activity(None, Mode::Contain).await.unwrap();
        assert!(matches!(report.status, TargetStatus::Skipped { .. }));
    }
}
