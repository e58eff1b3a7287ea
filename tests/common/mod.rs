#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MANIFEST: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
  package="com.app">

    <uses-permission android:name="android.permission.INTERNET" />

    <application
      android:name=".MainApplication"
      android:label="@string/app_name"
      android:theme="@style/AppTheme">
      <activity
        android:name=".MainActivity"
        android:label="@string/app_name"
        android:windowSoftInputMode="adjustResize">
        <intent-filter>
            <action android:name="android.intent.action.MAIN" />
            <category android:name="android.intent.category.LAUNCHER" />
        </intent-filter>
      </activity>
      <activity android:name="com.facebook.react.devsupport.DevSettingsActivity" />
    </application>

</manifest>
"#;

pub const JAVA_ACTIVITY: &str = r#"package com.app;

import com.facebook.react.ReactActivity;

public class MainActivity extends ReactActivity {

  /**
   * Returns the name of the main component registered from JavaScript.
   */
  @Override
  protected String getMainComponentName() {
    return "app";
  }
}
"#;

pub const KOTLIN_ACTIVITY: &str = r#"package com.app

import android.os.Bundle
import com.facebook.react.ReactActivity

class MainActivity : ReactActivity() {
  override fun onCreate(savedInstanceState: Bundle?) {
    super.onCreate(savedInstanceState)
  }

  override fun getMainComponentName(): String = "app"
}
"#;

pub const KOTLIN_ACTIVITY_WITHOUT_ON_CREATE: &str = r#"package com.app

import com.facebook.react.ReactActivity

class MainActivity : ReactActivity() {
  override fun getMainComponentName(): String = "app"
}
"#;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnew-splash";

/// A React Native style project with a manifest and a Java main activity.
pub fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let main = main_dir(dir.path());
    let package = main.join("java/com/app");
    fs::create_dir_all(&package).unwrap();

    fs::write(main.join("AndroidManifest.xml"), MANIFEST).unwrap();
    fs::write(package.join("MainApplication.java"), "package com.app;\n").unwrap();
    fs::write(package.join("MainActivity.java"), JAVA_ACTIVITY).unwrap();
    fs::write(dir.path().join("splash.png"), PNG_BYTES).unwrap();

    dir
}

pub fn main_dir(root: &Path) -> PathBuf {
    root.join("android/app/src/main")
}

pub fn res_dir(root: &Path) -> PathBuf {
    main_dir(root).join("res")
}

pub fn activity_path(root: &Path, file: &str) -> PathBuf {
    main_dir(root).join("java/com/app").join(file)
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.as_ref().display()))
}
