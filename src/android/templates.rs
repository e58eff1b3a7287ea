//! Generated text and the anchors used to find it again.
//!
//! The marker comments below are what later runs search for. Projects
//! configured by earlier versions of the command already contain them, so
//! they must not change.

use crate::config::{HexColor, Mode};
use crate::pattern::Pattern;
use crate::patcher::PatchSpec;

pub const JAVA_KOTLIN_LINE_MARKER: &str =
    "// THIS LINE IS HANDLED BY 'expo-splash-screen' COMMAND AND IT'S DISCOURAGED TO MODIFY IT MANUALLY";

pub const XML_LINE_MARKER: &str =
    "<!-- THIS LINE IS HANDLED BY 'expo-splash-screen' COMMAND AND IT'S DISCOURAGED TO MODIFY IT MANUALLY -->";

pub const XML_TOP_MARKER: &str = "<!--\n\n    THIS FILE IS CREATED BY 'expo-splash-screen' COMMAND AND IT'S FRAGMENTS ARE HANDLED BY IT\n\n-->";

pub const XML_TOP_NO_MANUAL_MODIFY_MARKER: &str = "<!--\n\n    THIS FILE IS CREATED BY 'expo-splash-screen' COMMAND AND IT'S DISCOURAGED TO MODIFY IT MANUALLY\n\n-->";

pub const MANIFEST_MARKER: &str = "<!-- THIS ACTIVITY'S 'android:theme' ATTRIBUTE IS HANDLED BY 'expo-splash-screen' COMMAND AND IT'S DISCOURAGED TO MODIFY IT MANUALLY -->";

pub const SPLASH_THEME_ATTRIBUTE: &str = r#"android:theme="@style/Theme.App.SplashScreen""#;

const RESOURCES_CLOSING_LINE: &str = r"(?m)^(.*?)</resources>(.*?)$";

/// `<activity ...>` opening tag declaring `.MainActivity`.
const MAIN_ACTIVITY_TAG: &str = r#"<activity\s[^>]*?android:name="\.MainActivity"[^>]*>"#;

/// Same tag, matched from the start of its line.
const MAIN_ACTIVITY_LINE: &str =
    r#"(?m)^[^\n]*?<activity\s[^>]*?android:name="\.MainActivity"[^>]*>"#;

fn color_line(color: &HexColor) -> String {
    format!(
        "  <color name=\"splashscreen_background\">{color}</color> {XML_LINE_MARKER}\n"
    )
}

pub fn colors_patch(color: &HexColor) -> Result<PatchSpec, regex::Error> {
    let line = color_line(color);
    Ok(PatchSpec {
        file_content: format!("{XML_TOP_MARKER}\n<resources>\n{line}</resources>\n"),
        replace_content: line.clone(),
        replace_pattern: Pattern::between(
            Pattern::regex(r"(?m)^.*<resources>.*\n")?,
            Pattern::regex(r"(?m)^.*</resources>.*$")?,
            Pattern::regex(r#"(?m)^.*<color name="splashscreen_background">.*</color>.*\n"#)?,
        ),
        insert_content: line,
        insert_pattern: Pattern::regex(RESOURCES_CLOSING_LINE)?,
    })
}

pub fn styles_patch() -> Result<PatchSpec, regex::Error> {
    let window_background = format!(
        "    <item name=\"android:windowBackground\">@drawable/splashscreen</item>  {XML_LINE_MARKER}\n"
    );
    let file_content = format!(
        "{XML_TOP_MARKER}
<resources>
  <style name=\"Theme.App.SplashScreen\" parent=\"Theme.AppCompat.Light.NoActionBar\"> {XML_LINE_MARKER}
{window_background}    <item name=\"android:windowDrawsSystemBarBackgrounds\">true</item> <!-- Tells the system that the app would take care of drawing background for StatusBar -->
    <item name=\"android:statusBarColor\">@android:color/transparent</item> <!-- Make StatusBar transparent by default -->
  </style>
</resources>
"
    );
    let insert_content = format!(
        "  <style name=\"Theme.App.SplashScreen\" parent=\"Theme.AppCompat.Light.NoActionBar\">  {XML_LINE_MARKER}
{window_background}  </style>
"
    );

    Ok(PatchSpec {
        file_content,
        replace_content: window_background,
        replace_pattern: Pattern::between(
            Pattern::regex(r#"(?m)^.*<style name="Theme\.App\.SplashScreen" parent=".*?">.*\n"#)?,
            Pattern::regex(r"(?m)^.*</style>.*$")?,
            Pattern::regex(r#"(?m)^.*<item name="android:windowBackground">.*</item>.*\n"#)?,
        ),
        insert_content,
        insert_pattern: Pattern::regex(RESOURCES_CLOSING_LINE)?,
    })
}

/// Layered drawable used as the window background.
pub fn drawable_xml(mode: Mode) -> String {
    let native_image = match mode {
        Mode::Native => {
            "

  <item>
    <bitmap
      android:gravity=\"center\"
      android:src=\"@drawable/splashscreen_image\"
    />
  </item>"
        }
        Mode::Contain => "",
    };

    format!(
        "{XML_TOP_NO_MANUAL_MODIFY_MARKER}
<layer-list xmlns:android=\"http://schemas.android.com/apk/res/android\">
  <item android:drawable=\"@color/splashscreen_background\"/>{native_image}
</layer-list>
"
    )
}

/// Anchors for the two manifest edits.
pub struct ManifestPatterns {
    /// Existing `android:theme` inside the MainActivity tag
    pub theme: Pattern,
    /// Right after `<activity` of the MainActivity tag
    pub theme_insert: Pattern,
    /// Marker comment with its surrounding whitespace, before MainActivity
    pub comment: Pattern,
    /// Start of the MainActivity line
    pub comment_insert: Pattern,
}

pub fn manifest_patterns() -> Result<ManifestPatterns, regex::Error> {
    let application = || Pattern::regex(r"<application\b");
    let comment = format!(
        r"[\n\t ]*{}(?:[\t ]*\n)*",
        regex::escape(MANIFEST_MARKER)
    );

    Ok(ManifestPatterns {
        theme: application()?.then(
            Pattern::regex(MAIN_ACTIVITY_TAG)?.containing(Pattern::regex(r#"android:theme="[^"]*""#)?),
        ),
        theme_insert: application()?.then(
            Pattern::regex(MAIN_ACTIVITY_TAG)?.containing(Pattern::literal("<activity").end()),
        ),
        comment: Pattern::between(
            application()?,
            Pattern::regex(MAIN_ACTIVITY_LINE)?,
            Pattern::regex(&comment)?,
        ),
        comment_insert: application()?.then(Pattern::regex(MAIN_ACTIVITY_LINE)?),
    })
}

pub fn manifest_theme_insert() -> String {
    format!("\n      {SPLASH_THEME_ATTRIBUTE}")
}

pub fn manifest_comment_replace() -> String {
    format!("\n\n    {MANIFEST_MARKER}\n")
}

pub fn manifest_comment_insert() -> String {
    format!("\n    {MANIFEST_MARKER}\n")
}

/// Source language of the main activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Java,
    Kotlin,
}

impl Language {
    pub fn file_name(self) -> &'static str {
        match self {
            Language::Java => "MainActivity.java",
            Language::Kotlin => "MainActivity.kt",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            Language::Java => ";",
            Language::Kotlin => "",
        }
    }
}

/// Rendered content and anchors for patching one main activity source.
pub struct ActivityPatches {
    pub language: Language,
    pub imports_pattern: Pattern,
    pub imports: String,
    pub imports_insert_pattern: Pattern,
    pub imports_insert: String,
    pub show_pattern: Pattern,
    pub show_call: String,
    pub show_insert_pattern: Pattern,
    pub show_insert: String,
    pub hook_insert_pattern: Pattern,
    pub hook: String,
    pub bundle_import_pattern: Pattern,
    pub bundle_import: String,
    pub bundle_import_insert_pattern: Pattern,
    pub bundle_import_insert: String,
    /// Only Java needs an explicit `WindowInsets` import
    pub insets_import: Option<(Pattern, String)>,
    pub helper_call_pattern: Pattern,
    pub helper_call: String,
    /// Present once the helper call has been written
    pub helper_call_signature: &'static str,
    pub helper_pattern: Pattern,
    pub helper: String,
    /// Present once the helper method has been written
    pub helper_signature: &'static str,
}

pub fn activity_patches(language: Language, mode: Mode) -> Result<ActivityPatches, regex::Error> {
    let end = language.terminator();
    let mode = mode.constant();
    let imports = format!(
        "import main.kotlin.expo.modules.splashscreen.SplashScreen{end}\nimport main.kotlin.expo.modules.splashscreen.SplashScreenMode{end}"
    );
    let show_call = format!("SplashScreen.show(this, SplashScreenMode.{mode}){end} {JAVA_KOTLIN_LINE_MARKER}");
    let end_re = regex::escape(end);

    let (class_declaration, hook, helper, helper_signature) = match language {
        Language::Java => (
            r"(?m)public class .* extends .* \{.*$",
            format!(
                "\n
  @Override
  protected void onCreate(Bundle savedInstanceState) {{
    super.onCreate(savedInstanceState);
    // SplashScreen.show(...) has to called after super.onCreate(...)
    {show_call}
  }}\n"
            ),
            JAVA_HELPER,
            "private void allowDrawingBeneathStatusBar()",
        ),
        Language::Kotlin => (
            r"(?m)class .* : .* \{.*$",
            format!(
                "\n
  override fun onCreate(savedInstanceState: Bundle?) {{
    super.onCreate(savedInstanceState)
    // SplashScreen.show(...) has to called after super.onCreate(...)
    {show_call}
  }}\n"
            ),
            KOTLIN_HELPER,
            "private fun allowDrawingBeneathStatusBar()",
        ),
    };
    let show_line = format!(r"(?m)SplashScreen\.show\(this, SplashScreenMode\..*\){end_re}.*$");

    let insets_import = match language {
        Language::Java => Some((
            Pattern::regex(r"(?m)^.*?import\s*android\.os\.Bundle;.*$")?.end(),
            "\nimport android.view.WindowInsets;".to_string(),
        )),
        Language::Kotlin => None,
    };

    Ok(ActivityPatches {
        language,
        imports_pattern: Pattern::regex(&format!(
            r"(?m)^import main\.kotlin\.expo\.modules\.splashscreen\.SplashScreen{end_re}.*?\nimport main\.kotlin\.expo\.modules\.splashscreen\.SplashScreenMode{end_re}.*?$"
        ))?,
        imports_insert: format!("{imports}\n\n"),
        imports,
        imports_insert_pattern: Pattern::regex(class_declaration)?,
        show_pattern: Pattern::regex(r"super\.onCreate")?.then(Pattern::regex(&show_line)?),
        show_insert: format!(
            "\n    // SplashScreen.show(...) has to called after super.onCreate(...)\n    {show_call}"
        ),
        show_call,
        show_insert_pattern: Pattern::regex(r"(?m)^.*super\.onCreate.*$")?.end(),
        hook_insert_pattern: Pattern::regex(class_declaration)?.end(),
        hook,
        bundle_import_pattern: Pattern::literal(format!("import android.os.Bundle{end}")),
        bundle_import: format!("import android.os.Bundle{end}"),
        bundle_import_insert_pattern: Pattern::regex(r"(?m)^.*?package .*$")?.end(),
        bundle_import_insert: format!("\n\nimport android.os.Bundle{end}"),
        insets_import,
        helper_call_pattern: Pattern::regex(&show_line)?.end(),
        helper_call: format!(
            "\n    // StatusBar transparency & translucency that would work with RN has to be pragmatically configured.\n    this.allowDrawingBeneathStatusBar(){end}"
        ),
        helper_call_signature: "this.allowDrawingBeneathStatusBar()",
        helper_pattern: Pattern::regex(r"(?m)^\s*\}\s*$")?,
        helper: helper.to_string(),
        helper_signature,
    })
}

const JAVA_HELPER: &str = "
  private void allowDrawingBeneathStatusBar() {
    // Hook into the window insets calculations and consume all the top insets so no padding will be added under the status bar.
    // This approach goes in pair with ReactNative's StatusBar module's approach.
    getWindow().getDecorView().setOnApplyWindowInsetsListener(
        (v, insets) -> {
          WindowInsets defaultInsets = v.onApplyWindowInsets(insets);
          return defaultInsets.replaceSystemWindowInsets(
              defaultInsets.getSystemWindowInsetLeft(),
              0,
              defaultInsets.getSystemWindowInsetRight(),
              defaultInsets.getSystemWindowInsetBottom());
        });
  }
";

const KOTLIN_HELPER: &str = "
  private fun allowDrawingBeneathStatusBar() {
    // Hook into the window insets calculations and consume all the top insets so no padding will be added under the status bar.
    // This approach goes in pair with ReactNative's StatusBar module's approach.
    window.decorView.setOnApplyWindowInsetsListener { v, insets ->
      v.onApplyWindowInsets(insets).let {
        it.replaceSystemWindowInsets(
          it.systemWindowInsetLeft,
          0,
          it.systemWindowInsetRight,
          it.systemWindowInsetBottom
        )
      }
    }
  }
";
