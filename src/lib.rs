//! Splash Patcher: idempotent native splash screen configuration
//!
//! Configures splash screen assets inside an existing mobile app project by
//! patching generated platform files in place: resource XML, the Android
//! manifest and the main activity source.
//!
//! # Architecture
//!
//! - [`pattern`]: locates anchors in a text buffer (first or last match,
//!   with two-phase region matching in place of regex lookaround)
//! - [`edit`]: pure replace / insert mutations built on one byte-span
//!   [`Splice`] primitive
//! - [`patcher`]: the per-file create → replace → insert → append policy
//! - [`android`]: the target files and the order they are patched in
//!
//! # Idempotence
//!
//! Generated text carries marker comments. The first run creates content,
//! later runs find the markers through the replace patterns and update in
//! place, so re-running with the same input leaves files byte-identical.
//!
//! # Example
//!
//! ```no_run
//! use splash_patcher::{configure_splash_screen, AndroidProject, RawConfiguration};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RawConfiguration {
//!     background_color: Some("#E3F29238".to_string()),
//!     ..Default::default()
//! }
//! .validate()?;
//! let project = AndroidProject::from_project_root(Path::new("."));
//!
//! let report = configure_splash_screen(&project, &config).await?;
//! for target in report.targets {
//!     println!("{}: {}", target.path.display(), target.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod android;
pub mod bridge;
pub mod config;
pub mod configure;
pub mod edit;
pub mod patcher;
pub mod pattern;

// Re-exports
pub use android::{AndroidProject, TargetReport, TargetStatus};
pub use bridge::{hide_async, prevent_auto_hide_async, BridgeError, SplashScreenModule};
pub use config::{
    load_from_path, load_from_str, ConfigError, Configuration, HexColor, Mode, Platform,
    RawConfiguration, ValidationError,
};
pub use configure::{configure_splash_screen, Report};
pub use edit::{Splice, SpliceError};
pub use patcher::{write_or_replace_or_insert, PatchError, PatchResult, PatchSpec};
pub use pattern::Pattern;
