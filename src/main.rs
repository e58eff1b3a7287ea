use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use splash_patcher::config::{load_from_path, ConfigError, Mode, Platform, RawConfiguration};
use splash_patcher::{configure_splash_screen, AndroidProject, PatchResult, TargetStatus};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "splash-patcher")]
#[command(
    about = "Idempotent operation that configures native splash screens using passed .png file that would be used in native splash screen.",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Background color of the splash screen view (#RGB, #RGBA, #RRGGBB or #RRGGBBAA)
    background_color: Option<String>,

    /// Path to a valid .png image
    image_path: Option<PathBuf>,

    /// Mode used for the native splash screen image (native is android-only)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Platform to configure
    #[arg(short, long, value_enum)]
    platform: Option<Platform>,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long)]
    project: Option<PathBuf>,

    /// TOML file with a [splash] table; command-line values take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding MainActivity.java or MainActivity.kt
    #[arg(long)]
    activity_dir: Option<PathBuf>,

    /// Show a diff of every file that changed
    #[arg(short, long)]
    diff: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = match &cli.project {
        Some(path) => path
            .canonicalize()
            .with_context(|| format!("Project root not found: {}", path.display()))?,
        None => env::current_dir()?,
    };

    // 1. Layer command-line values over the config file
    let file_config = match &cli.config {
        Some(path) => load_from_path(path)?,
        None => RawConfiguration::default(),
    };
    let cli_config = RawConfiguration {
        background_color: cli.background_color.clone(),
        image_path: cli.image_path.as_deref().map(absolutize).transpose()?,
        mode: cli.mode,
        platform: cli.platform,
    };
    let raw = file_config.merge(cli_config);

    if raw.background_color.is_none() {
        anyhow::bail!(
            "{}\n{}",
            "Missing argument background_color.".red(),
            "Pass it on the command line or set splash.background_color in --config.".dimmed()
        );
    }
    let config = raw
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", ConfigError::from(e).to_string().red()))?;

    // 2. Resolve project layout
    let mut project = AndroidProject::from_project_root(&project_root);
    if let Some(dir) = &cli.activity_dir {
        project = project.with_activity_dir(project_root.join(dir));
    }

    println!("Project: {}", project_root.display());
    println!(
        "Background: {}  Mode: {}  Platform: {}",
        config.background_color, config.mode, config.platform
    );
    println!();

    let before = if cli.diff {
        snapshot(&project.text_targets())
    } else {
        HashMap::new()
    };

    // 3. Configure
    let report = configure_splash_screen(&project, &config).await?;

    // 4. Report results
    for target in &report.targets {
        let marker = match &target.status {
            TargetStatus::Patched(PatchResult::Appended) => "!".yellow(),
            TargetStatus::Skipped { .. } => "⊘".yellow(),
            _ => "✓".green(),
        };
        println!("{} {}: {}", marker, target.path.display(), target.status);

        if cli.diff {
            if let Ok(after) = fs::read_to_string(&target.path) {
                let original = before.get(&target.path).map(String::as_str).unwrap_or("");
                if original != after {
                    display_diff(&target.path, original, &after);
                }
            }
        }
    }
    for platform in &report.skipped_platforms {
        println!("{} {}: not supported", "⊘".yellow(), platform);
    }

    println!();
    println!("{}", "Splash screen configured.".green().bold());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()?.join(path))
}

/// Read every existing target so changes can be diffed afterwards.
fn snapshot(paths: &[PathBuf]) -> HashMap<PathBuf, String> {
    paths
        .iter()
        .filter_map(|path| {
            fs::read_to_string(path)
                .ok()
                .map(|content| (path.clone(), content))
        })
        .collect()
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}
