//! File-level patch application.
//!
//! [`write_or_replace_or_insert`] is the idempotence mechanism: the first run
//! creates canonical content, later runs find the previously written marker
//! through the replace pattern and update it in place.
//!
//! Every function reads the file once, decides in a single pass and writes at
//! most once. Writes are atomic (tempfile + fsync + rename).

use crate::edit;
use crate::pattern::Pattern;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A request to modify one file.
#[derive(Debug, Clone)]
pub struct PatchSpec {
    /// Full content written when the file is missing or blank
    pub file_content: String,
    pub replace_content: String,
    pub replace_pattern: Pattern,
    pub insert_content: String,
    pub insert_pattern: Pattern,
}

/// Outcome of applying a patch to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "PatchResult should be checked or logged"]
pub enum PatchResult {
    /// File was missing or blank and has been written from scratch
    Created,
    /// Replace pattern matched and was updated in place
    Replaced,
    /// Insert anchor matched and content was spliced in before it
    Inserted,
    /// Nothing matched; the insert pattern text was appended to the file
    Appended,
    /// Nothing matched and the file was left untouched
    Unmatched,
}

impl PatchResult {
    pub fn created(self) -> bool {
        self == PatchResult::Created
    }

    pub fn replaced(self) -> bool {
        self == PatchResult::Replaced
    }

    /// Appending counts as an insertion.
    pub fn inserted(self) -> bool {
        matches!(self, PatchResult::Inserted | PatchResult::Appended)
    }

    pub fn applied(self) -> bool {
        self != PatchResult::Unmatched
    }
}

impl fmt::Display for PatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatchResult::Created => "created",
            PatchResult::Replaced => "replaced",
            PatchResult::Inserted => "inserted",
            PatchResult::Appended => "appended",
            PatchResult::Unmatched => "unmatched",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PatchError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        PatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Create, replace, insert or append, in that order of precedence.
///
/// 1. missing or whitespace-only file: write `file_content`
/// 2. `replace_pattern` matches: replace it with `replace_content`
/// 3. `insert_pattern` matches: insert `insert_content` before it
/// 4. otherwise append the source text of `insert_pattern` to the file
///
/// Step 4 writes the pattern, not `insert_content`, leaving the unmatched
/// file visibly marked instead of guessing where the content belongs.
pub async fn write_or_replace_or_insert(
    path: &Path,
    spec: &PatchSpec,
) -> Result<PatchResult, PatchError> {
    let Some(original) = read_if_present(path).await? else {
        write_file(path, &spec.file_content).await?;
        return Ok(PatchResult::Created);
    };

    if original.trim().is_empty() {
        write_file(path, &spec.file_content).await?;
        return Ok(PatchResult::Created);
    }

    let result = replace_or_insert_in_buffer(
        &original,
        &spec.replace_pattern,
        &spec.replace_content,
        &spec.insert_pattern,
        &spec.insert_content,
    );
    if let Some((updated, result)) = result {
        write_file(path, &updated).await?;
        return Ok(result);
    }

    debug!(path = %path.display(), "no anchor matched, appending insert pattern");
    let updated = format!("{original}{}", spec.insert_pattern);
    write_file(path, &updated).await?;
    Ok(PatchResult::Appended)
}

/// Replace `replace_pattern`, or failing that insert before `insert_pattern`.
///
/// The file must exist. Returns [`PatchResult::Unmatched`] without touching
/// the file when neither pattern matches.
pub async fn replace_or_insert(
    path: &Path,
    replace_pattern: &Pattern,
    replace_content: &str,
    insert_pattern: &Pattern,
    insert_content: &str,
) -> Result<PatchResult, PatchError> {
    let original = read_file(path).await?;

    match replace_or_insert_in_buffer(
        &original,
        replace_pattern,
        replace_content,
        insert_pattern,
        insert_content,
    ) {
        Some((updated, result)) => {
            write_file(path, &updated).await?;
            Ok(result)
        }
        None => Ok(PatchResult::Unmatched),
    }
}

fn replace_or_insert_in_buffer(
    buffer: &str,
    replace_pattern: &Pattern,
    replace_content: &str,
    insert_pattern: &Pattern,
    insert_content: &str,
) -> Option<(String, PatchResult)> {
    if let Some(updated) = edit::replace(buffer, replace_pattern, replace_content) {
        return Some((updated, PatchResult::Replaced));
    }
    edit::insert_before(buffer, insert_pattern, insert_content)
        .map(|updated| (updated, PatchResult::Inserted))
}

/// Insert `content` before the first match of `anchor`.
pub async fn insert_in_file(
    path: &Path,
    anchor: &Pattern,
    content: &str,
) -> Result<bool, PatchError> {
    let original = read_file(path).await?;
    match edit::insert_before(&original, anchor, content) {
        Some(updated) => {
            write_file(path, &updated).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Insert `content` before the last match of `anchor`.
pub async fn insert_before_last_in_file(
    path: &Path,
    anchor: &Pattern,
    content: &str,
) -> Result<bool, PatchError> {
    let original = read_file(path).await?;
    match edit::insert_before_last(&original, anchor, content) {
        Some(updated) => {
            write_file(path, &updated).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub async fn read_file(path: &Path) -> Result<String, PatchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PatchError::io(path, e))
}

async fn read_if_present(path: &Path) -> Result<Option<String>, PatchError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PatchError::io(path, e)),
    }
}

pub async fn path_exists(path: &Path) -> Result<bool, PatchError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| PatchError::io(path, e))
}

/// Overwrite or create `path` with `content`, creating missing directories.
pub async fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), PatchError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PatchError::io(parent, e))?;
    }

    let owned_path = path.to_path_buf();
    let content = content.as_ref().to_vec();
    tokio::task::spawn_blocking(move || atomic_write(&owned_path, &content))
        .await?
        .map_err(|e| PatchError::io(path, e))
}

/// Mode requested for files that do not exist yet; the umask still applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Atomic file write: tempfile + fsync + rename.
///
/// The tempfile lives in the target's directory so the rename never crosses
/// filesystems. An existing target keeps its permissions.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        )
    })?;

    let existing = match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let mut temp = temp_builder(existing.is_some()).tempfile_in(parent)?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(unix)]
fn temp_builder(target_exists: bool) -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    if !target_exists {
        builder.permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    builder
}

#[cfg(not(unix))]
fn temp_builder(_target_exists: bool) -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}
