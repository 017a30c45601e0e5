//! Export actions: download the buffer as `README.md` and copy it to the
//! system clipboard.
//!
//! Both take the buffer verbatim. A download never overwrites an existing
//! file; the next free `README (n).md` name is used instead.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine;
use thiserror::Error;

/// File name offered for a download.
pub const README_FILE_NAME: &str = "README.md";
/// MIME type of a download.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Upper bound on `README (n).md` candidates tried before giving up.
const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Errors raised by the host while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export directory {path} does not exist")]
    MissingDirectory { path: PathBuf },

    #[error("no free file name for {file_name} in {dir}")]
    NoFreeName { file_name: String, dir: PathBuf },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[source] std::io::Error),
}

/// The bytes of a download plus the metadata a browser would attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    /// A `README.md` payload holding `text` exactly.
    pub fn readme(text: &str) -> Self {
        Self {
            file_name: README_FILE_NAME,
            mime_type: MARKDOWN_MIME,
            bytes: text.as_bytes().to_vec(),
        }
    }
}

/// Write the buffer into `dir` as `README.md` (or the next free name).
///
/// The file is created with `create_new`, so an existing file is never
/// truncated even if it appears between the name check and the write.
///
/// # Errors
///
/// Returns an error if `dir` is missing, no free name is left, or the
/// write fails.
pub fn download(text: &str, dir: &Path) -> Result<PathBuf, ExportError> {
    save_payload(&ExportPayload::readme(text), dir)
}

/// Write a payload into `dir` under its file name or the next free variant.
///
/// # Errors
///
/// See [`download`].
pub fn save_payload(payload: &ExportPayload, dir: &Path) -> Result<PathBuf, ExportError> {
    if !dir.is_dir() {
        return Err(ExportError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(candidate_name(payload.file_name, attempt));
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path);
        let mut file = match file {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ExportError::Write { path, source }),
        };
        file.write_all(&payload.bytes)
            .and_then(|()| file.flush())
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::info!(
            path = %path.display(),
            bytes = payload.bytes.len(),
            mime = payload.mime_type,
            "exported markdown"
        );
        return Ok(path);
    }

    Err(ExportError::NoFreeName {
        file_name: payload.file_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// `README.md`, `README (1).md`, `README (2).md`, ...
fn candidate_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{file_name} ({attempt})"),
    }
}

/// Put `text` on the system clipboard.
///
/// Uses `pbcopy` on macOS when it works, the OSC 52 terminal escape
/// everywhere else.
///
/// # Errors
///
/// Returns an error if the escape sequence cannot be written to stdout.
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    #[cfg(target_os = "macos")]
    {
        match copy_to_pbcopy(text) {
            Ok(()) => return Ok(()),
            Err(err) => tracing::debug!(%err, "pbcopy failed, falling back to OSC 52"),
        }
    }
    copy_to_clipboard_osc52(text).map_err(ExportError::Clipboard)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout();
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

/// OSC 52 "set clipboard" escape carrying `text`.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_writes_readme_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = download("# Title", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("README.md"));
        assert_eq!(std::fs::read(&path).unwrap(), b"# Title");
    }

    #[test]
    fn test_payload_metadata() {
        let payload = ExportPayload::readme("# Title");
        assert_eq!(payload.file_name, "README.md");
        assert_eq!(payload.mime_type, "text/markdown");
        assert_eq!(payload.bytes, b"# Title");
    }

    #[test]
    fn test_download_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "keep me").unwrap();

        let first = download("one", dir.path()).unwrap();
        let second = download("two", dir.path()).unwrap();

        assert_eq!(first, dir.path().join("README (1).md"));
        assert_eq!(second, dir.path().join("README (2).md"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "keep me"
        );
        assert_eq!(std::fs::read_to_string(second).unwrap(), "two");
    }

    #[test]
    fn test_download_empty_buffer_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = download("", dir.path()).unwrap();
        assert!(std::fs::read(path).unwrap().is_empty());
    }

    #[test]
    fn test_download_preserves_unicode_and_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let text = "# Café\r\n\r\n> ünïcødé ✓\n";
        let path = download(text, dir.path()).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_download_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = download("x", &missing).unwrap_err();
        assert!(matches!(err, ExportError::MissingDirectory { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_candidate_names() {
        assert_eq!(candidate_name("README.md", 0), "README.md");
        assert_eq!(candidate_name("README.md", 3), "README (3).md");
        assert_eq!(candidate_name("README", 1), "README (1)");
    }

    #[test]
    fn test_osc52_sequence_encodes_text() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_sequence_of_empty_text() {
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }
}
