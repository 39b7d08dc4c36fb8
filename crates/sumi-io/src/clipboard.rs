use std::path::PathBuf;

use anyhow::{Context, Result};
use arboard::Clipboard;

use sumi_types::RawBitmap;

/// What a paste can hand the pipeline.
#[derive(Debug)]
pub enum ClipboardPayload {
    /// A native bitmap (RGBA8) copied from some other application.
    Image(RawBitmap),
    /// Text naming local files, one per line; only existing files survive.
    Paths(Vec<PathBuf>),
}

/// Read the most useful payload currently on the clipboard. An image wins
/// over text; text that names no existing file reads as `None`.
pub fn read_payload() -> Result<Option<ClipboardPayload>> {
    let mut clipboard = Clipboard::new().context("failed to open clipboard")?;

    if let Ok(image) = clipboard.get_image() {
        let bitmap = RawBitmap {
            width: image.width as u32,
            height: image.height as u32,
            rgba: image.bytes.into_owned(),
        };
        return Ok(Some(ClipboardPayload::Image(bitmap)));
    }

    if let Ok(text) = clipboard.get_text()
        && !text.is_empty()
    {
        let paths = parse_path_list(&text);
        if !paths.is_empty() {
            return Ok(Some(ClipboardPayload::Paths(paths)));
        }
    }

    Ok(None)
}

/// Put `text` on the system clipboard.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("failed to open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to write clipboard text")
}

/// Interpret clipboard text as a list of local files. Accepts plain paths
/// and file:// URLs; keeps only lines naming an existing regular file.
pub fn parse_path_list(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let path = PathBuf::from(line.strip_prefix("file://").unwrap_or(line));
            path.is_file().then_some(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_list_keeps_existing_files_only() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let existing = file.path().display().to_string();
        let text = format!("{existing}\n/definitely/not/here.png\n\n  {existing}  ");

        let paths = parse_path_list(&text);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p == file.path()));
    }

    #[test]
    fn path_list_strips_file_url_scheme() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let url = format!("file://{}", file.path().display());

        let paths = parse_path_list(&url);
        assert_eq!(paths, vec![file.path().to_path_buf()]);
    }

    #[test]
    fn non_path_text_yields_nothing() {
        assert!(parse_path_list("hello world").is_empty());
        assert!(parse_path_list("").is_empty());
    }
}
